//! Controller action surfaces.
//!
//! A [`Surface`] is the list of remote actions one entity, summary or the
//! auth flows expose. Controllers and clients render the same surface, so
//! their verbs, routes and message types cannot drift apart.

use scaffold_define::{ControllerDirective, Entity, Location, Platform, RequestDirective, Summary};

use crate::artifact::{ArtifactKind, Flow};
use crate::errors::{ErrorContext, GeneratorError};
use crate::naming::{
    collection_query_request_name, collection_query_response_name, handler_request_name,
    handler_response_name, query_request_name, query_response_name,
};

/// HTTP verb of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Post,
    Get,
}

impl Verb {
    /// Controller action attribute.
    pub fn action_attribute(self) -> &'static str {
        match self {
            Verb::Post => "HttpPost",
            Verb::Get => "HttpGet",
        }
    }

    /// Controller parameter binding.
    pub fn binding(self) -> &'static str {
        match self {
            Verb::Post => "FromBody",
            Verb::Get => "FromQuery",
        }
    }

    /// Client method attribute.
    pub fn client_attribute(self) -> &'static str {
        match self {
            Verb::Post => "Post",
            Verb::Get => "Get",
        }
    }

    /// Client parameter binding.
    pub fn client_binding(self) -> &'static str {
        match self {
            Verb::Post => "Body",
            Verb::Get => "Query",
        }
    }
}

/// Who may invoke an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Anonymous,
    Authenticated,
    /// Every listed role is required.
    Roles(Vec<String>),
}

impl Authorization {
    /// Permissions only apply when authentication is required.
    ///
    /// ```
    /// use scaffold_define::ControllerDirective;
    /// use scaffold_gen::codegen::surface::Authorization;
    ///
    /// let open = ControllerDirective::anonymous().with_permission("Admin");
    /// assert_eq!(Authorization::from_directive(&open), Authorization::Anonymous);
    /// ```
    pub fn from_directive(directive: &ControllerDirective) -> Self {
        match (directive.is_authentication_required, directive.permissions.is_empty()) {
            (false, _) => Authorization::Anonymous,
            (true, true) => Authorization::Authenticated,
            (true, false) => Authorization::Roles(directive.permissions.clone()),
        }
    }

    pub fn attributes(&self) -> Vec<String> {
        match self {
            Authorization::Anonymous => vec!["AllowAnonymous".to_string()],
            Authorization::Authenticated => vec!["Authorize".to_string()],
            Authorization::Roles(roles) => roles
                .iter()
                .map(|role| format!("Authorize(Roles = \"{role}\")"))
                .collect(),
        }
    }
}

/// One remote action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub verb: Verb,
    pub request: String,
    pub response: String,
    pub authorization: Authorization,
}

/// The actions of one controller, plus what the directives add to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Controller stem (`Country` for `CountryController`).
    pub controller: String,
    pub actions: Vec<Action>,
    pub usings: Vec<String>,
    pub attributes: Vec<String>,
}

impl Surface {
    fn new(controller: &str) -> Self {
        Self {
            controller: controller.to_string(),
            actions: vec![],
            usings: vec![],
            attributes: vec![],
        }
    }

    fn add(&mut self, action: Action, directive: &ControllerDirective) {
        for using in &directive.additional_usings {
            if !self.usings.contains(using) {
                self.usings.push(using.clone());
            }
        }
        for attribute in &directive.custom_attributes {
            if !self.attributes.contains(attribute) {
                self.attributes.push(attribute.clone());
            }
        }
        self.actions.push(action);
    }
}

fn controller_directive(directive: &Option<RequestDirective>) -> Option<&ControllerDirective> {
    directive.as_ref().and_then(|d| d.generate_controller.as_ref())
}

fn plural_for<'a>(
    name: &str,
    plural: Option<&'a str>,
    kind: ArtifactKind,
) -> Result<&'a str, GeneratorError> {
    plural.filter(|p| !p.trim().is_empty()).ok_or_else(|| {
        ErrorContext::new(name, kind)
            .in_flow(Flow::CollectionQuery)
            .error(format!("a plural name is required for the {} flow", Flow::CollectionQuery))
    })
}

fn located(location: Location, platform: Platform) -> bool {
    location.includes(platform)
}

/// The controller surface of `entity` on `platform`, if any flow asks for one.
pub fn entity_surface(entity: &Entity, platform: Platform) -> Result<Option<Surface>, GeneratorError> {
    if !located(entity.location, platform) {
        return Ok(None);
    }

    let mut surface = Surface::new(&entity.name);
    if let Some(directive) = controller_directive(&entity.generate_entity_handler_request) {
        surface.add(
            Action {
                name: "PostAsync".to_string(),
                verb: Verb::Post,
                request: handler_request_name(&entity.name),
                response: handler_response_name(&entity.name),
                authorization: Authorization::from_directive(directive),
            },
            directive,
        );
    }
    if let Some(directive) = controller_directive(&entity.generate_entity_query_request) {
        surface.add(
            Action {
                name: "GetEntityAsync".to_string(),
                verb: Verb::Get,
                request: query_request_name(&entity.name),
                response: query_response_name(&entity.name),
                authorization: Authorization::from_directive(directive),
            },
            directive,
        );
    }
    if let Some(directive) = controller_directive(&entity.generate_entities_query_request) {
        let plural = plural_for(
            &entity.name,
            entity.plural_name.as_deref(),
            ArtifactKind::Controller,
        )?;
        surface.add(
            Action {
                name: "GetEntitiesAsync".to_string(),
                verb: Verb::Get,
                request: collection_query_request_name(plural),
                response: collection_query_response_name(plural),
                authorization: Authorization::from_directive(directive),
            },
            directive,
        );
    }

    Ok((!surface.actions.is_empty()).then_some(surface))
}

/// The controller surface of `summary` on `platform`, if any flow asks for one.
pub fn summary_surface(summary: &Summary, platform: Platform) -> Result<Option<Surface>, GeneratorError> {
    if !located(summary.location, platform) {
        return Ok(None);
    }

    let mut surface = Surface::new(&summary.name);
    if let Some(directive) = controller_directive(&summary.generate_summary_query_request) {
        surface.add(
            Action {
                name: "GetSummaryAsync".to_string(),
                verb: Verb::Get,
                request: query_request_name(&summary.name),
                response: query_response_name(&summary.name),
                authorization: Authorization::from_directive(directive),
            },
            directive,
        );
    }
    if let Some(directive) = controller_directive(&summary.generate_summaries_query_request) {
        let plural = plural_for(
            &summary.name,
            summary.plural_name.as_deref(),
            ArtifactKind::Controller,
        )?;
        surface.add(
            Action {
                name: "GetSummariesAsync".to_string(),
                verb: Verb::Get,
                request: collection_query_request_name(plural),
                response: collection_query_response_name(plural),
                authorization: Authorization::from_directive(directive),
            },
            directive,
        );
    }

    Ok((!surface.actions.is_empty()).then_some(surface))
}
