//! Artifact emitters.
//!
//! Each submodule emits one artifact family. Data-carrying classes (entities,
//! summaries, flow messages, custom messages, auth messages) all go through
//! [`emit_data_class`], which renders the class and its paired validator
//! from the same field walk so the two can never disagree on order.
//!
//! ## Modules
//!
//! - [`entity`] - Entity and summary data classes
//! - [`messages`] - Mutate, single-query and collection-query messages
//! - [`custom`] - Custom requests and responses
//! - [`auth`] - Fixed authentication messages and their action surface
//! - [`surface`] - Controller action surfaces shared by controllers and clients
//! - [`controller`] - REST controllers
//! - [`client`] - Typed remote-call interfaces
//! - [`enums`] - Enumerations
//! - [`application`] - Application-layer handlers
//! - [`repository`] - Database repository

pub mod application;
pub mod auth;
pub mod client;
pub mod controller;
pub mod custom;
pub mod entity;
pub mod enums;
pub mod messages;
pub mod repository;
pub mod surface;

use std::collections::HashSet;

use scaffold_define::{
    EntitiesSettings, FieldKind, Fields, KeyType, MessagesSettings, Platform,
};

use crate::artifact::{Artifact, ArtifactKind, ArtifactSet};
use crate::errors::{ErrorContext, GeneratorError};
use crate::naming::{TargetPolicy, validator_name};
use crate::resolver::resolve_property;
use crate::writer::{Method, Property, SourceWriter};

/// Namespace of the capability and message interfaces.
pub(crate) const DOMAIN_NAMESPACE: &str = "KangarooNet.Domain";
pub(crate) const DOMAIN_ENTITIES_NAMESPACE: &str = "KangarooNet.Domain.Entities";
pub(crate) const DISPATCH_NAMESPACE: &str = "MediatR";

/// Where and how data classes for one platform are rendered.
#[derive(Debug, Clone, Copy)]
pub struct RenderTarget<'a> {
    pub policy: TargetPolicy,
    pub namespace: &'a str,
    pub validators_namespace: &'a str,
    pub additional_usings: &'a [String],
}

impl<'a> RenderTarget<'a> {
    pub fn for_entities(platform: Platform, settings: &'a EntitiesSettings) -> Self {
        Self {
            policy: TargetPolicy::new(
                platform,
                settings.use_observable_collection,
                settings.generate_notify_property_changes,
            ),
            namespace: &settings.namespace,
            validators_namespace: settings.validators_namespace(),
            additional_usings: &settings.additional_usings,
        }
    }

    pub fn for_messages(platform: Platform, settings: &'a MessagesSettings) -> Self {
        Self {
            policy: TargetPolicy::new(
                platform,
                settings.use_observable_collection,
                settings.generate_notify_property_changes,
            ),
            namespace: &settings.namespace,
            validators_namespace: settings.validators_namespace(),
            additional_usings: &settings.additional_usings,
        }
    }

    pub fn platform(&self) -> Platform {
        self.policy.platform
    }

    /// `IRequest<response>` when requests on this platform are dispatchable.
    pub(crate) fn dispatch_interface(&self, response: &str) -> Option<String> {
        self.policy
            .dispatchable()
            .then(|| format!("IRequest<{response}>"))
    }
}

/// A property carrying another data class (`Entity`, `Summary`).
///
/// When `validated_type` is set the validator requires the value and
/// cascades into that type's validator.
#[derive(Debug, Clone)]
pub(crate) struct CarriedValue {
    pub property: Property,
    pub validated_type: Option<String>,
}

impl CarriedValue {
    pub fn validated(ty: &str, name: &str) -> Self {
        Self {
            property: Property::new(ty, name),
            validated_type: Some(ty.to_string()),
        }
    }

    pub fn plain(property: Property) -> Self {
        Self {
            property,
            validated_type: None,
        }
    }
}

/// Everything needed to render one data class and its validator.
#[derive(Debug, Clone)]
pub(crate) struct DataClass<'a> {
    pub name: String,
    pub kind: ArtifactKind,
    pub context: ErrorContext,
    pub inheritance: Vec<String>,
    pub usings: Vec<String>,
    pub attributes: &'a [String],
    pub leading: Vec<CarriedValue>,
    pub fields: &'a Fields,
    pub trailing: Vec<Property>,
}

impl<'a> DataClass<'a> {
    pub fn new(name: impl Into<String>, kind: ArtifactKind, context: ErrorContext, fields: &'a Fields) -> Self {
        Self {
            name: name.into(),
            kind,
            context,
            inheritance: vec![],
            usings: vec![],
            attributes: &[],
            leading: vec![],
            fields,
            trailing: vec![],
        }
    }
}

/// The key type of `fields` if its key is rendered on `platform`.
pub(crate) fn emitted_key(fields: &Fields, platform: Platform) -> Option<KeyType> {
    fields
        .key_field
        .as_ref()
        .filter(|key| key.location.includes(platform))
        .map(|key| key.key_type)
}

/// Renders `class` and `<class>Validator` for `target` into `out`.
pub(crate) fn emit_data_class(
    target: &RenderTarget<'_>,
    class: DataClass<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let platform = target.platform();
    let mut writer = SourceWriter::class(target.namespace, &class.name);
    writer
        .usings(["System", "System.Collections.Generic"])
        .using(target.policy.collections.namespace())
        .usings([DOMAIN_NAMESPACE, DOMAIN_ENTITIES_NAMESPACE])
        .usings(target.additional_usings)
        .usings(&class.usings)
        .attributes(class.attributes)
        .notify_property_changes(target.policy.notify_property_changes);
    for ty in &class.inheritance {
        writer.inherit(ty);
    }

    let mut rules = Vec::new();
    let mut seen = HashSet::new();
    let mut claim = |name: &str| -> Result<(), GeneratorError> {
        if seen.insert(name.to_string()) {
            Ok(())
        } else {
            Err(class.context.error(format!("duplicate property '{name}'")))
        }
    };

    for carried in &class.leading {
        claim(&carried.property.name)?;
        if let Some(ty) = &carried.validated_type {
            let name = &carried.property.name;
            rules.push(format!("this.RuleFor(x => x.{name}).NotNull().NotEmpty();"));
            rules.push(format!(
                "this.RuleFor(x => x.{name}).SetValidator(new {}());",
                validator_name(ty)
            ));
        }
        writer.property(carried.property.clone());
    }

    let mut key_name = None;
    for field in class.fields.iter().filter(|f| f.location.includes(platform)) {
        claim(field.name)?;
        let property = resolve_property(&field, target.policy.collections, &class.context)?;
        if field.is_required {
            rules.push(format!("this.RuleFor(x => x.{}).NotNull().NotEmpty();", field.name));
        }
        if field.kind == FieldKind::String && field.max_length > 0 {
            rules.push(format!(
                "this.RuleFor(x => x.{}).MaximumLength({});",
                field.name, field.max_length
            ));
        }
        if field.kind == FieldKind::Entity {
            rules.push(format!(
                "this.RuleFor(x => x.{}).SetValidator(new {}());",
                field.name,
                validator_name(&property.ty)
            ));
        }
        if field.kind == FieldKind::Key {
            key_name = Some(field.name);
        }
        writer.property(property);
    }

    for property in &class.trailing {
        claim(&property.name)?;
        writer.property(property.clone());
    }

    if let (Some(name), Some(key_type)) = (key_name, emitted_key(class.fields, platform)) {
        let ty = key_type.type_name();
        writer
            .method(Method::with_body(
                format!("public {ty} GetKey()"),
                vec![format!("return this.{name};")],
            ))
            .method(Method::with_body(
                format!("public void SetKey({ty} key)"),
                vec![format!("this.{name} = key;")],
            ));
    }

    let validator = validator_name(&class.name);
    let mut validator_writer = SourceWriter::class(target.validators_namespace, &validator);
    validator_writer
        .usings(["System", "FluentValidation"])
        .using(target.namespace)
        .usings(target.additional_usings)
        .inherit(format!("AbstractValidator<{}>", class.name));
    for rule in rules {
        validator_writer.constructor_line(rule);
    }
    validator_writer
        .constructor_line("this.SetCustomRules();")
        .method(Method::declaration("partial void SetCustomRules()"));

    out.insert(Artifact::new(platform, &class.name, class.kind, writer.render()))?;
    out.insert(Artifact::new(
        platform,
        validator,
        ArtifactKind::Validator,
        validator_writer.render(),
    ))?;
    Ok(())
}
