//! REST controllers.
//!
//! Controllers hold no logic: every action forwards its request to the
//! dispatcher and wraps the result in `Ok`.

use scaffold_define::{ApiSettings, Platform};

use super::DISPATCH_NAMESPACE;
use super::surface::{Action, Surface};
use crate::artifact::{Artifact, ArtifactKind, ArtifactSet};
use crate::errors::GeneratorError;
use crate::naming::controller_name;
use crate::writer::{Method, SourceWriter};

/// Renders `surface` as `<Controller>Controller` on the backend.
pub fn emit_controller(
    surface: &Surface,
    settings: &ApiSettings,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let name = controller_name(&surface.controller);
    let mut writer = SourceWriter::class(&settings.controllers_namespace, &name);
    writer
        .usings([
            "System",
            "System.Threading",
            "System.Threading.Tasks",
            DISPATCH_NAMESPACE,
            "Microsoft.AspNetCore.Authorization",
            "Microsoft.AspNetCore.Mvc",
        ])
        .using(&settings.entities_namespace)
        .usings(&surface.usings)
        .attributes(["ApiController", "Route(\"/api/[controller]/[action]\")"])
        .attributes(&surface.attributes)
        .inherit("ControllerBase")
        .dependency("IMediator", "mediator", false);

    for action in &surface.actions {
        writer.method(action_method(action));
    }

    out.insert(Artifact::new(
        Platform::Backend,
        name,
        ArtifactKind::Controller,
        writer.render(),
    ))
}

fn action_method(action: &Action) -> Method {
    let mut method = Method::with_body(
        format!(
            "public async Task<IActionResult> {}([{}] {} request, CancellationToken cancellationToken = default)",
            action.name,
            action.verb.binding(),
            action.request
        ),
        vec!["return this.Ok(await this.mediator.Send(request, cancellationToken));".to_string()],
    )
    .attribute(action.verb.action_attribute());
    for attribute in action.authorization.attributes() {
        method = method.attribute(attribute);
    }
    method
}

#[cfg(test)]
mod tests {
    use scaffold_define::{ControllerDirective, RequestDirective};

    use super::*;
    use crate::codegen::auth::auth_surface;
    use crate::codegen::surface::entity_surface;
    use crate::test_utils::{api_settings, country};

    fn render(surface: &Surface) -> String {
        let mut out = ArtifactSet::new();
        emit_controller(surface, &api_settings(), &mut out).unwrap();
        let name = controller_name(&surface.controller);
        out.get(Platform::Backend, &name).unwrap().content.clone()
    }

    #[test]
    fn country_controller_actions() {
        let surface = entity_surface(&country(), Platform::Backend).unwrap().unwrap();
        let content = render(&surface);

        assert!(content.contains("    [ApiController]\n    [Route(\"/api/[controller]/[action]\")]\n    public partial class CountryController : ControllerBase\n"));
        assert!(content.contains("private readonly IMediator mediator;"));
        assert!(content.contains("public CountryController(IMediator mediator)"));
        assert!(content.contains(
            "        [HttpPost]\n        [Authorize]\n        public async Task<IActionResult> PostAsync([FromBody] CountryHandlerRequest request, CancellationToken cancellationToken = default)\n"
        ));
        assert!(content.contains(
            "        [HttpGet]\n        [Authorize]\n        public async Task<IActionResult> GetEntityAsync([FromQuery] CountryQueryRequest request, CancellationToken cancellationToken = default)\n"
        ));
        assert_eq!(
            content
                .matches("return this.Ok(await this.mediator.Send(request, cancellationToken));")
                .count(),
            2
        );
        assert!(content.contains("using Shop.Domain.Entities;"));
    }

    #[test]
    fn anonymous_action_ignores_permissions() {
        let mut entity = country();
        entity.generate_entity_query_request = None;
        entity.generate_entity_handler_request = Some(RequestDirective::new().with_controller(
            ControllerDirective::anonymous().with_permission("Admin"),
        ));
        let surface = entity_surface(&entity, Platform::Backend).unwrap().unwrap();
        let content = render(&surface);

        assert!(content.contains("[AllowAnonymous]"));
        assert!(!content.contains("Authorize"));
    }

    #[test]
    fn permissions_become_independent_role_requirements() {
        let mut entity = country();
        entity.generate_entity_query_request = None;
        entity.generate_entity_handler_request = Some(RequestDirective::new().with_controller(
            ControllerDirective::authenticated()
                .with_permission("Admin")
                .with_permission("Auditor"),
        ));
        let surface = entity_surface(&entity, Platform::Backend).unwrap().unwrap();
        let content = render(&surface);

        assert!(content.contains("        [Authorize(Roles = \"Admin\")]\n        [Authorize(Roles = \"Auditor\")]\n"));
        assert!(!content.contains("[Authorize]"));
    }

    #[test]
    fn auth_controller_uses_auth_messages() {
        let content = render(&auth_surface());
        assert!(content.contains("public partial class AuthController : ControllerBase"));
        assert!(content.contains("using KangarooNet.Domain.Entities.Auth;"));
        assert!(content.contains("LoginAsync([FromBody] LoginRequest request"));
        assert_eq!(content.matches("[AllowAnonymous]").count(), 2);
        assert_eq!(content.matches("[Authorize]").count(), 3);
    }
}
