//! Typed remote-call interfaces.
//!
//! A client mirrors one controller surface: same verbs, same message types,
//! and routes derived from the controller's `/api/[controller]/[action]`
//! template.

use scaffold_define::{ApiClientSettings, Platform};

use super::surface::{Action, Surface};
use crate::artifact::{Artifact, ArtifactKind, ArtifactSet};
use crate::errors::GeneratorError;
use crate::naming::{action_route, client_interface_name, client_name};
use crate::writer::{Method, SourceWriter};

/// Renders `surface` as `I<Controller>Client` in artifact `<Controller>Client`.
pub fn emit_client(
    surface: &Surface,
    settings: &ApiClientSettings,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let mut writer = SourceWriter::interface(&settings.namespace, client_interface_name(&surface.controller));
    writer
        .usings(["System", "System.Threading.Tasks", "KangarooNet.UI.APIClient", "Refit"])
        .using(&settings.entities_namespace)
        .usings(&surface.usings)
        .inherit("IAPIClient");

    for action in &surface.actions {
        writer.method(call_method(&surface.controller, action));
    }

    out.insert(Artifact::new(
        Platform::Frontend,
        client_name(&surface.controller),
        ArtifactKind::Client,
        writer.render(),
    ))
}

fn call_method(controller: &str, action: &Action) -> Method {
    Method::declaration(format!(
        "Task<{}> {}([{}] {} request)",
        action.response,
        action.name,
        action.verb.client_binding(),
        action.request
    ))
    .attribute(format!(
        "{}(\"{}\")",
        action.verb.client_attribute(),
        action_route(controller, &action.name)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::auth::auth_surface;
    use crate::codegen::surface::entity_surface;
    use crate::test_utils::{api_client_settings, country};

    fn render(surface: &Surface) -> String {
        let mut out = ArtifactSet::new();
        emit_client(surface, &api_client_settings(), &mut out).unwrap();
        out.get(Platform::Frontend, &client_name(&surface.controller))
            .unwrap()
            .content
            .clone()
    }

    #[test]
    fn country_client_mirrors_controller() {
        let surface = entity_surface(&country(), Platform::Frontend).unwrap().unwrap();
        let content = render(&surface);

        assert!(content.contains("public partial interface ICountryClient : IAPIClient\n"));
        assert!(content.contains(
            "        [Post(\"/api/Country/Post\")]\n        Task<CountryHandlerResponse> PostAsync([Body] CountryHandlerRequest request);\n"
        ));
        assert!(content.contains(
            "        [Get(\"/api/Country/GetEntity\")]\n        Task<CountryQueryResponse> GetEntityAsync([Query] CountryQueryRequest request);\n"
        ));
        assert!(content.contains("using Refit;"));
        assert!(!content.contains("Authorize"));
    }

    #[test]
    fn auth_client_routes() {
        let content = render(&auth_surface());
        assert!(content.contains("public partial interface IAuthClient : IAPIClient"));
        assert!(content.contains("[Post(\"/api/Auth/InsertApplicationUser\")]"));
        assert!(content.contains("Task<LogoutResponse> LogoutAsync([Body] LogoutRequest request);"));
    }
}
