//! Fixed authentication messages and their action surface.
//!
//! The auth flows are not schema-driven: the same request/response pairs,
//! with the same fields, are emitted whenever a platform opts in.

use scaffold_define::{Fields, StringField};

use super::surface::{Action, Authorization, Surface, Verb};
use super::{DISPATCH_NAMESPACE, DataClass, RenderTarget, emit_data_class};
use crate::artifact::{ArtifactKind, ArtifactSet};
use crate::errors::{ErrorContext, GeneratorError};

pub(crate) const AUTH_NAMESPACE: &str = "KangarooNet.Domain.Entities.Auth";

/// Credential fields are bounded at this length.
const CREDENTIAL_MAX_LENGTH: u32 = 255;

/// One fixed auth flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFlow {
    pub name: &'static str,
    pub action: &'static str,
    pub anonymous: bool,
    request_fields: &'static [&'static str],
    response_fields: &'static [&'static str],
    /// Request fields bounded by [`CREDENTIAL_MAX_LENGTH`]; the rest are unbounded.
    bounded: bool,
}

impl AuthFlow {
    pub fn request_name(&self) -> String {
        format!("{}Request", self.name)
    }

    pub fn response_name(&self) -> String {
        format!("{}Response", self.name)
    }

    fn request_fields(&self) -> Fields {
        required_strings(self.request_fields, self.bounded)
    }

    fn response_fields(&self) -> Fields {
        required_strings(self.response_fields, false)
    }
}

pub const AUTH_FLOWS: [AuthFlow; 5] = [
    AuthFlow {
        name: "ApplicationUserInsert",
        action: "InsertApplicationUserAsync",
        anonymous: true,
        request_fields: &["FullName", "Email", "Password"],
        response_fields: &[],
        bounded: true,
    },
    AuthFlow {
        name: "Login",
        action: "LoginAsync",
        anonymous: true,
        request_fields: &["Email", "Password"],
        response_fields: &["Token", "RefreshToken"],
        bounded: true,
    },
    AuthFlow {
        name: "RefreshToken",
        action: "RefreshTokenAsync",
        anonymous: false,
        request_fields: &["Token", "RefreshToken"],
        response_fields: &["Token", "RefreshToken"],
        bounded: false,
    },
    AuthFlow {
        name: "Logout",
        action: "LogoutAsync",
        anonymous: false,
        request_fields: &[],
        response_fields: &[],
        bounded: false,
    },
    AuthFlow {
        name: "ChangePassword",
        action: "ChangePasswordAsync",
        anonymous: false,
        request_fields: &["CurrentPassword", "NewPassword"],
        response_fields: &[],
        bounded: true,
    },
];

fn required_strings(names: &[&str], bounded: bool) -> Fields {
    names.iter().fold(Fields::new(), |fields, name| {
        let field = StringField::new(*name).required();
        let field = if bounded {
            field.max_length(CREDENTIAL_MAX_LENGTH)
        } else {
            field
        };
        fields.with_string(field)
    })
}

/// Emits every auth request and response for the target platform.
pub fn emit_auth_messages(target: &RenderTarget<'_>, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
    for flow in &AUTH_FLOWS {
        let request_name = flow.request_name();
        let response_name = flow.response_name();

        let request_fields = flow.request_fields();
        let mut request = DataClass::new(
            &request_name,
            ArtifactKind::AuthRequest,
            ErrorContext::new(flow.name, ArtifactKind::AuthRequest),
            &request_fields,
        );
        request.inheritance.push(format!("I{request_name}"));
        request.usings.push(AUTH_NAMESPACE.to_string());
        if let Some(dispatch) = target.dispatch_interface(&response_name) {
            request.inheritance.push(dispatch);
            request.usings.push(DISPATCH_NAMESPACE.to_string());
        }
        emit_data_class(target, request, out)?;

        let response_fields = flow.response_fields();
        let mut response = DataClass::new(
            &response_name,
            ArtifactKind::AuthResponse,
            ErrorContext::new(flow.name, ArtifactKind::AuthResponse),
            &response_fields,
        );
        response.inheritance.push(format!("I{response_name}"));
        response.usings.push(AUTH_NAMESPACE.to_string());
        emit_data_class(target, response, out)?;
    }
    Ok(())
}

/// The `AuthController` / `AuthClient` surface. Every auth action is a POST.
pub fn auth_surface() -> Surface {
    Surface {
        controller: "Auth".to_string(),
        actions: AUTH_FLOWS
            .iter()
            .map(|flow| Action {
                name: flow.action.to_string(),
                verb: Verb::Post,
                request: flow.request_name(),
                response: flow.response_name(),
                authorization: if flow.anonymous {
                    Authorization::Anonymous
                } else {
                    Authorization::Authenticated
                },
            })
            .collect(),
        usings: vec![AUTH_NAMESPACE.to_string()],
        attributes: vec![],
    }
}
