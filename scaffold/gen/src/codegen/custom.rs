//! Custom requests and responses.
//!
//! A custom request `<Name>Request` implements `IEndpointRequest` and becomes
//! dispatchable to `<Name>Response` only when it opts in with
//! `include_command_interface` on the backend.

use scaffold_define::CustomMessage;

use super::{DISPATCH_NAMESPACE, DataClass, RenderTarget, emit_data_class, emitted_key};
use crate::artifact::{ArtifactKind, ArtifactSet};
use crate::capability::Capability;
use crate::errors::{ErrorContext, GeneratorError};
use crate::naming::{custom_request_name, custom_response_name};

pub fn emit_custom_request(
    request: &CustomMessage,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    if !request.location.includes(target.platform()) {
        return Ok(());
    }

    let mut class = custom_class(request, custom_request_name(&request.name), ArtifactKind::CustomRequest);
    class.inheritance.insert(0, "IEndpointRequest".to_string());
    if request.include_command_interface {
        if let Some(dispatch) = target.dispatch_interface(&custom_response_name(&request.name)) {
            class.inheritance.push(dispatch);
            class.usings.push(DISPATCH_NAMESPACE.to_string());
        }
    }
    append_key_capability(&mut class, request, target);

    emit_data_class(target, class, out)
}

pub fn emit_custom_response(
    response: &CustomMessage,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    if !response.location.includes(target.platform()) {
        return Ok(());
    }

    let mut class = custom_class(response, custom_response_name(&response.name), ArtifactKind::CustomResponse);
    class.inheritance.insert(0, "IEndpointResponse".to_string());
    append_key_capability(&mut class, response, target);

    emit_data_class(target, class, out)
}

fn custom_class(message: &CustomMessage, name: String, kind: ArtifactKind) -> DataClass<'_> {
    let mut class = DataClass::new(name, kind, ErrorContext::new(&message.name, kind), &message.fields);
    class.usings = message.additional_usings.clone();
    class.attributes = &message.custom_attributes;
    class
}

// Key accessors are rendered for any keyed field group, so the interface must follow.
fn append_key_capability(class: &mut DataClass<'_>, message: &CustomMessage, target: &RenderTarget<'_>) {
    if let Some(key_type) = emitted_key(&message.fields, target.platform()) {
        class.inheritance.push(Capability::key(key_type).to_string());
    }
}
