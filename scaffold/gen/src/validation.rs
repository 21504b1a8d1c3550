//! Pre-generation schema validation.
//!
//! Catches malformed constructs before any emitter runs, so a bad schema
//! fails the pass with one focused error instead of halfway through
//! rendering.
//!
//! ## Validation Checks
//!
//! - **Names**: element, value and field names must be identifiers, not
//!   reserved keywords
//! - **Fields**: no duplicate names within one field group, no name that
//!   collides with another field's backing field; typed fields declare a type
//! - **Keys**: a single-query directive may not declare its own key when the
//!   entity or summary already has one
//! - **Plural names**: required when a collection-query flow is enabled
//! - **Enum ordinals**: auto-sequencing and explicit ordinals are exclusive
//!
//! ## Examples
//!
//! ```
//! use scaffold_define::{CodeGenerator, Entity, RequestDirective};
//! use scaffold_gen::validation::validate_schema;
//!
//! let ok = CodeGenerator::new().with_entity(Entity::new("Country"));
//! assert!(validate_schema(&[ok]).is_ok());
//!
//! let missing_plural = CodeGenerator::new()
//!     .with_entity(Entity::new("Country").with_collection_query_request(RequestDirective::new()));
//! assert!(validate_schema(&[missing_plural]).is_err());
//! ```

use std::collections::HashSet;

use scaffold_define::{CodeGenerator, Fields, RequestDirective, validate_identifier};

use crate::artifact::{ArtifactKind, Flow};
use crate::codegen::enums::check_ordinal_mode;
use crate::errors::{ErrorContext, GeneratorError};
use crate::resolver::resolve_type;
use crate::writer::backing_field_name;

/// Validates every schema document of one pass.
///
/// ## Errors
///
/// Returns the first `SchemaError` found, in document order.
pub fn validate_schema(documents: &[CodeGenerator]) -> Result<(), GeneratorError> {
    for document in documents {
        validate_document(document)?;
    }
    Ok(())
}

fn validate_document(document: &CodeGenerator) -> Result<(), GeneratorError> {
    for entity in &document.entities {
        let context = ErrorContext::new(&entity.name, ArtifactKind::Entity);
        check_name(&entity.name, &context)?;
        check_fields(&entity.fields, &context)?;
        check_directive(&entity.generate_entity_handler_request, &entity.name, ArtifactKind::HandlerRequest, Flow::Mutate)?;
        check_directive(&entity.generate_entity_query_request, &entity.name, ArtifactKind::QueryRequest, Flow::SingleQuery)?;
        check_directive(
            &entity.generate_entities_query_request,
            &entity.name,
            ArtifactKind::CollectionQueryRequest,
            Flow::CollectionQuery,
        )?;
        check_key_conflict(&entity.generate_entity_query_request, &entity.fields, &entity.name)?;
        if entity.generate_entities_query_request.is_some() {
            check_plural(entity.plural_name.as_deref(), &entity.name)?;
        }
    }

    for summary in &document.summaries {
        let context = ErrorContext::new(&summary.name, ArtifactKind::Summary);
        check_name(&summary.name, &context)?;
        check_fields(&summary.fields, &context)?;
        check_directive(&summary.generate_summary_query_request, &summary.name, ArtifactKind::QueryRequest, Flow::SingleQuery)?;
        check_directive(
            &summary.generate_summaries_query_request,
            &summary.name,
            ArtifactKind::CollectionQueryRequest,
            Flow::CollectionQuery,
        )?;
        check_key_conflict(&summary.generate_summary_query_request, &summary.fields, &summary.name)?;
        if summary.generate_summaries_query_request.is_some() {
            check_plural(summary.plural_name.as_deref(), &summary.name)?;
        }
    }

    for (messages, kind) in [
        (&document.custom_requests, ArtifactKind::CustomRequest),
        (&document.custom_responses, ArtifactKind::CustomResponse),
    ] {
        for message in messages {
            let context = ErrorContext::new(&message.name, kind);
            check_name(&message.name, &context)?;
            check_fields(&message.fields, &context)?;
        }
    }

    for enumeration in &document.enums {
        let context = ErrorContext::new(&enumeration.name, ArtifactKind::Enum);
        check_name(&enumeration.name, &context)?;
        let mut seen = HashSet::new();
        for value in &enumeration.values {
            check_name(&value.name, &context)?;
            if !seen.insert(value.name.as_str()) {
                return Err(context.error(format!("duplicate value '{}'", value.name)));
            }
        }
        check_ordinal_mode(enumeration, &context)?;
    }

    Ok(())
}

fn check_name(name: &str, context: &ErrorContext) -> Result<(), GeneratorError> {
    validate_identifier(name).map_err(|err| context.error(err.to_string()))
}

fn check_fields(fields: &Fields, context: &ErrorContext) -> Result<(), GeneratorError> {
    let mut seen = HashSet::new();
    for field in fields.iter() {
        check_name(field.name, context)?;
        if !seen.insert(field.name) {
            return Err(context.error(format!("duplicate property '{}'", field.name)));
        }
        resolve_type(&field, context)?;
    }
    for field in fields.iter() {
        let backing = backing_field_name(field.name);
        if seen.contains(backing.as_str()) {
            return Err(context.error(format!(
                "property '{backing}' clashes with the backing field of '{}'",
                field.name
            )));
        }
    }
    Ok(())
}

fn check_directive(
    directive: &Option<RequestDirective>,
    element: &str,
    kind: ArtifactKind,
    flow: Flow,
) -> Result<(), GeneratorError> {
    match directive {
        Some(directive) => check_fields(
            &directive.additional_fields,
            &ErrorContext::new(element, kind).in_flow(flow),
        ),
        None => Ok(()),
    }
}

fn check_key_conflict(
    directive: &Option<RequestDirective>,
    fields: &Fields,
    element: &str,
) -> Result<(), GeneratorError> {
    let declares_key = directive
        .as_ref()
        .is_some_and(|d| d.additional_fields.key_field.is_some());
    match (&fields.key_field, declares_key) {
        (Some(key), true) => Err(ErrorContext::new(element, ArtifactKind::QueryRequest)
            .in_flow(Flow::SingleQuery)
            .error(format!(
                "conflicting key definitions: the request declares its own key while '{element}' has key '{}'",
                key.name
            ))),
        _ => Ok(()),
    }
}

fn check_plural(plural: Option<&str>, element: &str) -> Result<(), GeneratorError> {
    let context = ErrorContext::new(element, ArtifactKind::CollectionQueryRequest).in_flow(Flow::CollectionQuery);
    match plural {
        Some(plural) if !plural.trim().is_empty() => check_name(plural, &context),
        _ => Err(context.error(format!(
            "a plural name is required for the {} flow",
            Flow::CollectionQuery
        ))),
    }
}

#[cfg(test)]
mod tests {
    use scaffold_define::{
        CollectionField, CustomMessage, EnumEntity, EnumValue, Entity, KeyField, KeyType,
        StringField, Summary,
    };

    use super::*;
    use crate::test_utils::country;

    fn validate(document: CodeGenerator) -> Result<(), GeneratorError> {
        validate_schema(&[document])
    }

    #[test]
    fn country_document_is_valid() {
        assert!(validate(CodeGenerator::new().with_entity(country())).is_ok());
    }

    #[test]
    fn element_names_must_be_identifiers() {
        let err = validate(CodeGenerator::new().with_entity(Entity::new("Country Name"))).unwrap_err();
        assert!(err.to_string().contains("not a valid identifier"));

        let err = validate(CodeGenerator::new().with_custom_request(CustomMessage::new(""))).unwrap_err();
        assert!(err.to_string().contains("name must not be empty"));
    }

    #[test]
    fn keywords_are_not_names() {
        let err = validate(CodeGenerator::new().with_entity(Entity::new("class"))).unwrap_err();
        assert!(err.to_string().contains("'class' is not a valid identifier: is a reserved keyword"));

        let entity = Entity::new("Country").with_fields(Fields::new().with_string(StringField::new("string")));
        let err = validate(CodeGenerator::new().with_entity(entity)).unwrap_err();
        assert!(err.to_string().contains("'string' is not a valid identifier"));

        let err = validate(CodeGenerator::new().with_enum(EnumEntity::auto_sequenced("Grade").with_value(EnumValue::new("default"))))
            .unwrap_err();
        assert!(err.to_string().contains("reserved keyword"));
    }

    #[test]
    fn names_differing_by_first_letter_case_clash() {
        let entity = Entity::new("Country").with_fields(
            Fields::new()
                .with_string(StringField::new("Name"))
                .with_string(StringField::new("name")),
        );
        let err = validate(CodeGenerator::new().with_entity(entity)).unwrap_err();
        assert!(err.to_string().contains("property 'name' clashes with the backing field of 'Name'"));

        let lowercase_only = Entity::new("Country").with_fields(Fields::new().with_string(StringField::new("name")));
        assert!(validate(CodeGenerator::new().with_entity(lowercase_only)).is_ok());
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let entity = Entity::new("Country").with_fields(
            Fields::new()
                .with_string(StringField::new("Name"))
                .with_string(StringField::new("Name")),
        );
        let err = validate(CodeGenerator::new().with_entity(entity)).unwrap_err();
        assert!(err.to_string().contains("duplicate property 'Name'"));
    }

    #[test]
    fn typed_field_needs_a_type() {
        let entity = Entity::new("Country")
            .with_fields(Fields::new().with_collection(CollectionField::new("Tags", " ")));
        let err = validate(CodeGenerator::new().with_entity(entity)).unwrap_err();
        assert!(err.to_string().contains("does not declare a type"));
    }

    #[test]
    fn query_key_conflict_is_reported_before_emission() {
        let mut entity = country();
        entity.generate_entity_query_request = Some(
            RequestDirective::new().with_fields(Fields::new().with_key(KeyField::new("Id", KeyType::Int))),
        );
        let err = validate(CodeGenerator::new().with_entity(entity)).unwrap_err();
        assert!(err.to_string().contains("conflicting key definitions"));
        assert!(err.to_string().contains("flow: single-query"));
    }

    #[test]
    fn summary_collection_flow_needs_plural() {
        let mut summary = Summary::new("CountrySummary");
        summary.generate_summaries_query_request = Some(RequestDirective::new());
        let err = validate(CodeGenerator::new().with_summary(summary)).unwrap_err();
        assert!(err.to_string().contains("plural name is required"));
    }

    #[test]
    fn enum_values_are_checked() {
        let duplicate = EnumEntity::auto_sequenced("Grade")
            .with_value(EnumValue::new("A"))
            .with_value(EnumValue::new("A"));
        let err = validate(CodeGenerator::new().with_enum(duplicate)).unwrap_err();
        assert!(err.to_string().contains("duplicate value 'A'"));

        let mixed = EnumEntity::new("Grade").with_value(EnumValue::new("A"));
        assert!(validate(CodeGenerator::new().with_enum(mixed)).is_err());
    }

    #[test]
    fn first_failing_document_wins() {
        let good = CodeGenerator::new().with_entity(country());
        let bad = CodeGenerator::new().with_entity(Entity::new("1Bad"));
        let err = validate_schema(&[good, bad]).unwrap_err();
        assert!(err.to_string().contains("'1Bad'"));
    }
}
