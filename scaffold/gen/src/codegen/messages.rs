//! Request/response messages for the mutate, single-query and
//! collection-query flows of entities and summaries.
//!
//! Backend requests implement `IRequest<Response>` so the dispatcher can
//! route them; frontend requests never do.

use scaffold_define::{Entity, Fields, Location, RequestDirective, Summary};

use super::{
    CarriedValue, DISPATCH_NAMESPACE, DataClass, RenderTarget, emit_data_class, emitted_key,
};
use crate::artifact::{ArtifactKind, ArtifactSet, Flow};
use crate::capability::Capability;
use crate::errors::{ErrorContext, GeneratorError};
use crate::naming::{
    collection_query_request_name, collection_query_response_name, handler_request_name,
    handler_response_name, query_request_name, query_response_name,
};
use crate::writer::Property;

/// Which family of marker interfaces a subject uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Entity,
    Summary,
}

impl Family {
    fn single_request(self) -> &'static str {
        match self {
            Family::Entity => "IEntityQueryRequest",
            Family::Summary => "ISummaryQueryRequest",
        }
    }

    fn single_response(self, subject: &str) -> String {
        match self {
            Family::Entity => format!("IEntityQueryResponse<{subject}>"),
            Family::Summary => format!("ISummaryQueryResponse<{subject}>"),
        }
    }

    fn collection_request(self) -> &'static str {
        match self {
            Family::Entity => "IEntitiesQueryRequest",
            Family::Summary => "ISummariesQueryRequest",
        }
    }

    fn collection_response(self, subject: &str, collection: &str) -> String {
        match self {
            Family::Entity => format!("IEntitiesQueryResponse<{subject}, {collection}>"),
            Family::Summary => format!("ISummariesQueryResponse<{subject}, {collection}>"),
        }
    }

    /// Name of the property carrying one value.
    fn single_property(self) -> &'static str {
        match self {
            Family::Entity => "Entity",
            Family::Summary => "Summary",
        }
    }

    /// Name of the property carrying the collection.
    fn collection_property(self) -> &'static str {
        match self {
            Family::Entity => "Entities",
            Family::Summary => "Summaries",
        }
    }
}

/// The parts of an entity or summary the flows depend on.
struct Subject<'a> {
    family: Family,
    name: &'a str,
    plural_name: Option<&'a str>,
    location: Location,
    fields: &'a Fields,
}

/// Emits every enabled flow of `entity` for the target platform.
pub fn emit_entity_flows(
    entity: &Entity,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let subject = Subject {
        family: Family::Entity,
        name: &entity.name,
        plural_name: entity.plural_name.as_deref(),
        location: entity.location,
        fields: &entity.fields,
    };
    if !subject.location.includes(target.platform()) {
        return Ok(());
    }

    if let Some(directive) = &entity.generate_entity_handler_request {
        emit_mutate_flow(&subject, directive, target, out)?;
    }
    if let Some(directive) = &entity.generate_entity_query_request {
        emit_single_query_flow(&subject, directive, target, out)?;
    }
    if let Some(directive) = &entity.generate_entities_query_request {
        emit_collection_query_flow(&subject, directive, target, out)?;
    }
    Ok(())
}

/// Emits the query flows of `summary` for the target platform.
pub fn emit_summary_flows(
    summary: &Summary,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let subject = Subject {
        family: Family::Summary,
        name: &summary.name,
        plural_name: summary.plural_name.as_deref(),
        location: summary.location,
        fields: &summary.fields,
    };
    if !subject.location.includes(target.platform()) {
        return Ok(());
    }

    if let Some(directive) = &summary.generate_summary_query_request {
        emit_single_query_flow(&subject, directive, target, out)?;
    }
    if let Some(directive) = &summary.generate_summaries_query_request {
        emit_collection_query_flow(&subject, directive, target, out)?;
    }
    Ok(())
}

fn message<'a>(
    name: String,
    kind: ArtifactKind,
    context: ErrorContext,
    directive: &'a RequestDirective,
    fields: &'a Fields,
) -> DataClass<'a> {
    let mut class = DataClass::new(name, kind, context, fields);
    class.usings = directive.additional_usings.clone();
    class.attributes = &directive.custom_attributes;
    class
}

/// Adds the dispatch capability, if the platform has one.
fn make_dispatchable(class: &mut DataClass<'_>, target: &RenderTarget<'_>, response: &str) {
    if let Some(dispatch) = target.dispatch_interface(response) {
        class.inheritance.push(dispatch);
        class.usings.push(DISPATCH_NAMESPACE.to_string());
    }
}

fn emit_mutate_flow(
    subject: &Subject<'_>,
    directive: &RequestDirective,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let request_name = handler_request_name(subject.name);
    let response_name = handler_response_name(subject.name);
    let carried = subject.family.single_property();

    let mut request = message(
        request_name,
        ArtifactKind::HandlerRequest,
        ErrorContext::new(subject.name, ArtifactKind::HandlerRequest).in_flow(Flow::Mutate),
        directive,
        &directive.additional_fields,
    );
    request.inheritance.push(format!("IEntityHandlerRequest<{}>", subject.name));
    make_dispatchable(&mut request, target, &response_name);
    request.leading.push(CarriedValue::validated(subject.name, carried));
    emit_data_class(target, request, out)?;

    let empty = Fields::new();
    let mut response = DataClass::new(
        response_name,
        ArtifactKind::HandlerResponse,
        ErrorContext::new(subject.name, ArtifactKind::HandlerResponse).in_flow(Flow::Mutate),
        &empty,
    );
    response.inheritance.push(format!("IEntityHandlerResponse<{}>", subject.name));
    response.leading.push(CarriedValue::validated(subject.name, carried));
    emit_data_class(target, response, out)
}

fn emit_single_query_flow(
    subject: &Subject<'_>,
    directive: &RequestDirective,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let request_name = query_request_name(subject.name);
    let response_name = query_response_name(subject.name);
    let request_context =
        ErrorContext::new(subject.name, ArtifactKind::QueryRequest).in_flow(Flow::SingleQuery);

    let mut fields = directive.additional_fields.clone();
    if let Some(key) = &subject.fields.key_field {
        if fields.key_field.is_some() {
            return Err(request_context.error(format!(
                "conflicting key definitions: the request declares its own key while '{}' has key '{}'",
                subject.name, key.name
            )));
        }
        fields.key_field = Some(key.clone());
    }

    let mut request = message(
        request_name,
        ArtifactKind::QueryRequest,
        request_context,
        directive,
        &fields,
    );
    request.inheritance.push(subject.family.single_request().to_string());
    if let Some(key_type) = emitted_key(&fields, target.platform()) {
        request.inheritance.push(Capability::key(key_type).to_string());
    }
    make_dispatchable(&mut request, target, &response_name);
    emit_data_class(target, request, out)?;

    let empty = Fields::new();
    let mut response = DataClass::new(
        response_name,
        ArtifactKind::QueryResponse,
        ErrorContext::new(subject.name, ArtifactKind::QueryResponse).in_flow(Flow::SingleQuery),
        &empty,
    );
    response.inheritance.push(subject.family.single_response(subject.name));
    response
        .leading
        .push(CarriedValue::validated(subject.name, subject.family.single_property()));
    emit_data_class(target, response, out)
}

fn emit_collection_query_flow(
    subject: &Subject<'_>,
    directive: &RequestDirective,
    target: &RenderTarget<'_>,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let request_context = ErrorContext::new(subject.name, ArtifactKind::CollectionQueryRequest)
        .in_flow(Flow::CollectionQuery);
    let plural = subject
        .plural_name
        .filter(|plural| !plural.trim().is_empty())
        .ok_or_else(|| {
            request_context.error(format!(
                "a plural name is required for the {} flow",
                Flow::CollectionQuery
            ))
        })?;
    let request_name = collection_query_request_name(plural);
    let response_name = collection_query_response_name(plural);

    let mut request = message(
        request_name,
        ArtifactKind::CollectionQueryRequest,
        request_context,
        directive,
        &directive.additional_fields,
    );
    request.inheritance.push(subject.family.collection_request().to_string());
    make_dispatchable(&mut request, target, &response_name);
    emit_data_class(target, request, out)?;

    let collections = target.policy.collections;
    let collection_type = collections.wrap(subject.name);
    let empty = Fields::new();
    let mut response = DataClass::new(
        response_name,
        ArtifactKind::CollectionQueryResponse,
        ErrorContext::new(subject.name, ArtifactKind::CollectionQueryResponse)
            .in_flow(Flow::CollectionQuery),
        &empty,
    );
    response
        .inheritance
        .push(subject.family.collection_response(subject.name, &collection_type));
    response.leading.push(CarriedValue::plain(
        Property::new(collection_type, subject.family.collection_property())
            .initialized(collections.empty(subject.name)),
    ));
    emit_data_class(target, response, out)
}

#[cfg(test)]
mod tests {
    use scaffold_define::{KeyField, KeyType, Platform, ScalarField, StringField};

    use super::*;
    use crate::test_utils::{backend_entities, country, frontend_entities};

    fn emit(entity: &Entity, platform: Platform) -> Result<ArtifactSet, GeneratorError> {
        let settings = match platform {
            Platform::Backend => backend_entities(),
            Platform::Frontend => frontend_entities(),
        };
        let target = RenderTarget::for_entities(platform, &settings);
        let mut out = ArtifactSet::new();
        emit_entity_flows(entity, &target, &mut out)?;
        Ok(out)
    }

    fn content<'a>(out: &'a ArtifactSet, platform: Platform, name: &str) -> &'a str {
        &out.get(platform, name).unwrap().content
    }

    #[test]
    fn mutate_flow_carries_validated_entity() {
        let out = emit(&country(), Platform::Backend).unwrap();
        let request = content(&out, Platform::Backend, "CountryHandlerRequest");
        let response = content(&out, Platform::Backend, "CountryHandlerResponse");

        assert!(request.contains(
            "CountryHandlerRequest : IEntityHandlerRequest<Country>, IRequest<CountryHandlerResponse>"
        ));
        assert!(request.contains("using MediatR;"));
        assert!(request.contains("public Country Entity { get; set; }"));
        assert!(response.contains("CountryHandlerResponse : IEntityHandlerResponse<Country>\n"));

        let validator = content(&out, Platform::Backend, "CountryHandlerRequestValidator");
        assert!(validator.contains("this.RuleFor(x => x.Entity).NotNull().NotEmpty();"));
        assert!(validator.contains("SetValidator(new CountryValidator())"));
    }

    #[test]
    fn frontend_requests_are_not_dispatchable() {
        let out = emit(&country(), Platform::Frontend).unwrap();
        let request = content(&out, Platform::Frontend, "CountryHandlerRequest");
        assert!(!request.contains("IRequest<"));
        assert!(!request.contains("MediatR"));
    }

    #[test]
    fn single_query_copies_entity_key() {
        let out = emit(&country(), Platform::Backend).unwrap();
        let request = content(&out, Platform::Backend, "CountryQueryRequest");

        assert!(request.contains(
            "CountryQueryRequest : IEntityQueryRequest, IHasGuidKey, IRequest<CountryQueryResponse>"
        ));
        assert!(request.contains("public Guid CountryId { get; set; }"));
        assert!(request.contains("public Guid GetKey()"));

        let response = content(&out, Platform::Backend, "CountryQueryResponse");
        assert!(response.contains("CountryQueryResponse : IEntityQueryResponse<Country>"));
        assert!(response.contains("public Country Entity { get; set; }"));
    }

    #[test]
    fn single_query_with_its_own_key_conflicts() {
        let mut entity = country();
        entity.generate_entity_query_request = Some(
            RequestDirective::new()
                .with_fields(Fields::new().with_key(KeyField::new("Id", KeyType::Int))),
        );

        let err = emit(&entity, Platform::Backend).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'Country' (artifact: query-request, flow: single-query)"));
        assert!(message.contains("conflicting key definitions"));
    }

    #[test]
    fn collection_query_uses_its_own_directive() {
        let mut entity = country();
        let mut filter = RequestDirective::new()
            .with_fields(Fields::new().with_string(StringField::new("Search")));
        filter.additional_usings.push("Shop.Filters".to_string());
        entity.generate_entities_query_request = Some(filter);
        entity.generate_entity_query_request = Some(
            RequestDirective::new().with_fields(Fields::new().with_int(ScalarField::new("Depth"))),
        );

        let out = emit(&entity, Platform::Backend).unwrap();
        let request = content(&out, Platform::Backend, "CountriesQueryRequest");
        assert!(request.contains("CountriesQueryRequest : IEntitiesQueryRequest, IRequest<CountriesQueryResponse>"));
        assert!(request.contains("public string Search { get; set; }"));
        assert!(request.contains("using Shop.Filters;"));
        assert!(!request.contains("Depth"));
        assert!(!request.contains("CountryId"));

        let response = content(&out, Platform::Backend, "CountriesQueryResponse");
        assert!(response.contains("IEntitiesQueryResponse<Country, IList<Country>>"));
        assert!(response.contains("public IList<Country> Entities { get; set; } = new List<Country>();"));
    }

    #[test]
    fn collection_query_without_plural_is_schema_error() {
        let mut entity = country();
        entity.plural_name = None;
        entity.generate_entities_query_request = Some(RequestDirective::new());

        let err = emit(&entity, Platform::Backend).unwrap_err();
        assert!(err.to_string().contains("plural name is required"));
    }

    #[test]
    fn summary_flows_use_summary_interfaces() {
        let mut summary = Summary::new("CountrySummary")
            .plural("CountrySummaries")
            .with_fields(Fields::new().with_key(KeyField::new("CountryId", KeyType::Int)));
        summary.generate_summary_query_request = Some(RequestDirective::new());
        summary.generate_summaries_query_request = Some(RequestDirective::new());

        let settings = frontend_entities();
        let target = RenderTarget::for_entities(Platform::Frontend, &settings);
        let mut out = ArtifactSet::new();
        emit_summary_flows(&summary, &target, &mut out).unwrap();

        let request = content(&out, Platform::Frontend, "CountrySummaryQueryRequest");
        assert!(request.contains("CountrySummaryQueryRequest : ISummaryQueryRequest, IHasIntegerKey"));
        assert!(!request.contains("IRequest<"));
        let response = content(&out, Platform::Frontend, "CountrySummaryQueryResponse");
        assert!(response.contains("ISummaryQueryResponse<CountrySummary>"));
        assert!(response.contains("CountrySummary Summary"));
        let collection = content(&out, Platform::Frontend, "CountrySummariesQueryResponse");
        assert!(collection.contains(
            "ISummariesQueryResponse<CountrySummary, ObservableCollection<CountrySummary>>"
        ));
    }
}
