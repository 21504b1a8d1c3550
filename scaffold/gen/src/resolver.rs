//! Field type resolution and collection wrapping.
//!
//! [`resolve_type`] maps a field to its target type name. Collection kinds
//! resolve to their element type; wrapping happens in [`resolve_property`]
//! using the platform's [`CollectionPolicy`], never a per-field choice.

use scaffold_define::{FieldKind, FieldRef};

use crate::errors::{ErrorContext, GeneratorError};
use crate::writer::Property;

/// How collection fields are wrapped on a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPolicy {
    /// `IList<T>` defaulted to `new List<T>()`.
    List,
    /// `ObservableCollection<T>` defaulted to `new ObservableCollection<T>()`.
    Observable,
}

impl CollectionPolicy {
    /// The declared collection type for `element`.
    ///
    /// ```
    /// use scaffold_gen::resolver::CollectionPolicy;
    ///
    /// assert_eq!(CollectionPolicy::List.wrap("City"), "IList<City>");
    /// assert_eq!(CollectionPolicy::Observable.wrap("City"), "ObservableCollection<City>");
    /// ```
    pub fn wrap(self, element: &str) -> String {
        match self {
            CollectionPolicy::List => format!("IList<{element}>"),
            CollectionPolicy::Observable => format!("ObservableCollection<{element}>"),
        }
    }

    /// The eager empty default for a collection of `element`.
    pub fn empty(self, element: &str) -> String {
        match self {
            CollectionPolicy::List => format!("new List<{element}>()"),
            CollectionPolicy::Observable => format!("new ObservableCollection<{element}>()"),
        }
    }

    /// Namespace declaring the wrapper type.
    pub fn namespace(self) -> &'static str {
        match self {
            CollectionPolicy::List => "System.Collections.Generic",
            CollectionPolicy::Observable => "System.Collections.ObjectModel",
        }
    }
}

/// Returns the target type name of `field`.
///
/// ## Errors
///
/// Returns a `SchemaError` when a key field has no key type or a typed
/// field (collection, summary, enum, entity) declares an empty type.
pub fn resolve_type(field: &FieldRef<'_>, ctx: &ErrorContext) -> Result<String, GeneratorError> {
    let fixed = match field.kind {
        FieldKind::Key => {
            let key_type = field
                .key_type
                .ok_or_else(|| ctx.error(format!("key field '{}' has no key type", field.name)))?;
            return Ok(key_type.type_name().to_string());
        }
        FieldKind::Guid => "Guid",
        FieldKind::String => "string",
        FieldKind::Bool => "bool",
        FieldKind::DateTime => "DateTime",
        FieldKind::DateTimeOffset => "DateTimeOffset",
        FieldKind::Decimal => "decimal",
        FieldKind::Int => "int",
        FieldKind::Collection
        | FieldKind::EntityCollection
        | FieldKind::Summary
        | FieldKind::Enum
        | FieldKind::Entity => {
            return match field.declared_type.map(str::trim) {
                Some(ty) if !ty.is_empty() => Ok(ty.to_string()),
                _ => Err(ctx.error(format!(
                    "{} field '{}' does not declare a type",
                    field.kind, field.name
                ))),
            };
        }
    };
    Ok(fixed.to_string())
}

/// Resolves `field` into a property, wrapping collections per `policy`.
pub fn resolve_property(
    field: &FieldRef<'_>,
    policy: CollectionPolicy,
    ctx: &ErrorContext,
) -> Result<Property, GeneratorError> {
    let ty = resolve_type(field, ctx)?;
    let property = if field.kind.is_collection() {
        Property::new(policy.wrap(&ty), field.name).initialized(policy.empty(&ty))
    } else {
        Property::new(ty, field.name)
    };
    Ok(property.with_attributes(field.custom_attributes))
}

#[cfg(test)]
mod tests {
    use scaffold_define::{
        CollectionField, Fields, KeyField, KeyType, ScalarField, StringField, TypedField,
    };

    use super::*;
    use crate::artifact::ArtifactKind;

    fn ctx() -> ErrorContext {
        ErrorContext::new("Country", ArtifactKind::Entity)
    }

    fn types_of(fields: &Fields) -> Vec<String> {
        fields.iter().map(|f| resolve_type(&f, &ctx()).unwrap()).collect()
    }

    #[test]
    fn scalar_kinds_map_to_fixed_types() {
        let mut fields = Fields::new();
        fields.guid_fields.push(ScalarField::new("A"));
        fields.string_fields.push(StringField::new("B"));
        fields.bool_fields.push(ScalarField::new("C"));
        fields.date_time_fields.push(ScalarField::new("D"));
        fields.date_time_offset_fields.push(ScalarField::new("E"));
        fields.decimal_fields.push(ScalarField::new("F"));
        fields.int_fields.push(ScalarField::new("G"));

        assert_eq!(
            types_of(&fields),
            vec!["Guid", "string", "bool", "DateTime", "DateTimeOffset", "decimal", "int"]
        );
    }

    #[test]
    fn key_follows_key_type() {
        let guid = Fields::new().with_key(KeyField::new("Id", KeyType::Guid));
        let int = Fields::new().with_key(KeyField::new("Id", KeyType::Int));
        assert_eq!(types_of(&guid), vec!["Guid"]);
        assert_eq!(types_of(&int), vec!["int"]);
    }

    #[test]
    fn typed_kinds_pass_declared_type_through() {
        let mut fields = Fields::new()
            .with_entity(TypedField::new("Capital", "City"))
            .with_enum(TypedField::new("Status", "CountryStatus"))
            .with_collection(CollectionField::new("Tags", "string"));
        fields.summary_fields.push(TypedField::new("Region", "RegionSummary"));

        assert_eq!(types_of(&fields), vec!["string", "RegionSummary", "CountryStatus", "City"]);
    }

    #[test]
    fn empty_declared_type_is_schema_error() {
        let fields = Fields::new().with_entity(TypedField::new("Capital", " "));
        let field = fields.iter().next().unwrap();
        let err = resolve_type(&field, &ctx()).unwrap_err();
        assert!(err.to_string().contains("entity field 'Capital' does not declare a type"));
    }

    #[test]
    fn collections_are_wrapped_by_policy_not_field() {
        let fields = Fields::new().with_entity_collection(CollectionField::new("Cities", "City"));
        let field = fields.iter().next().unwrap();

        let plain = resolve_property(&field, CollectionPolicy::List, &ctx()).unwrap();
        assert_eq!(plain.ty, "IList<City>");
        assert_eq!(plain.initializer.as_deref(), Some("new List<City>()"));

        let observable = resolve_property(&field, CollectionPolicy::Observable, &ctx()).unwrap();
        assert_eq!(observable.ty, "ObservableCollection<City>");
        assert_eq!(
            observable.initializer.as_deref(),
            Some("new ObservableCollection<City>()")
        );
    }

    #[test]
    fn custom_attributes_are_carried_onto_property() {
        let mut name = StringField::new("Name");
        name.custom_attributes.push("JsonPropertyName(\"name\")".to_string());
        let fields = Fields::new().with_string(name);
        let field = fields.iter().next().unwrap();

        let property = resolve_property(&field, CollectionPolicy::List, &ctx()).unwrap();
        assert_eq!(property.attributes, vec!["JsonPropertyName(\"name\")".to_string()]);
        assert!(property.initializer.is_none());
    }
}
