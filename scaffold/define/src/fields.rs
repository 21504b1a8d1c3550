//! Field definitions.
//!
//! A [`Fields`] group holds at most one [`KeyField`] plus one ordered list per
//! field kind. Emission order is fixed by [`FieldKind`] rather than by the
//! order in which lists appear in a schema document, so two documents that
//! declare the same fields always render identically.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::types::{KeyType, Location};

/// Kind of a field, in emission order.
///
/// Iterating with [`strum::IntoEnumIterator`] yields the kinds in the exact
/// order their properties are emitted.
///
/// ## Examples
///
/// ```
/// use scaffold_define::FieldKind;
/// use strum::IntoEnumIterator;
///
/// let order: Vec<_> = FieldKind::iter().collect();
/// assert_eq!(order.first(), Some(&FieldKind::Key));
/// assert_eq!(order.last(), Some(&FieldKind::Entity));
/// assert_eq!(FieldKind::EntityCollection.to_string(), "entity-collection");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum FieldKind {
    Key,
    Guid,
    String,
    Bool,
    DateTime,
    DateTimeOffset,
    Decimal,
    Int,
    Collection,
    EntityCollection,
    Summary,
    Enum,
    Entity,
}

impl FieldKind {
    /// Returns `true` for kinds whose type comes from the schema (`type:`).
    pub fn is_typed(self) -> bool {
        matches!(
            self,
            FieldKind::Collection
                | FieldKind::EntityCollection
                | FieldKind::Summary
                | FieldKind::Enum
                | FieldKind::Entity
        )
    }

    /// Returns `true` for kinds rendered as a wrapped collection.
    pub fn is_collection(self) -> bool {
        matches!(self, FieldKind::Collection | FieldKind::EntityCollection)
    }
}

/// The single key field of a [`Fields`] group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyField {
    pub name: String,
    pub key_type: KeyType,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub custom_attributes: Vec<String>,
}

impl KeyField {
    /// Creates a key field available on both platforms.
    pub fn new(name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            name: name.into(),
            key_type,
            location: Location::Both,
            custom_attributes: vec![],
        }
    }
}

/// A field of fixed scalar type (Guid, Bool, DateTime, DateTimeOffset,
/// Decimal or Int).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarField {
    pub name: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub custom_attributes: Vec<String>,
}

impl ScalarField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Location::Both,
            is_required: false,
            custom_attributes: vec![],
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// A string field, optionally length-bounded.
///
/// A `max_length` of `0` means unbounded.
///
/// ## Examples
///
/// ```
/// use scaffold_define::StringField;
///
/// let name = StringField::new("Name").required().max_length(100);
/// assert!(name.is_required);
/// assert_eq!(name.max_length, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringField {
    pub name: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub max_length: u32,
    #[serde(default)]
    pub custom_attributes: Vec<String>,
}

impl StringField {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: Location::Both,
            is_required: false,
            max_length: 0,
            custom_attributes: vec![],
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// A collection field (`collection_fields` or `entity_collection_fields`).
///
/// `type` names the element type; wrapping into a concrete collection type
/// is decided per platform at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub custom_attributes: Vec<String>,
}

impl CollectionField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            location: Location::Both,
            custom_attributes: vec![],
        }
    }
}

/// A field whose type is a schema-declared summary, enum or entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub custom_attributes: Vec<String>,
}

impl TypedField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            location: Location::Both,
            is_required: false,
            custom_attributes: vec![],
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// A borrowed, kind-agnostic view of one field.
///
/// Produced by [`Fields::iter`]; emitters work exclusively on this view so
/// that every field kind flows through the same rendering path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRef<'a> {
    pub kind: FieldKind,
    pub name: &'a str,
    pub location: Location,
    pub is_required: bool,
    pub max_length: u32,
    /// Declared type for typed kinds, `None` otherwise.
    pub declared_type: Option<&'a str>,
    /// Key type for the key field, `None` otherwise.
    pub key_type: Option<KeyType>,
    pub custom_attributes: &'a [String],
}

fn scalars(kind: FieldKind, list: &[ScalarField]) -> impl Iterator<Item = FieldRef<'_>> {
    list.iter().map(move |field| FieldRef::scalar(kind, field))
}

impl<'a> FieldRef<'a> {
    fn scalar(kind: FieldKind, field: &'a ScalarField) -> Self {
        Self {
            kind,
            name: &field.name,
            location: field.location,
            is_required: field.is_required,
            max_length: 0,
            declared_type: None,
            key_type: None,
            custom_attributes: &field.custom_attributes,
        }
    }

    fn collection(kind: FieldKind, field: &'a CollectionField) -> Self {
        Self {
            kind,
            name: &field.name,
            location: field.location,
            is_required: false,
            max_length: 0,
            declared_type: Some(&field.ty),
            key_type: None,
            custom_attributes: &field.custom_attributes,
        }
    }

    fn typed(kind: FieldKind, field: &'a TypedField) -> Self {
        Self {
            kind,
            name: &field.name,
            location: field.location,
            is_required: field.is_required,
            max_length: 0,
            declared_type: Some(&field.ty),
            key_type: None,
            custom_attributes: &field.custom_attributes,
        }
    }
}

/// A group of fields.
///
/// ## Examples
///
/// ```
/// use scaffold_define::{Fields, FieldKind, KeyField, KeyType, StringField};
///
/// let fields = Fields::new()
///     .with_key(KeyField::new("CountryId", KeyType::Guid))
///     .with_string(StringField::new("Name").required().max_length(100));
///
/// let kinds: Vec<_> = fields.iter().map(|f| f.kind).collect();
/// assert_eq!(kinds, vec![FieldKind::Key, FieldKind::String]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Fields {
    pub key_field: Option<KeyField>,
    pub guid_fields: Vec<ScalarField>,
    pub string_fields: Vec<StringField>,
    pub bool_fields: Vec<ScalarField>,
    pub date_time_fields: Vec<ScalarField>,
    pub date_time_offset_fields: Vec<ScalarField>,
    pub decimal_fields: Vec<ScalarField>,
    pub int_fields: Vec<ScalarField>,
    pub collection_fields: Vec<CollectionField>,
    pub entity_collection_fields: Vec<CollectionField>,
    pub summary_fields: Vec<TypedField>,
    pub enum_fields: Vec<TypedField>,
    pub entity_fields: Vec<TypedField>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: KeyField) -> Self {
        self.key_field = Some(key);
        self
    }

    pub fn with_string(mut self, field: StringField) -> Self {
        self.string_fields.push(field);
        self
    }

    pub fn with_int(mut self, field: ScalarField) -> Self {
        self.int_fields.push(field);
        self
    }

    pub fn with_bool(mut self, field: ScalarField) -> Self {
        self.bool_fields.push(field);
        self
    }

    pub fn with_collection(mut self, field: CollectionField) -> Self {
        self.collection_fields.push(field);
        self
    }

    pub fn with_entity_collection(mut self, field: CollectionField) -> Self {
        self.entity_collection_fields.push(field);
        self
    }

    pub fn with_entity(mut self, field: TypedField) -> Self {
        self.entity_fields.push(field);
        self
    }

    pub fn with_enum(mut self, field: TypedField) -> Self {
        self.enum_fields.push(field);
        self
    }

    /// Returns `true` when the group declares no field at all.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterates every field in emission order (see [`FieldKind`]).
    pub fn iter(&self) -> impl Iterator<Item = FieldRef<'_>> {
        let key = self.key_field.iter().map(|key| FieldRef {
            kind: FieldKind::Key,
            name: &key.name,
            location: key.location,
            is_required: false,
            max_length: 0,
            declared_type: None,
            key_type: Some(key.key_type),
            custom_attributes: &key.custom_attributes,
        });

        let strings = self.string_fields.iter().map(|field| FieldRef {
            kind: FieldKind::String,
            name: &field.name,
            location: field.location,
            is_required: field.is_required,
            max_length: field.max_length,
            declared_type: None,
            key_type: None,
            custom_attributes: &field.custom_attributes,
        });

        key.chain(scalars(FieldKind::Guid, &self.guid_fields))
            .chain(strings)
            .chain(scalars(FieldKind::Bool, &self.bool_fields))
            .chain(scalars(FieldKind::DateTime, &self.date_time_fields))
            .chain(scalars(FieldKind::DateTimeOffset, &self.date_time_offset_fields))
            .chain(scalars(FieldKind::Decimal, &self.decimal_fields))
            .chain(scalars(FieldKind::Int, &self.int_fields))
            .chain(
                self.collection_fields
                    .iter()
                    .map(|f| FieldRef::collection(FieldKind::Collection, f)),
            )
            .chain(
                self.entity_collection_fields
                    .iter()
                    .map(|f| FieldRef::collection(FieldKind::EntityCollection, f)),
            )
            .chain(self.summary_fields.iter().map(|f| FieldRef::typed(FieldKind::Summary, f)))
            .chain(self.enum_fields.iter().map(|f| FieldRef::typed(FieldKind::Enum, f)))
            .chain(self.entity_fields.iter().map(|f| FieldRef::typed(FieldKind::Entity, f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_follows_fixed_kind_order_not_declaration_order() {
        let mut fields = Fields::new();
        fields.entity_fields.push(TypedField::new("Capital", "City"));
        fields.int_fields.push(ScalarField::new("Population"));
        fields.guid_fields.push(ScalarField::new("RegionId"));
        fields.key_field = Some(KeyField::new("CountryId", KeyType::Int));
        fields.string_fields.push(StringField::new("Name"));

        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["CountryId", "RegionId", "Name", "Population", "Capital"]);
    }

    #[test]
    fn typed_fields_expose_declared_type() {
        let fields = Fields::new()
            .with_entity_collection(CollectionField::new("Cities", "City"))
            .with_enum(TypedField::new("Status", "CountryStatus"));

        let views: Vec<_> = fields.iter().collect();
        assert_eq!(views[0].kind, FieldKind::EntityCollection);
        assert_eq!(views[0].declared_type, Some("City"));
        assert_eq!(views[1].declared_type, Some("CountryStatus"));
    }

    #[test]
    fn empty_group_is_empty() {
        assert!(Fields::new().is_empty());
        assert!(!Fields::new().with_bool(ScalarField::new("Active")).is_empty());
    }

    #[test]
    fn unknown_field_group_is_rejected() {
        let yaml = "uuid_fields:\n  - name: Id\n";
        let parsed: Result<Fields, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }

    #[test]
    fn string_field_parses_with_defaults() {
        let yaml = "string_fields:\n  - name: Name\n    is_required: true\n    max_length: 100\n";
        let fields: Fields = serde_yaml::from_str(yaml).unwrap();
        let name = &fields.string_fields[0];
        assert!(name.is_required);
        assert_eq!(name.max_length, 100);
        assert_eq!(name.location, Location::Both);
    }
}
