//! Cross-cutting capabilities of generated data classes.
//!
//! A described type records which facets (key, data state, row version,
//! audit log) it supports. The facets render as composed interfaces in a
//! fixed order, and the fixed facets contribute trailing properties.

use scaffold_define::KeyType;
use strum::Display;

use crate::writer::Property;

/// A facet a generated type may declare, rendered as its interface name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Capability {
    #[strum(serialize = "IEntity")]
    Entity,
    #[strum(serialize = "ISummary")]
    Summary,
    #[strum(serialize = "IHasDataState")]
    DataState,
    #[strum(serialize = "IHasIntegerKey")]
    IntegerKey,
    #[strum(serialize = "IHasGuidKey")]
    GuidKey,
    #[strum(serialize = "IHasRowVersionControl")]
    RowVersionControl,
    #[strum(serialize = "IHasAuditLog")]
    AuditLog,
}

impl Capability {
    pub fn key(key_type: KeyType) -> Self {
        match key_type {
            KeyType::Int => Capability::IntegerKey,
            KeyType::Guid => Capability::GuidKey,
        }
    }
}

/// Optional facets of an entity or summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facets {
    pub data_state: bool,
    pub key: Option<KeyType>,
    pub row_version: bool,
    pub audit_log: bool,
}

/// A generated type and the capabilities it declares, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedType {
    pub name: String,
    pub capabilities: Vec<Capability>,
}

impl DescribedType {
    /// Composes `base` followed by data state, key, row version and audit log.
    pub fn compose(name: impl Into<String>, base: Capability, facets: Facets) -> Self {
        let mut capabilities = vec![base];
        if facets.data_state {
            capabilities.push(Capability::DataState);
        }
        if let Some(key_type) = facets.key {
            capabilities.push(Capability::key(key_type));
        }
        if facets.row_version {
            capabilities.push(Capability::RowVersionControl);
        }
        if facets.audit_log {
            capabilities.push(Capability::AuditLog);
        }
        Self {
            name: name.into(),
            capabilities,
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = String> + '_ {
        self.capabilities.iter().map(ToString::to_string)
    }

    /// Fixed properties appended after user fields: row version, audit log, data state.
    pub fn trailing_properties(&self) -> Vec<Property> {
        let mut properties = Vec::new();
        if self.has(Capability::RowVersionControl) {
            properties.push(Property::new("byte[]", "RowVersion"));
        }
        if self.has(Capability::AuditLog) {
            properties.extend([
                Property::new("string", "CreatedByUserName"),
                Property::new("DateTimeOffset", "CreatedAt"),
                Property::new("string", "UpdatedByUserName"),
                Property::new("DateTimeOffset?", "UpdatedAt"),
            ]);
        }
        if self.has(Capability::DataState) {
            properties.push(Property::new("DataState", "DataState"));
        }
        properties
    }
}
