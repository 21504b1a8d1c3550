//! Schema elements: entities, summaries, custom messages and enums.
//!
//! A schema document deserializes into a [`CodeGenerator`]. Several documents
//! may be combined in one generation pass; each is read once and never
//! mutated.

use serde::{Deserialize, Serialize};

use crate::fields::Fields;
use crate::types::Location;

/// Request to emit a REST controller action for a flow.
///
/// ## Examples
///
/// ```
/// use scaffold_define::ControllerDirective;
///
/// let admin_only = ControllerDirective::authenticated().with_permission("Admin");
/// assert!(admin_only.is_authentication_required);
/// assert_eq!(admin_only.permissions, vec!["Admin".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerDirective {
    pub is_authentication_required: bool,
    /// Role names; each becomes an independent role requirement.
    pub permissions: Vec<String>,
    /// Attributes applied to the controller class.
    pub custom_attributes: Vec<String>,
    /// Usings added to the controller unit.
    pub additional_usings: Vec<String>,
}

impl ControllerDirective {
    /// An action open to anonymous callers.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An action requiring an authenticated caller.
    pub fn authenticated() -> Self {
        Self {
            is_authentication_required: true,
            ..Self::default()
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }
}

/// Request to emit an application-layer handler for the mutate flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EntityHandlerDirective {
    /// Overrides the persisted record type name (default: prefix + entity name).
    pub database_entity_name: Option<String>,
}

/// Directive enabling one request/response flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestDirective {
    /// Extra fields appended to the request (filters, options).
    pub additional_fields: Fields,
    pub additional_usings: Vec<String>,
    pub custom_attributes: Vec<String>,
    pub generate_controller: Option<ControllerDirective>,
    /// Only honored on the mutate flow.
    pub generate_entity_handler: Option<EntityHandlerDirective>,
}

impl RequestDirective {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controller(mut self, controller: ControllerDirective) -> Self {
        self.generate_controller = Some(controller);
        self
    }

    pub fn with_handler(mut self, handler: EntityHandlerDirective) -> Self {
        self.generate_entity_handler = Some(handler);
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.additional_fields = fields;
        self
    }
}

/// A persisted data class with optional request/response flows.
///
/// ## Examples
///
/// ```
/// use scaffold_define::{Entity, Fields, KeyField, KeyType, RequestDirective};
///
/// let country = Entity::new("Country")
///     .plural("Countries")
///     .with_fields(Fields::new().with_key(KeyField::new("CountryId", KeyType::Guid)))
///     .with_handler_request(RequestDirective::new());
///
/// assert_eq!(country.plural_name.as_deref(), Some("Countries"));
/// assert!(country.generate_entity_handler_request.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Entity {
    pub name: String,
    /// Required when the collection-query flow is enabled.
    pub plural_name: Option<String>,
    pub location: Location,
    pub fields: Fields,
    pub include_data_state: bool,
    pub include_row_version_control: bool,
    pub include_audit_log: bool,
    pub additional_usings: Vec<String>,
    pub custom_attributes: Vec<String>,
    /// Mutate flow.
    pub generate_entity_handler_request: Option<RequestDirective>,
    /// Single-query flow.
    pub generate_entity_query_request: Option<RequestDirective>,
    /// Collection-query flow.
    pub generate_entities_query_request: Option<RequestDirective>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn plural(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_handler_request(mut self, directive: RequestDirective) -> Self {
        self.generate_entity_handler_request = Some(directive);
        self
    }

    pub fn with_query_request(mut self, directive: RequestDirective) -> Self {
        self.generate_entity_query_request = Some(directive);
        self
    }

    pub fn with_collection_query_request(mut self, directive: RequestDirective) -> Self {
        self.generate_entities_query_request = Some(directive);
        self
    }
}

/// A read model. Summaries have query flows only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Summary {
    pub name: String,
    pub plural_name: Option<String>,
    pub location: Location,
    pub fields: Fields,
    pub include_row_version_control: bool,
    pub include_audit_log: bool,
    pub additional_usings: Vec<String>,
    pub custom_attributes: Vec<String>,
    pub generate_summary_query_request: Option<RequestDirective>,
    pub generate_summaries_query_request: Option<RequestDirective>,
}

impl Summary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn plural(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }
}

/// An ad hoc request or response definition.
///
/// The emitted unit is named `<name>Request` or `<name>Response`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomMessage {
    pub name: String,
    pub location: Location,
    pub fields: Fields,
    /// Makes a backend request dispatchable to `<name>Response`.
    pub include_command_interface: bool,
    pub additional_usings: Vec<String>,
    pub custom_attributes: Vec<String>,
}

impl CustomMessage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One enumeration member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnumValue {
    pub name: String,
    /// Literal ordinal; must be absent on auto-sequenced enums.
    pub default_value: Option<String>,
    pub location: Location,
}

impl EnumValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn located(mut self, location: Location) -> Self {
        self.location = location;
        self
    }
}

/// An enumeration.
///
/// ## Examples
///
/// ```
/// use scaffold_define::{EnumEntity, EnumValue};
///
/// let status = EnumEntity::auto_sequenced("Status")
///     .with_value(EnumValue::new("Active"))
///     .with_value(EnumValue::new("Inactive"));
///
/// assert!(status.auto_gen_sequence_number);
/// assert_eq!(status.values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnumEntity {
    pub name: String,
    pub location: Location,
    pub auto_gen_sequence_number: bool,
    pub values: Vec<EnumValue>,
    pub additional_usings: Vec<String>,
    pub custom_attributes: Vec<String>,
}

impl EnumEntity {
    /// An enum whose values carry explicit ordinals.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// An enum whose ordinals are assigned per platform from zero.
    pub fn auto_sequenced(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            auto_gen_sequence_number: true,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: EnumValue) -> Self {
        self.values.push(value);
        self
    }
}

/// Root of a schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeGenerator {
    pub entities: Vec<Entity>,
    pub summaries: Vec<Summary>,
    pub custom_requests: Vec<CustomMessage>,
    pub custom_responses: Vec<CustomMessage>,
    pub enums: Vec<EnumEntity>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summaries.push(summary);
        self
    }

    pub fn with_enum(mut self, value: EnumEntity) -> Self {
        self.enums.push(value);
        self
    }

    pub fn with_custom_request(mut self, request: CustomMessage) -> Self {
        self.custom_requests.push(request);
        self
    }

    pub fn with_custom_response(mut self, response: CustomMessage) -> Self {
        self.custom_responses.push(response);
        self
    }
}
