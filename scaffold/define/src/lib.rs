//! Scaffold Definition Library
//!
//! This crate provides the schema model consumed by `scaffold-gen`: a
//! declarative description of entities, summaries, custom messages and enums,
//! plus the per-platform settings that decide which artifact categories are
//! generated.
//!
//! ## Core Types
//!
//! - [`CodeGenerator`] - Root of one schema document
//! - [`Entity`] / [`Summary`] - Data classes with optional request/response flows
//! - [`RequestDirective`] / [`ControllerDirective`] - Flow and controller toggles
//! - [`CustomMessage`] - Ad hoc request or response definitions
//! - [`EnumEntity`] / [`EnumValue`] - Enumerations
//! - [`Fields`] - A field group; [`FieldRef`] is its kind-agnostic view
//! - [`Location`] / [`Platform`] - Platform applicability
//! - [`Settings`] - Per-category generation settings
//!
//! ## Examples
//!
//! ```
//! use scaffold_define::prelude::*;
//!
//! let doc = CodeGenerator::new().with_entity(
//!     Entity::new("Country")
//!         .with_fields(
//!             Fields::new()
//!                 .with_key(KeyField::new("CountryId", KeyType::Guid))
//!                 .with_string(StringField::new("Name").required().max_length(100)),
//!         )
//!         .with_handler_request(
//!             RequestDirective::new().with_controller(ControllerDirective::authenticated()),
//!         ),
//! );
//!
//! assert_eq!(doc.entities[0].fields.iter().count(), 2);
//! ```

pub mod errors;
pub mod fields;
pub mod identifier;
pub mod prelude;
pub mod schema;
pub mod settings;
pub mod types;

pub use errors::DefineError;
pub use fields::{
    CollectionField, FieldKind, FieldRef, Fields, KeyField, ScalarField, StringField, TypedField,
};
pub use identifier::{RESERVED_KEYWORDS, is_reserved_keyword, validate_identifier};
pub use schema::{
    CodeGenerator, ControllerDirective, CustomMessage, Entity, EntityHandlerDirective,
    EnumEntity, EnumValue, RequestDirective, Summary,
};
pub use settings::{
    ApiClientSettings, ApiSettings, ApplicationSettings, DatabaseRepositoriesSettings,
    EntitiesSettings, EnumsSettings, MessagesSettings, Settings,
};
pub use types::{KeyType, Location, Platform};
