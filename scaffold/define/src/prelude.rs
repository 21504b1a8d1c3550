//! Convenient re-exports for building schema documents in code.
//!
//! ```
//! use scaffold_define::prelude::*;
//!
//! let status = EnumEntity::auto_sequenced("Status").with_value(EnumValue::new("Active"));
//! let doc = CodeGenerator::new().with_enum(status);
//! assert_eq!(doc.enums.len(), 1);
//! ```

pub use crate::fields::{
    CollectionField, FieldKind, FieldRef, Fields, KeyField, ScalarField, StringField, TypedField,
};
pub use crate::schema::{
    CodeGenerator, ControllerDirective, CustomMessage, Entity, EntityHandlerDirective,
    EnumEntity, EnumValue, RequestDirective, Summary,
};
pub use crate::settings::{
    ApiClientSettings, ApiSettings, ApplicationSettings, DatabaseRepositoriesSettings,
    EntitiesSettings, EnumsSettings, MessagesSettings, Settings,
};
pub use crate::types::{KeyType, Location, Platform};
