//! Scaffold code generator library.
//!
//! This crate turns declarative schema documents (`scaffold-define`) into C#
//! source for a layered backend/frontend application. One pass reads the
//! schema once and renders it per platform:
//!
//! - Entity and summary data classes with paired validators
//! - Mutate, single-query and collection-query request/response messages
//! - Custom requests and responses
//! - Fixed authentication messages, handlers, controller and client
//! - REST controllers and typed remote-call client interfaces
//! - Enumerations
//! - Application handlers and the database repository
//!
//! ## Modules
//!
//! - [`orchestrator`] - The generation pass and its category emitters
//! - [`codegen`] - Emitters for individual artifact families
//! - [`validation`] - Pre-generation schema checks
//! - [`config`] - Loading schema and settings documents
//! - [`output`] - Atomic file writing
//! - [`writer`] - The C# source unit builder
//! - [`resolver`] - Field type resolution and collection wrapping
//! - [`capability`] - Capability interfaces composed onto data classes
//! - [`naming`] - Artifact naming and per-platform render policy
//! - [`artifact`] - Artifacts and the ordered artifact set
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use scaffold_gen::config::{load_schema, load_settings};
//! use scaffold_gen::orchestrator::generate;
//! use scaffold_gen::output::write_artifacts;
//!
//! let schema = load_schema(Path::new("schema.yaml")).unwrap();
//! let settings = load_settings(Path::new("settings.yaml")).unwrap();
//!
//! let artifacts = generate(&[schema], &settings).unwrap();
//! write_artifacts(&artifacts, Path::new("generated"), false).unwrap();
//! ```

pub mod artifact;
pub mod capability;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod naming;
pub mod orchestrator;
pub mod output;
pub mod resolver;
pub mod validation;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_utils;
