//! Error types for the scaffold generator.

use std::fmt;

use scaffold_define::Platform;
use thiserror::Error;

use crate::artifact::{ArtifactKind, Flow};

/// Locates a schema problem: which element, which artifact, which flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub element: String,
    pub artifact: ArtifactKind,
    pub flow: Option<Flow>,
}

impl ErrorContext {
    pub fn new(element: impl Into<String>, artifact: ArtifactKind) -> Self {
        Self {
            element: element.into(),
            artifact,
            flow: None,
        }
    }

    pub fn in_flow(mut self, flow: Flow) -> Self {
        self.flow = Some(flow);
        self
    }

    /// Builds a schema error at this location.
    pub fn error(&self, reason: impl Into<String>) -> GeneratorError {
        GeneratorError::SchemaError {
            context: self.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' (artifact: {}", self.element, self.artifact)?;
        if let Some(flow) = self.flow {
            write!(f, ", flow: {}", flow)?;
        }
        write!(f, ")")
    }
}

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read a schema or settings document
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a YAML document
    #[error("Failed to parse YAML document '{path}': {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to parse a JSON document
    #[error("Failed to parse JSON document '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Malformed schema construct. Aborts the whole pass.
    #[error("Schema error in {context}: {reason}")]
    SchemaError {
        /// Where the problem was found.
        context: ErrorContext,
        /// What is wrong.
        reason: String,
    },

    /// Two emitters produced the same artifact name on one platform.
    #[error("Duplicate artifact '{name}' on the {platform} platform: emitted as {first} and as {second}")]
    DuplicateArtifact {
        platform: Platform,
        name: String,
        first: ArtifactKind,
        second: ArtifactKind,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
