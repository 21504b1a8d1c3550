//! The generation pass.
//!
//! [`generate`] is a pure function from schema documents and settings to an
//! [`ArtifactSet`]. The schema is validated first, then each category
//! [`Emitter`] runs in a fixed order. A category whose settings are absent is
//! skipped; any error aborts the pass and nothing is returned.
//!
//! ## Examples
//!
//! ```
//! use scaffold_define::{CodeGenerator, EnumEntity, EnumValue, EnumsSettings, Platform, Settings};
//! use scaffold_gen::orchestrator::generate;
//!
//! let schema = CodeGenerator::new()
//!     .with_enum(EnumEntity::auto_sequenced("Status").with_value(EnumValue::new("Active")));
//! let settings = Settings {
//!     backend_enums: Some(EnumsSettings { namespace: "Shop.Enums".to_string() }),
//!     ..Settings::default()
//! };
//!
//! let artifacts = generate(&[schema], &settings).unwrap();
//! assert!(artifacts.contains(Platform::Backend, "Status"));
//! assert!(!artifacts.contains(Platform::Frontend, "Status"));
//! ```

use scaffold_define::{CodeGenerator, Location, Platform, Settings};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use crate::artifact::ArtifactSet;
use crate::codegen::application::{emit_auth_handlers, emit_entity_handler};
use crate::codegen::auth::{auth_surface, emit_auth_messages};
use crate::codegen::client::emit_client;
use crate::codegen::controller::emit_controller;
use crate::codegen::custom::{emit_custom_request, emit_custom_response};
use crate::codegen::entity::{emit_entity, emit_summary};
use crate::codegen::enums::emit_enum;
use crate::codegen::messages::{emit_entity_flows, emit_summary_flows};
use crate::codegen::repository::emit_repository;
use crate::codegen::surface::{Surface, entity_surface, summary_surface};
use crate::codegen::RenderTarget;
use crate::errors::GeneratorError;
use crate::validation::validate_schema;

/// One settings category's worth of artifacts.
pub trait Emitter {
    /// Human-readable category name used in logs.
    fn category(&self) -> String;

    /// Whether the settings for this category are present.
    fn is_configured(&self, settings: &Settings) -> bool;

    /// Emits into `out`. Only called when [`Emitter::is_configured`] holds.
    fn emit(
        &self,
        documents: &[CodeGenerator],
        settings: &Settings,
        out: &mut ArtifactSet,
    ) -> Result<(), GeneratorError>;
}

struct EnumsEmitter(Platform);

impl Emitter for EnumsEmitter {
    fn category(&self) -> String {
        format!("{} enums", self.0)
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.enums(self.0).is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(enums) = settings.enums(self.0) else {
            return Ok(());
        };
        for enumeration in documents.iter().flat_map(|d| &d.enums) {
            emit_enum(enumeration, self.0, enums, out)?;
        }
        Ok(())
    }
}

struct RepositoryEmitter;

impl Emitter for RepositoryEmitter {
    fn category(&self) -> String {
        "database repositories".to_string()
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.database_repositories.is_some()
    }

    fn emit(&self, _documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        match &settings.database_repositories {
            Some(repositories) => emit_repository(repositories, out),
            None => Ok(()),
        }
    }
}

/// Entities, summaries, their flow messages, and the auth messages.
struct EntitiesEmitter(Platform);

impl Emitter for EntitiesEmitter {
    fn category(&self) -> String {
        format!("{} entities", self.0)
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.entities(self.0).is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(entities) = settings.entities(self.0) else {
            return Ok(());
        };
        let target = RenderTarget::for_entities(self.0, entities);

        for document in documents {
            for entity in &document.entities {
                emit_entity(entity, &target, out)?;
                emit_entity_flows(entity, &target, out)?;
            }
            for summary in &document.summaries {
                emit_summary(summary, &target, out)?;
                emit_summary_flows(summary, &target, out)?;
            }
        }
        if entities.generate_auth_entities {
            emit_auth_messages(&target, out)?;
        }
        Ok(())
    }
}

struct CustomRequestsEmitter(Platform);

impl Emitter for CustomRequestsEmitter {
    fn category(&self) -> String {
        format!("{} custom requests", self.0)
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.custom_requests(self.0).is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(messages) = settings.custom_requests(self.0) else {
            return Ok(());
        };
        let target = RenderTarget::for_messages(self.0, messages);
        for request in documents.iter().flat_map(|d| &d.custom_requests) {
            emit_custom_request(request, &target, out)?;
        }
        Ok(())
    }
}

struct CustomResponsesEmitter(Platform);

impl Emitter for CustomResponsesEmitter {
    fn category(&self) -> String {
        format!("{} custom responses", self.0)
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.custom_responses(self.0).is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(messages) = settings.custom_responses(self.0) else {
            return Ok(());
        };
        let target = RenderTarget::for_messages(self.0, messages);
        for response in documents.iter().flat_map(|d| &d.custom_responses) {
            emit_custom_response(response, &target, out)?;
        }
        Ok(())
    }
}

struct ApplicationEmitter;

impl Emitter for ApplicationEmitter {
    fn category(&self) -> String {
        "application".to_string()
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.application.is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(application) = &settings.application else {
            return Ok(());
        };
        for entity in documents.iter().flat_map(|d| &d.entities) {
            emit_entity_handler(entity, application, out)?;
        }
        if let Some(user_model) = application.auth_user_model.as_deref().filter(|m| !m.trim().is_empty()) {
            emit_auth_handlers(user_model.trim(), application, out)?;
        }
        Ok(())
    }
}

/// Every entity and summary surface served by a backend controller, in
/// document order.
///
/// With `mirrored`, only surfaces whose messages also exist on the frontend
/// are returned; those are the ones a client can call.
fn controller_surfaces(documents: &[CodeGenerator], mirrored: bool) -> Result<Vec<Surface>, GeneratorError> {
    let reaches_client = |location: Location| !mirrored || location.includes(Platform::Frontend);
    let mut surfaces = Vec::new();
    for document in documents {
        for entity in document.entities.iter().filter(|e| reaches_client(e.location)) {
            surfaces.extend(entity_surface(entity, Platform::Backend)?);
        }
        for summary in document.summaries.iter().filter(|s| reaches_client(s.location)) {
            surfaces.extend(summary_surface(summary, Platform::Backend)?);
        }
    }
    Ok(surfaces)
}

struct ApiEmitter;

impl Emitter for ApiEmitter {
    fn category(&self) -> String {
        "api".to_string()
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.api.is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(api) = &settings.api else {
            return Ok(());
        };
        for surface in controller_surfaces(documents, false)? {
            emit_controller(&surface, api, out)?;
        }
        if api.generate_auth_controller {
            emit_controller(&auth_surface(), api, out)?;
        }
        Ok(())
    }
}

struct ApiClientEmitter;

impl Emitter for ApiClientEmitter {
    fn category(&self) -> String {
        "api client".to_string()
    }

    fn is_configured(&self, settings: &Settings) -> bool {
        settings.api_client.is_some()
    }

    fn emit(&self, documents: &[CodeGenerator], settings: &Settings, out: &mut ArtifactSet) -> Result<(), GeneratorError> {
        let Some(client) = &settings.api_client else {
            return Ok(());
        };
        for surface in controller_surfaces(documents, true)? {
            emit_client(&surface, client, out)?;
        }
        if client.generate_auth_client {
            emit_client(&auth_surface(), client, out)?;
        }
        Ok(())
    }
}

/// Every emitter, in run order.
pub fn standard_emitters() -> Vec<Box<dyn Emitter>> {
    let mut emitters: Vec<Box<dyn Emitter>> = Vec::new();
    emitters.extend(Platform::iter().map(|p| Box::new(EnumsEmitter(p)) as Box<dyn Emitter>));
    emitters.push(Box::new(RepositoryEmitter));
    emitters.extend(Platform::iter().map(|p| Box::new(EntitiesEmitter(p)) as Box<dyn Emitter>));
    emitters.extend(Platform::iter().map(|p| Box::new(CustomRequestsEmitter(p)) as Box<dyn Emitter>));
    emitters.extend(Platform::iter().map(|p| Box::new(CustomResponsesEmitter(p)) as Box<dyn Emitter>));
    emitters.push(Box::new(ApplicationEmitter));
    emitters.push(Box::new(ApiEmitter));
    emitters.push(Box::new(ApiClientEmitter));
    emitters
}

/// Runs one generation pass.
///
/// ## Errors
///
/// Returns the first `SchemaError` or `DuplicateArtifact`; no partial
/// artifact set is returned.
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn generate(documents: &[CodeGenerator], settings: &Settings) -> Result<ArtifactSet, GeneratorError> {
    validate_schema(documents)?;

    let mut out = ArtifactSet::new();
    for emitter in standard_emitters() {
        let category = emitter.category();
        if !emitter.is_configured(settings) {
            debug!(%category, "settings absent, skipping");
            continue;
        }
        let before = out.len();
        emitter.emit(documents, settings, &mut out)?;
        info!(%category, artifacts = out.len() - before, "emitted");
    }
    Ok(out)
}
