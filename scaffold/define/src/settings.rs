//! Generation settings.
//!
//! Every category is optional. An absent category is the opt-out mechanism:
//! its emitters are skipped without error.

use serde::{Deserialize, Serialize};

use crate::types::Platform;

/// Settings for entity, summary and auth-message data classes on one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitiesSettings {
    pub namespace: String,
    /// Defaults to `namespace`.
    #[serde(default)]
    pub validators_namespace: Option<String>,
    /// Usings added to every data class (enum namespaces, shared types).
    #[serde(default)]
    pub additional_usings: Vec<String>,
    /// Frontend only; ignored for the backend.
    #[serde(default)]
    pub generate_notify_property_changes: bool,
    /// Frontend only; ignored for the backend.
    #[serde(default)]
    pub use_observable_collection: bool,
    #[serde(default)]
    pub generate_auth_entities: bool,
}

impl EntitiesSettings {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn validators_namespace(&self) -> &str {
        self.validators_namespace.as_deref().unwrap_or(&self.namespace)
    }
}

/// Settings for custom requests or custom responses on one platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesSettings {
    pub namespace: String,
    #[serde(default)]
    pub validators_namespace: Option<String>,
    #[serde(default)]
    pub additional_usings: Vec<String>,
    #[serde(default)]
    pub generate_notify_property_changes: bool,
    #[serde(default)]
    pub use_observable_collection: bool,
}

impl MessagesSettings {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn validators_namespace(&self) -> &str {
        self.validators_namespace.as_deref().unwrap_or(&self.namespace)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumsSettings {
    pub namespace: String,
}

/// Application layer (handlers). Backend only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplicationSettings {
    pub namespace: String,
    pub entities_namespace: String,
    #[serde(default)]
    pub db_context_namespace: Option<String>,
    #[serde(default)]
    pub database_repositories_namespace: Option<String>,
    #[serde(default)]
    pub database_entities_namespace: Option<String>,
    /// Prepended to entity names to form persisted record names (e.g. `Tb`).
    #[serde(default)]
    pub database_entity_prefix: String,
    /// Custom user-model type; enables the auth handlers when set.
    #[serde(default)]
    pub auth_user_model: Option<String>,
}

/// API layer (controllers). Backend only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSettings {
    pub controllers_namespace: String,
    pub entities_namespace: String,
    #[serde(default)]
    pub generate_auth_controller: bool,
}

/// API-client layer (typed remote-call interfaces). Frontend only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiClientSettings {
    pub namespace: String,
    pub entities_namespace: String,
    #[serde(default)]
    pub generate_auth_client: bool,
}

/// Database-repository layer. Backend only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseRepositoriesSettings {
    pub namespace: String,
    #[serde(default)]
    pub db_context_namespace: Option<String>,
}

/// All settings for one generation pass.
///
/// ## Examples
///
/// ```
/// use scaffold_define::{EntitiesSettings, Platform, Settings};
///
/// let settings = Settings {
///     backend_entities: Some(EntitiesSettings::new("Shop.Domain.Entities")),
///     ..Settings::default()
/// };
///
/// assert!(settings.entities(Platform::Backend).is_some());
/// assert!(settings.entities(Platform::Frontend).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub backend_entities: Option<EntitiesSettings>,
    pub frontend_entities: Option<EntitiesSettings>,
    pub backend_custom_requests: Option<MessagesSettings>,
    pub frontend_custom_requests: Option<MessagesSettings>,
    pub backend_custom_responses: Option<MessagesSettings>,
    pub frontend_custom_responses: Option<MessagesSettings>,
    pub backend_enums: Option<EnumsSettings>,
    pub frontend_enums: Option<EnumsSettings>,
    pub application: Option<ApplicationSettings>,
    pub api: Option<ApiSettings>,
    pub api_client: Option<ApiClientSettings>,
    pub database_repositories: Option<DatabaseRepositoriesSettings>,
}

impl Settings {
    pub fn entities(&self, platform: Platform) -> Option<&EntitiesSettings> {
        match platform {
            Platform::Backend => self.backend_entities.as_ref(),
            Platform::Frontend => self.frontend_entities.as_ref(),
        }
    }

    pub fn custom_requests(&self, platform: Platform) -> Option<&MessagesSettings> {
        match platform {
            Platform::Backend => self.backend_custom_requests.as_ref(),
            Platform::Frontend => self.frontend_custom_requests.as_ref(),
        }
    }

    pub fn custom_responses(&self, platform: Platform) -> Option<&MessagesSettings> {
        match platform {
            Platform::Backend => self.backend_custom_responses.as_ref(),
            Platform::Frontend => self.frontend_custom_responses.as_ref(),
        }
    }

    pub fn enums(&self, platform: Platform) -> Option<&EnumsSettings> {
        match platform {
            Platform::Backend => self.backend_enums.as_ref(),
            Platform::Frontend => self.frontend_enums.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validators_namespace_falls_back_to_namespace() {
        let mut settings = EntitiesSettings::new("Shop.Entities");
        assert_eq!(settings.validators_namespace(), "Shop.Entities");

        settings.validators_namespace = Some("Shop.Validators".to_string());
        assert_eq!(settings.validators_namespace(), "Shop.Validators");
    }

    #[test]
    fn parses_partial_settings() {
        let yaml = r#"
frontend_entities:
  namespace: Shop.Client.Entities
  use_observable_collection: true
api:
  controllers_namespace: Shop.Api.Controllers
  entities_namespace: Shop.Entities
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        let frontend = settings.entities(Platform::Frontend).unwrap();
        assert!(frontend.use_observable_collection);
        assert!(!frontend.generate_notify_property_changes);
        assert!(settings.entities(Platform::Backend).is_none());
        assert!(!settings.api.unwrap().generate_auth_controller);
        assert!(settings.application.is_none());
    }

    #[test]
    fn category_without_namespace_is_rejected() {
        let yaml = "backend_enums: {}\n";
        let parsed: Result<Settings, _> = serde_yaml::from_str(yaml);
        assert!(parsed.is_err());
    }
}
