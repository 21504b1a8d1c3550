//! Loading schema and settings documents.
//!
//! Documents are YAML (`.yaml`, `.yml`) or JSON (`.json`), chosen by file
//! extension. A path without an extension is read as YAML.

use std::fs;
use std::path::Path;

use scaffold_define::{CodeGenerator, Settings};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::GeneratorError;

/// Document format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// ```
    /// use std::path::Path;
    /// use scaffold_gen::config::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path(Path::new("schema.json")).unwrap(), DocumentFormat::Json);
    /// assert_eq!(DocumentFormat::from_path(Path::new("schema.YML")).unwrap(), DocumentFormat::Yaml);
    /// assert!(DocumentFormat::from_path(Path::new("schema.toml")).is_err());
    /// ```
    pub fn from_path(path: &Path) -> Result<Self, GeneratorError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            None | Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            Some(other) => Err(GeneratorError::ConfigError(format!(
                "unsupported document extension '.{other}' for '{}' (expected .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }
}

/// Parses `text` as a `T` in the given format. `origin` names the source in errors.
pub fn parse_document<T: DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<T, GeneratorError> {
    match format {
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|source| GeneratorError::YamlError {
            path: origin.to_string(),
            source,
        }),
        DocumentFormat::Json => serde_json::from_str(text).map_err(|source| GeneratorError::JsonError {
            path: origin.to_string(),
            source,
        }),
    }
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, GeneratorError> {
    let format = DocumentFormat::from_path(path)?;
    let origin = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| GeneratorError::ReadError {
        path: origin.clone(),
        source,
    })?;
    debug!(path = %origin, ?format, "loading document");
    parse_document(&text, format, &origin)
}

/// Loads one schema document.
pub fn load_schema(path: &Path) -> Result<CodeGenerator, GeneratorError> {
    load_document(path)
}

/// Loads the settings document.
pub fn load_settings(path: &Path) -> Result<Settings, GeneratorError> {
    load_document(path)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use scaffold_define::Platform;

    use super::*;

    #[test]
    fn json_and_yaml_documents_agree() {
        let yaml = "entities:\n  - name: Country\n    plural_name: Countries\n";
        let json = r#"{"entities": [{"name": "Country", "plural_name": "Countries"}]}"#;

        let from_yaml: CodeGenerator = parse_document(yaml, DocumentFormat::Yaml, "a.yaml").unwrap();
        let from_json: CodeGenerator = parse_document(json, DocumentFormat::Json, "a.json").unwrap();
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn unknown_field_kind_names_the_file() {
        let yaml = "entities:\n  - name: Country\n    fields:\n      uuid_fields: []\n";
        let err = parse_document::<CodeGenerator>(yaml, DocumentFormat::Yaml, "shop.yaml").unwrap_err();
        assert!(matches!(err, GeneratorError::YamlError { .. }));
        assert!(err.to_string().contains("shop.yaml"));
    }

    #[test]
    fn loads_settings_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"backend_enums": {{"namespace": "Shop.Enums"}}}}"#).unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.enums(Platform::Backend).unwrap().namespace, "Shop.Enums");
    }

    #[test]
    fn unsupported_extension_is_config_error() {
        let err = load_schema(Path::new("shop.toml")).unwrap_err();
        assert!(matches!(err, GeneratorError::ConfigError(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_schema(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, GeneratorError::ReadError { .. }));
    }
}
