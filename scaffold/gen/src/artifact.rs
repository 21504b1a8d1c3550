//! Emitted artifacts and the ordered set that collects them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use scaffold_define::Platform;
use strum::Display;

use crate::errors::GeneratorError;

/// What an artifact is, used for diagnostics and duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ArtifactKind {
    Entity,
    Summary,
    Validator,
    HandlerRequest,
    HandlerResponse,
    QueryRequest,
    QueryResponse,
    CollectionQueryRequest,
    CollectionQueryResponse,
    CustomRequest,
    CustomResponse,
    AuthRequest,
    AuthResponse,
    Enum,
    Controller,
    Client,
    Handler,
    Repository,
}

/// The request/response flow an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Flow {
    Mutate,
    SingleQuery,
    CollectionQuery,
}

/// One generated source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub platform: Platform,
    pub name: String,
    pub kind: ArtifactKind,
    pub content: String,
}

impl Artifact {
    pub fn new(
        platform: Platform,
        name: impl Into<String>,
        kind: ArtifactKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            name: name.into(),
            kind,
            content: content.into(),
        }
    }

    /// Path relative to the output root: `<platform>/<name>.g.cs`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.platform.to_string()).join(format!("{}.g.cs", self.name))
    }
}

/// Artifacts of one pass, ordered by platform then name.
///
/// Ordering is what makes output byte-identical between runs regardless of
/// emitter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    artifacts: BTreeMap<(Platform, String), Artifact>,
}

impl ArtifactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artifact.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::DuplicateArtifact` when an artifact with the
    /// same name already exists on the same platform.
    pub fn insert(&mut self, artifact: Artifact) -> Result<(), GeneratorError> {
        let key = (artifact.platform, artifact.name.clone());
        if let Some(existing) = self.artifacts.get(&key) {
            return Err(GeneratorError::DuplicateArtifact {
                platform: artifact.platform,
                name: artifact.name,
                first: existing.kind,
                second: artifact.kind,
            });
        }
        tracing::debug!(platform = %artifact.platform, name = %artifact.name, kind = %artifact.kind, "emitted artifact");
        self.artifacts.insert(key, artifact);
        Ok(())
    }

    pub fn get(&self, platform: Platform, name: &str) -> Option<&Artifact> {
        self.artifacts.get(&(platform, name.to_string()))
    }

    pub fn contains(&self, platform: Platform, name: &str) -> bool {
        self.get(platform, name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.values()
    }

    /// Artifact names for one platform, in output order.
    pub fn names(&self, platform: Platform) -> Vec<&str> {
        self.iter()
            .filter(|a| a.platform == platform)
            .map(|a| a.name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(platform: Platform, name: &str) -> Artifact {
        Artifact::new(platform, name, ArtifactKind::Entity, String::new())
    }

    #[test]
    fn relative_path_uses_platform_directory() {
        let a = artifact(Platform::Frontend, "Country");
        assert_eq!(a.relative_path(), PathBuf::from("frontend/Country.g.cs"));
    }

    #[test]
    fn same_name_on_both_platforms_is_allowed() {
        let mut set = ArtifactSet::new();
        set.insert(artifact(Platform::Backend, "Country")).unwrap();
        set.insert(artifact(Platform::Frontend, "Country")).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_on_same_platform_is_rejected() {
        let mut set = ArtifactSet::new();
        set.insert(artifact(Platform::Backend, "Login")).unwrap();
        let err = set
            .insert(Artifact::new(
                Platform::Backend,
                "Login",
                ArtifactKind::CustomRequest,
                String::new(),
            ))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::DuplicateArtifact { .. }));
    }

    #[test]
    fn iteration_is_ordered_by_platform_then_name() {
        let mut set = ArtifactSet::new();
        set.insert(artifact(Platform::Frontend, "Alpha")).unwrap();
        set.insert(artifact(Platform::Backend, "Zulu")).unwrap();
        set.insert(artifact(Platform::Backend, "Bravo")).unwrap();

        let order: Vec<_> = set.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(order, vec!["Bravo", "Zulu", "Alpha"]);
    }
}
