//! Writing artifacts to disk.
//!
//! Each artifact lands at `<output>/<platform>/<Name>.g.cs`. Files are
//! written atomically (temp file + rename), so an interrupted run never
//! leaves a truncated source file behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::artifact::ArtifactSet;
use crate::errors::GeneratorError;

/// Writes `content` to `path` via a sibling `.tmp` file, creating parent
/// directories as needed.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    let temp_path = stage(path, content)?;
    commit(&temp_path, path)
}

/// Writes `content` next to `path` and returns the temp file's path.
fn stage(path: &Path, content: &str) -> Result<PathBuf, GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;
    Ok(temp_path)
}

fn commit(temp_path: &Path, path: &Path) -> Result<(), GeneratorError> {
    fs::rename(temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })
}

fn discard(staged: &[PathBuf]) {
    for temp_path in staged {
        if let Err(e) = fs::remove_file(temp_path) {
            warn!(path = %temp_path.display(), error = %e, "could not remove temp file");
        }
    }
}

/// Writes every artifact under `output_dir` and returns the target paths in
/// artifact order.
///
/// Every artifact is staged to a temp file before any target is replaced.
/// If staging fails, the staged files are removed and the existing output is
/// left untouched.
///
/// With `dry_run` nothing is written; the paths that would be written are
/// still returned.
#[instrument(skip(artifacts), fields(artifacts = artifacts.len()))]
pub fn write_artifacts(
    artifacts: &ArtifactSet,
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<PathBuf>, GeneratorError> {
    let targets: Vec<PathBuf> = artifacts
        .iter()
        .map(|artifact| output_dir.join(artifact.relative_path()))
        .collect();
    if dry_run {
        warn!("dry run, no files will be written");
        return Ok(targets);
    }

    let mut staged = Vec::with_capacity(targets.len());
    for (artifact, path) in artifacts.iter().zip(&targets) {
        match stage(path, &artifact.content) {
            Ok(temp_path) => staged.push(temp_path),
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        }
    }

    for ((artifact, temp_path), path) in artifacts.iter().zip(&staged).zip(&targets) {
        commit(temp_path, path)?;
        debug!(path = %path.display(), kind = %artifact.kind, "wrote artifact");
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use scaffold_define::Platform;
    use tempfile::TempDir;

    use super::*;
    use crate::artifact::{Artifact, ArtifactKind};

    fn sample() -> ArtifactSet {
        let mut set = ArtifactSet::new();
        set.insert(Artifact::new(Platform::Backend, "Country", ArtifactKind::Entity, "backend\n"))
            .unwrap();
        set.insert(Artifact::new(Platform::Frontend, "Country", ArtifactKind::Entity, "frontend\n"))
            .unwrap();
        set
    }

    #[test]
    fn writes_per_platform_directories() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&sample(), dir.path(), false).unwrap();

        assert_eq!(paths.len(), 2);
        let backend = dir.path().join("backend/Country.g.cs");
        let frontend = dir.path().join("frontend/Country.g.cs");
        assert_eq!(fs::read_to_string(backend).unwrap(), "backend\n");
        assert_eq!(fs::read_to_string(frontend).unwrap(), "frontend\n");
    }

    #[test]
    fn no_temp_files_are_left_behind() {
        let dir = TempDir::new().unwrap();
        write_artifacts(&sample(), dir.path(), false).unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path().join("backend"))
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|e| e == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&sample(), dir.path(), true).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(!dir.path().join("backend").exists());
    }

    #[test]
    fn failed_staging_leaves_existing_output_untouched() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("backend/Country.g.cs");
        write_atomic(&existing, "old").unwrap();
        // A plain file where the frontend directory should go.
        fs::write(dir.path().join("frontend"), "").unwrap();

        let err = write_artifacts(&sample(), dir.path(), false).unwrap_err();
        assert!(matches!(err, GeneratorError::WriteError { .. }));
        assert_eq!(fs::read_to_string(&existing).unwrap(), "old");
        assert!(!dir.path().join("backend/Country.g.tmp").exists());
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backend/Country.g.cs");
        write_atomic(&path, "old").unwrap();
        write_artifacts(&sample(), dir.path(), false).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "backend\n");
    }
}
