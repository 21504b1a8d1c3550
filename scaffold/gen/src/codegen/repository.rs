//! Database repository.

use scaffold_define::{DatabaseRepositoriesSettings, Platform};

use crate::artifact::{Artifact, ArtifactKind, ArtifactSet};
use crate::errors::GeneratorError;
use crate::writer::SourceWriter;

const INFRASTRUCTURE_NAMESPACE: &str = "KangarooNet.Infrastructure.DatabaseRepositories";
const INTERFACE_NAME: &str = "IApplicationDatabaseRepository";
const CLASS_NAME: &str = "ApplicationDatabaseRepository";

/// Emits `IApplicationDatabaseRepository` and its implementation on the backend.
pub fn emit_repository(
    settings: &DatabaseRepositoriesSettings,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let mut interface = SourceWriter::interface(&settings.namespace, INTERFACE_NAME);
    interface
        .usings(["System", INFRASTRUCTURE_NAMESPACE])
        .inherit("IDatabaseRepository");
    out.insert(Artifact::new(
        Platform::Backend,
        INTERFACE_NAME,
        ArtifactKind::Repository,
        interface.render(),
    ))?;

    let mut class = SourceWriter::class(&settings.namespace, CLASS_NAME);
    class
        .usings([
            "System",
            "AutoMapper",
            "KangarooNet.Application.Services",
            INFRASTRUCTURE_NAMESPACE,
        ])
        .usings(&settings.db_context_namespace)
        .inherit("DatabaseRepositoryBase<ApplicationDbContext>")
        .inherit(INTERFACE_NAME)
        .dependency("ApplicationDbContext", "dbContext", true)
        .dependency("IMapper", "mapper", true)
        .dependency("ICurrentUserService", "currentUserService", true);
    out.insert(Artifact::new(
        Platform::Backend,
        CLASS_NAME,
        ArtifactKind::Repository,
        class.render(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_pair() {
        let settings = DatabaseRepositoriesSettings {
            namespace: "Shop.Infrastructure".to_string(),
            db_context_namespace: Some("Shop.Persistence".to_string()),
        };
        let mut out = ArtifactSet::new();
        emit_repository(&settings, &mut out).unwrap();

        let interface = &out.get(Platform::Backend, "IApplicationDatabaseRepository").unwrap().content;
        assert!(interface.contains("public partial interface IApplicationDatabaseRepository : IDatabaseRepository\n"));

        let class = &out.get(Platform::Backend, "ApplicationDatabaseRepository").unwrap().content;
        assert!(class.contains(
            "ApplicationDatabaseRepository : DatabaseRepositoryBase<ApplicationDbContext>, IApplicationDatabaseRepository"
        ));
        assert!(class.contains(": base(dbContext, mapper, currentUserService)"));
        assert!(class.contains("using Shop.Persistence;"));
    }

    #[test]
    fn db_context_namespace_is_optional() {
        let settings = DatabaseRepositoriesSettings {
            namespace: "Shop.Infrastructure".to_string(),
            db_context_namespace: None,
        };
        let mut out = ArtifactSet::new();
        emit_repository(&settings, &mut out).unwrap();
        assert_eq!(out.len(), 2);
    }
}
