//! Application-layer handlers.
//!
//! Handlers are thin partial classes over framework base types; every
//! constructor dependency is forwarded to `base(...)`.

use scaffold_define::{ApplicationSettings, Entity, Platform};

use super::DISPATCH_NAMESPACE;
use crate::artifact::{Artifact, ArtifactKind, ArtifactSet};
use crate::errors::GeneratorError;
use crate::naming::{handler_name, handler_request_name, handler_response_name};
use crate::writer::SourceWriter;

const HANDLERS_NAMESPACE: &str = "KangarooNet.Application.Handlers";
const SERVICES_NAMESPACE: &str = "KangarooNet.Application.Services";
const AUTH_HANDLERS_NAMESPACE: &str = "KangarooNet.Application.Auth.Handlers";
const AUTH_SERVICES_NAMESPACE: &str = "KangarooNet.Application.Auth.Services";
const IDENTITY_NAMESPACE: &str = "Microsoft.AspNetCore.Identity";
const OPTIONS_SETTINGS_NAMESPACE: &str = "KangarooNet.Domain.OptionsSettings";
const CACHING_NAMESPACE: &str = "Microsoft.Extensions.Caching.Distributed";
const OPTIONS_NAMESPACE: &str = "Microsoft.Extensions.Options";

/// Placeholder for the configured user model in [`AuthHandler`] templates.
const USER: &str = "{user}";

/// One fixed auth handler.
struct AuthHandler {
    name: &'static str,
    base: &'static str,
    usings: &'static [&'static str],
    /// Whether the settings' db-context and repository namespaces are imported.
    imports_persistence: bool,
    dependencies: &'static [(&'static str, &'static str)],
}

const USER_MANAGER: (&str, &str) = ("UserManager<{user}>", "userManager");
const MEDIATOR: (&str, &str) = ("IMediator", "mediator");
const CURRENT_USER: (&str, &str) = ("ICurrentUserService", "currentUserService");
const CACHE: (&str, &str) = ("IDistributedCache", "distributedCache");
const JWT_OPTIONS: (&str, &str) = ("IOptions<JwtOptions>", "jwtOptions");

const AUTH_HANDLERS: [AuthHandler; 8] = [
    AuthHandler {
        name: "ApplicationUserInsertHandler",
        base: "ApplicationUserInsertHandlerBase<{user}, ApplicationUserInsertRequest, ApplicationUserInsertResponse>",
        usings: &[AUTH_HANDLERS_NAMESPACE, DISPATCH_NAMESPACE, IDENTITY_NAMESPACE],
        imports_persistence: true,
        dependencies: &[USER_MANAGER, MEDIATOR],
    },
    AuthHandler {
        name: "GenerateApplicationUserToInsertHandler",
        base: "GenerateApplicationUserToInsertHandlerBase<{user}, ApplicationUserInsertRequest>",
        usings: &[AUTH_HANDLERS_NAMESPACE, IDENTITY_NAMESPACE],
        imports_persistence: true,
        dependencies: &[],
    },
    AuthHandler {
        name: "ChangePasswordHandler",
        base: "ChangePasswordHandlerBase<{user}, ChangePasswordRequest, ChangePasswordResponse>",
        usings: &[AUTH_HANDLERS_NAMESPACE, AUTH_SERVICES_NAMESPACE, SERVICES_NAMESPACE, IDENTITY_NAMESPACE],
        imports_persistence: false,
        dependencies: &[USER_MANAGER, CURRENT_USER],
    },
    AuthHandler {
        name: "GenerateTokenHandler",
        base: "GenerateTokenHandlerBase<{user}>",
        usings: &[
            OPTIONS_SETTINGS_NAMESPACE,
            AUTH_HANDLERS_NAMESPACE,
            IDENTITY_NAMESPACE,
            CACHING_NAMESPACE,
            OPTIONS_NAMESPACE,
        ],
        imports_persistence: false,
        dependencies: &[USER_MANAGER, CACHE, JWT_OPTIONS],
    },
    AuthHandler {
        name: "LoginHandler",
        base: "LoginHandlerBase<{user}, LoginRequest, LoginResponse>",
        usings: &[AUTH_HANDLERS_NAMESPACE, DISPATCH_NAMESPACE, IDENTITY_NAMESPACE],
        imports_persistence: false,
        dependencies: &[USER_MANAGER, MEDIATOR],
    },
    AuthHandler {
        name: "LoginValidatorHandler",
        base: "LoginValidatorHandlerBase<{user}, LoginRequest>",
        usings: &[AUTH_HANDLERS_NAMESPACE, DISPATCH_NAMESPACE, IDENTITY_NAMESPACE],
        imports_persistence: false,
        dependencies: &[USER_MANAGER],
    },
    AuthHandler {
        name: "LogoutHandler",
        base: "LogoutHandlerBase<LogoutRequest, LogoutResponse>",
        usings: &[AUTH_HANDLERS_NAMESPACE, AUTH_SERVICES_NAMESPACE, SERVICES_NAMESPACE, DISPATCH_NAMESPACE],
        imports_persistence: false,
        dependencies: &[MEDIATOR, CURRENT_USER],
    },
    AuthHandler {
        name: "RefreshTokenHandler",
        base: "RefreshTokenHandlerBase<{user}, RefreshTokenRequest, RefreshTokenResponse>",
        usings: &[
            OPTIONS_SETTINGS_NAMESPACE,
            AUTH_HANDLERS_NAMESPACE,
            AUTH_SERVICES_NAMESPACE,
            SERVICES_NAMESPACE,
            DISPATCH_NAMESPACE,
            IDENTITY_NAMESPACE,
            CACHING_NAMESPACE,
            OPTIONS_NAMESPACE,
        ],
        imports_persistence: false,
        dependencies: &[USER_MANAGER, MEDIATOR, CURRENT_USER, CACHE, JWT_OPTIONS],
    },
];

/// Persisted record type backing `entity`.
///
/// ```
/// use scaffold_define::{ApplicationSettings, Entity, EntityHandlerDirective, RequestDirective};
/// use scaffold_gen::codegen::application::database_entity_name;
///
/// let settings = ApplicationSettings {
///     database_entity_prefix: "Tb".to_string(),
///     ..ApplicationSettings::default()
/// };
/// let country = Entity::new("Country")
///     .with_handler_request(RequestDirective::new().with_handler(EntityHandlerDirective::default()));
/// assert_eq!(database_entity_name(&country, &settings), "TbCountry");
/// ```
pub fn database_entity_name(entity: &Entity, settings: &ApplicationSettings) -> String {
    entity
        .generate_entity_handler_request
        .as_ref()
        .and_then(|request| request.generate_entity_handler.as_ref())
        .and_then(|handler| handler.database_entity_name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}{}", settings.database_entity_prefix, entity.name))
}

fn handler_writer(settings: &ApplicationSettings, name: &str) -> SourceWriter {
    let mut writer = SourceWriter::class(&settings.namespace, name);
    writer.using("System");
    writer
}

fn persistence_usings(writer: &mut SourceWriter, settings: &ApplicationSettings) {
    for namespace in [&settings.db_context_namespace, &settings.database_repositories_namespace]
        .into_iter()
        .flatten()
    {
        writer.using(namespace);
    }
}

fn model_usings(writer: &mut SourceWriter, settings: &ApplicationSettings) {
    if let Some(namespace) = &settings.database_entities_namespace {
        writer.using(namespace);
    }
    writer.using(&settings.entities_namespace);
}

/// Emits `<Entity>Handler` when the entity's mutate flow asks for one.
pub fn emit_entity_handler(
    entity: &Entity,
    settings: &ApplicationSettings,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    let wants_handler = entity
        .generate_entity_handler_request
        .as_ref()
        .is_some_and(|request| request.generate_entity_handler.is_some());
    if !wants_handler || !entity.location.includes(Platform::Backend) {
        return Ok(());
    }

    let name = handler_name(&entity.name);
    let mut writer = handler_writer(settings, &name);
    writer.usings([HANDLERS_NAMESPACE, SERVICES_NAMESPACE, "AutoMapper"]);
    persistence_usings(&mut writer, settings);
    model_usings(&mut writer, settings);
    writer
        .inherit(format!(
            "DatabaseEntityHandlerBase<ApplicationDbContext, {}, {}, {}, {}>",
            database_entity_name(entity, settings),
            entity.name,
            handler_request_name(&entity.name),
            handler_response_name(&entity.name)
        ))
        .dependency("IApplicationDatabaseRepository", "databaseRepository", true)
        .dependency("IMapper", "mapper", true)
        .dependency("ICurrentUserService", "currentUserService", true);

    out.insert(Artifact::new(
        Platform::Backend,
        name,
        ArtifactKind::Handler,
        writer.render(),
    ))
}

/// Emits the auth handlers, generic over `user_model`.
pub fn emit_auth_handlers(
    user_model: &str,
    settings: &ApplicationSettings,
    out: &mut ArtifactSet,
) -> Result<(), GeneratorError> {
    for handler in &AUTH_HANDLERS {
        let mut writer = handler_writer(settings, handler.name);
        writer.usings(handler.usings);
        if handler.imports_persistence {
            persistence_usings(&mut writer, settings);
        }
        model_usings(&mut writer, settings);
        writer.inherit(handler.base.replace(USER, user_model));
        for (ty, name) in handler.dependencies {
            writer.dependency(ty.replace(USER, user_model), *name, true);
        }

        out.insert(Artifact::new(
            Platform::Backend,
            handler.name,
            ArtifactKind::Handler,
            writer.render(),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use scaffold_define::{EntityHandlerDirective, Location};

    use super::*;
    use crate::test_utils::{application_settings, country};

    fn with_handler(directive: EntityHandlerDirective) -> Entity {
        let mut entity = country();
        if let Some(request) = entity.generate_entity_handler_request.as_mut() {
            request.generate_entity_handler = Some(directive);
        }
        entity
    }

    #[test]
    fn entity_handler_forwards_dependencies() {
        let mut out = ArtifactSet::new();
        emit_entity_handler(&with_handler(EntityHandlerDirective::default()), &application_settings(), &mut out)
            .unwrap();
        let content = &out.get(Platform::Backend, "CountryHandler").unwrap().content;

        assert!(content.contains(
            "CountryHandler : DatabaseEntityHandlerBase<ApplicationDbContext, TbCountry, Country, CountryHandlerRequest, CountryHandlerResponse>"
        ));
        assert!(content.contains(
            "public CountryHandler(IApplicationDatabaseRepository databaseRepository, IMapper mapper, ICurrentUserService currentUserService)\n            : base(databaseRepository, mapper, currentUserService)\n"
        ));
        assert!(!content.contains("private readonly"));
        assert!(content.contains("using AutoMapper;"));
        assert!(content.contains("using Shop.Persistence;"));
    }

    #[test]
    fn database_entity_name_override_wins() {
        let entity = with_handler(EntityHandlerDirective {
            database_entity_name: Some("CountryRecord".to_string()),
        });
        assert_eq!(database_entity_name(&entity, &application_settings()), "CountryRecord");
    }

    #[test]
    fn no_handler_without_directive_or_backend() {
        let mut out = ArtifactSet::new();
        emit_entity_handler(&country(), &application_settings(), &mut out).unwrap();
        assert!(out.is_empty());

        let entity = with_handler(EntityHandlerDirective::default()).located(Location::Frontend);
        emit_entity_handler(&entity, &application_settings(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn auth_handlers_are_generic_over_user_model() {
        let mut out = ArtifactSet::new();
        emit_auth_handlers("ShopUser", &application_settings(), &mut out).unwrap();
        assert_eq!(out.len(), 8);

        let refresh = &out.get(Platform::Backend, "RefreshTokenHandler").unwrap().content;
        assert!(refresh.contains(
            "RefreshTokenHandler : RefreshTokenHandlerBase<ShopUser, RefreshTokenRequest, RefreshTokenResponse>"
        ));
        assert!(refresh.contains(
            ": base(userManager, mediator, currentUserService, distributedCache, jwtOptions)"
        ));
        assert!(refresh.contains("UserManager<ShopUser> userManager"));

        let generate = &out.get(Platform::Backend, "GenerateApplicationUserToInsertHandler").unwrap().content;
        assert!(!generate.contains("public GenerateApplicationUserToInsertHandler("));

        let logout = &out.get(Platform::Backend, "LogoutHandler").unwrap().content;
        assert!(logout.contains("LogoutHandler : LogoutHandlerBase<LogoutRequest, LogoutResponse>"));
    }
}
