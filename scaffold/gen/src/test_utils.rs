//! Shared fixtures for scaffold-gen unit tests.

use scaffold_define::{
    ApiClientSettings, ApiSettings, ApplicationSettings, ControllerDirective, EntitiesSettings,
    Entity, Fields, KeyField, KeyType, MessagesSettings, RequestDirective, StringField,
};

/// Backend entity settings with plain `IList<T>` collections.
pub fn backend_entities() -> EntitiesSettings {
    EntitiesSettings::new("Shop.Domain.Entities")
}

/// Frontend entity settings with observable collections and change notification.
pub fn frontend_entities() -> EntitiesSettings {
    EntitiesSettings {
        use_observable_collection: true,
        generate_notify_property_changes: true,
        ..EntitiesSettings::new("Shop.Client.Entities")
    }
}

pub fn backend_messages() -> MessagesSettings {
    MessagesSettings::new("Shop.Domain.Messages")
}

pub fn api_settings() -> ApiSettings {
    ApiSettings {
        controllers_namespace: "Shop.Api.Controllers".to_string(),
        entities_namespace: "Shop.Domain.Entities".to_string(),
        generate_auth_controller: false,
    }
}

pub fn api_client_settings() -> ApiClientSettings {
    ApiClientSettings {
        namespace: "Shop.Client.Api".to_string(),
        entities_namespace: "Shop.Client.Entities".to_string(),
        generate_auth_client: false,
    }
}

pub fn application_settings() -> ApplicationSettings {
    ApplicationSettings {
        namespace: "Shop.Application".to_string(),
        entities_namespace: "Shop.Domain.Entities".to_string(),
        db_context_namespace: Some("Shop.Persistence".to_string()),
        database_repositories_namespace: Some("Shop.Infrastructure".to_string()),
        database_entities_namespace: Some("Shop.Persistence.Entities".to_string()),
        database_entity_prefix: "Tb".to_string(),
        auth_user_model: None,
    }
}

/// `Country`: Guid key, required `Name` (max 100), mutate and single-query
/// flows each behind an authenticated controller.
pub fn country() -> Entity {
    Entity::new("Country")
        .plural("Countries")
        .with_fields(
            Fields::new()
                .with_key(KeyField::new("CountryId", KeyType::Guid))
                .with_string(StringField::new("Name").required().max_length(100)),
        )
        .with_handler_request(RequestDirective::new().with_controller(ControllerDirective::authenticated()))
        .with_query_request(RequestDirective::new().with_controller(ControllerDirective::authenticated()))
}
