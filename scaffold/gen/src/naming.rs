//! Artifact naming and per-platform render policy.
//!
//! Every emitter derives names from these helpers so that controllers,
//! clients and handlers always agree with the messages they reference.

use scaffold_define::Platform;

use crate::resolver::CollectionPolicy;

/// How artifacts are rendered for one platform.
///
/// The backend always uses plain collections and plain properties and is the
/// only platform whose requests are dispatchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPolicy {
    pub platform: Platform,
    pub collections: CollectionPolicy,
    pub notify_property_changes: bool,
}

impl TargetPolicy {
    pub fn new(platform: Platform, use_observable_collection: bool, notify: bool) -> Self {
        match platform {
            Platform::Backend => Self {
                platform,
                collections: CollectionPolicy::List,
                notify_property_changes: false,
            },
            Platform::Frontend => Self {
                platform,
                collections: if use_observable_collection {
                    CollectionPolicy::Observable
                } else {
                    CollectionPolicy::List
                },
                notify_property_changes: notify,
            },
        }
    }

    /// Whether requests on this platform get the dispatch capability.
    pub fn dispatchable(&self) -> bool {
        self.platform == Platform::Backend
    }
}

pub fn validator_name(name: &str) -> String {
    format!("{name}Validator")
}

pub fn handler_request_name(entity: &str) -> String {
    format!("{entity}HandlerRequest")
}

pub fn handler_response_name(entity: &str) -> String {
    format!("{entity}HandlerResponse")
}

pub fn query_request_name(entity: &str) -> String {
    format!("{entity}QueryRequest")
}

pub fn query_response_name(entity: &str) -> String {
    format!("{entity}QueryResponse")
}

/// Collection-query messages are named after the plural.
pub fn collection_query_request_name(plural: &str) -> String {
    format!("{plural}QueryRequest")
}

pub fn collection_query_response_name(plural: &str) -> String {
    format!("{plural}QueryResponse")
}

pub fn custom_request_name(name: &str) -> String {
    format!("{name}Request")
}

pub fn custom_response_name(name: &str) -> String {
    format!("{name}Response")
}

pub fn controller_name(entity: &str) -> String {
    format!("{entity}Controller")
}

/// Artifact name of a client; the emitted interface is [`client_interface_name`].
pub fn client_name(entity: &str) -> String {
    format!("{entity}Client")
}

pub fn client_interface_name(entity: &str) -> String {
    format!("I{entity}Client")
}

pub fn handler_name(entity: &str) -> String {
    format!("{entity}Handler")
}

/// Route of a controller action as exposed by `/api/[controller]/[action]`.
///
/// ```
/// use scaffold_gen::naming::action_route;
///
/// assert_eq!(action_route("Country", "PostAsync"), "/api/Country/Post");
/// assert_eq!(action_route("Auth", "LoginAsync"), "/api/Auth/Login");
/// ```
pub fn action_route(controller: &str, action: &str) -> String {
    let segment = action.strip_suffix("Async").unwrap_or(action);
    format!("/api/{controller}/{segment}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_ignores_frontend_presentation_flags() {
        let backend = TargetPolicy::new(Platform::Backend, true, true);
        assert_eq!(backend.collections, CollectionPolicy::List);
        assert!(!backend.notify_property_changes);
        assert!(backend.dispatchable());
    }

    #[test]
    fn frontend_follows_settings() {
        let frontend = TargetPolicy::new(Platform::Frontend, true, false);
        assert_eq!(frontend.collections, CollectionPolicy::Observable);
        assert!(!frontend.dispatchable());

        let plain = TargetPolicy::new(Platform::Frontend, false, true);
        assert_eq!(plain.collections, CollectionPolicy::List);
        assert!(plain.notify_property_changes);
    }

    #[test]
    fn flow_names() {
        assert_eq!(handler_request_name("Country"), "CountryHandlerRequest");
        assert_eq!(query_response_name("Country"), "CountryQueryResponse");
        assert_eq!(collection_query_request_name("Countries"), "CountriesQueryRequest");
        assert_eq!(client_interface_name("Country"), "ICountryClient");
    }
}
