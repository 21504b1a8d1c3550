//! Core enumerations shared by every schema element.
//!
//! - [`Platform`] - A concrete render target (backend or frontend)
//! - [`Location`] - Which platforms a schema element applies to
//! - [`KeyType`] - The type of an element's key field

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A concrete render target.
///
/// Every artifact is rendered for exactly one platform. Elements located on
/// [`Location::Both`] are rendered once per platform, as two independent
/// artifacts.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use scaffold_define::Platform;
///
/// assert_eq!(Platform::from_str("backend").unwrap(), Platform::Backend);
/// assert_eq!(Platform::Frontend.to_string(), "frontend");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    /// Server side: controllers, handlers, dispatchable requests.
    Backend,
    /// Client side: data classes, typed API clients.
    Frontend,
}

/// Platform applicability of a schema element.
///
/// ## Examples
///
/// ```
/// use scaffold_define::{Location, Platform};
///
/// assert!(Location::Both.includes(Platform::Backend));
/// assert!(Location::Frontend.includes(Platform::Frontend));
/// assert!(!Location::Backend.includes(Platform::Frontend));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Location {
    /// Only rendered for the backend.
    Backend,
    /// Only rendered for the frontend.
    Frontend,
    /// Rendered for both platforms.
    #[default]
    Both,
}

impl Location {
    /// Returns `true` when an element with this location is rendered for `platform`.
    pub fn includes(self, platform: Platform) -> bool {
        matches!(
            (self, platform),
            (Location::Both, _)
                | (Location::Backend, Platform::Backend)
                | (Location::Frontend, Platform::Frontend)
        )
    }
}

/// Type of a key field.
///
/// The key type fixes the signature of the generated `GetKey`/`SetKey`
/// accessors and the key capability interface everywhere the key is embedded.
///
/// ## Examples
///
/// ```
/// use scaffold_define::KeyType;
///
/// assert_eq!(KeyType::Guid.type_name(), "Guid");
/// assert_eq!(KeyType::Int.type_name(), "int");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum KeyType {
    /// 32-bit integer key.
    Int,
    /// Globally unique identifier key.
    Guid,
}

impl KeyType {
    /// The target type name used for properties and accessor signatures.
    pub fn type_name(self) -> &'static str {
        match self {
            KeyType::Int => "int",
            KeyType::Guid => "Guid",
        }
    }
}
