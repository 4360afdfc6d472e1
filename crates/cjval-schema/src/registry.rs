//! # CityGML Attribute Registry
//!
//! Maps each city-object kind to the set of recognized CityGML-derived
//! attribute names and their expected value types. Attributes are
//! extensible by design, so the registry feeds warnings, never errors, in
//! the default severity policy.
//!
//! A default registry derived from the CityGML attribute catalogue ships
//! embedded in the crate; callers with their own conventions load a
//! registry file instead.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The embedded default registry.
const BUILTIN_REGISTRY: &str = include_str!("../assets/citygml-attributes.json");

/// Error while loading an attribute registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("cannot read registry file {path}: {reason}")]
    Unreadable {
        /// Path that failed to load.
        path: String,
        /// Underlying reason.
        reason: String,
    },

    /// The registry content is not valid.
    #[error("malformed registry: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Expected JSON type of a registered attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON integer.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl AttributeType {
    /// Whether `value` has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// The type name as written in registry files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized attributes per city-object kind.
///
/// Registry files are plain JSON: kind name → attribute name → type name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRegistry {
    kinds: BTreeMap<String, BTreeMap<String, AttributeType>>,
}

impl AttributeRegistry {
    /// The embedded default registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Malformed`] only if the embedded asset is
    /// broken, which a build of this crate should never ship.
    pub fn builtin() -> Result<Self, RegistryError> {
        Ok(serde_json::from_str(BUILTIN_REGISTRY)?)
    }

    /// Load a registry from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Recognized attributes for `kind`, or `None` when the kind has no
    /// entry (nothing is checked for it).
    pub fn attributes_for(&self, kind: &str) -> Option<&BTreeMap<String, AttributeType>> {
        self.kinds.get(kind)
    }

    /// Number of kinds with registered attributes.
    pub fn kind_count(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
