//! # Format Versions
//!
//! The closed set of CityJSON versions this suite understands. A document
//! declaring any other version fails construction; whether a JSON Schema is
//! actually available for a supported version is a separate, non-fatal
//! question answered by the schema store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Supported CityJSON format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormatVersion {
    /// CityJSON 0.5.
    #[serde(rename = "0.5")]
    V05,
    /// CityJSON 0.6.
    #[serde(rename = "0.6")]
    V06,
    /// CityJSON 0.8.
    #[serde(rename = "0.8")]
    V08,
    /// CityJSON 0.9.
    #[serde(rename = "0.9")]
    V09,
    /// CityJSON 1.0.
    #[serde(rename = "1.0")]
    V10,
}

impl FormatVersion {
    /// The version string as it appears in the document's `version` member.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V05 => "0.5",
            Self::V06 => "0.6",
            Self::V08 => "0.8",
            Self::V09 => "0.9",
            Self::V10 => "1.0",
        }
    }

    /// All supported versions in ascending order.
    pub fn all() -> &'static [FormatVersion] {
        &[Self::V05, Self::V06, Self::V08, Self::V09, Self::V10]
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0.5" => Ok(Self::V05),
            "0.6" => Ok(Self::V06),
            "0.8" => Ok(Self::V08),
            "0.9" => Ok(Self::V09),
            "1.0" => Ok(Self::V10),
            other => Err(ParseError::UnsupportedVersion(other.to_string())),
        }
    }
}
