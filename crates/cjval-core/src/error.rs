//! # Error Types — Parse-Time Failures
//!
//! Errors raised while turning raw text into a [`crate::CityJsonDocument`].
//! All of these are fatal: construction aborts and no partial document is
//! produced. Rule-level violations are not errors in this sense; they are
//! findings accumulated by the validation engine.

use thiserror::Error;

/// Fatal error while parsing a CityJSON document.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The `type` member is missing or is not the literal `"CityJSON"`.
    #[error("not a CityJSON document: missing or incorrect \"type\" member")]
    NotCityJson,

    /// The `version` member is missing or is not a string.
    #[error("missing or non-string \"version\" member")]
    MissingVersion,

    /// The declared version is not in the supported set.
    #[error("unsupported CityJSON version \"{0}\"")]
    UnsupportedVersion(String),

    /// Two keys collided inside one JSON object literal (strict mode only).
    #[error("{0}")]
    DuplicateKey(String),

    /// The text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but does not map onto the document model
    /// (e.g. a boundaries array holding a string where an index belongs).
    #[error("malformed document structure: {0}")]
    Model(String),
}
