//! # Schema Store
//!
//! Loads every `*.schema.json` file from a directory at construction and
//! indexes it by the format version encoded in the filename. The store is
//! the caller-side collaborator that resolves "which schema applies to this
//! document" before the engine runs; the engine itself never touches the
//! filesystem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use cjval_core::FormatVersion;

/// Error while loading the schema directory.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The schema directory could not be read.
    #[error("cannot read schema directory {dir}: {reason}")]
    DirUnreadable {
        /// The directory that failed to open.
        dir: String,
        /// Underlying reason.
        reason: String,
    },

    /// A schema file could not be read or parsed.
    #[error("schema load error for '{name}': {reason}")]
    SchemaLoad {
        /// Schema filename.
        name: String,
        /// Underlying reason.
        reason: String,
    },

    /// IO error while scanning the directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-version schema documents loaded from a local directory.
///
/// Filenames follow `cityjson-v<digits>.schema.json`; the digits are the
/// version with the dot removed (`v06` → 0.6, `v10` → 1.0). Files that do
/// not match the convention are skipped.
#[derive(Debug)]
pub struct SchemaStore {
    schema_dir: PathBuf,
    schemas: HashMap<FormatVersion, Value>,
}

impl SchemaStore {
    /// Load all schemas from `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DirUnreadable`] when the directory cannot be
    /// opened and [`StoreError::SchemaLoad`] when a matching file is not
    /// valid JSON.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| StoreError::DirUnreadable {
            dir: schema_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(version) = version_from_filename(name) else {
                if name.ends_with(".schema.json") {
                    tracing::debug!(file = name, "skipping schema file with unrecognized version");
                }
                continue;
            };
            let content = std::fs::read_to_string(&path)?;
            let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::SchemaLoad {
                name: name.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;
            schemas.insert(version, value);
        }

        tracing::debug!(
            dir = %schema_dir.display(),
            count = schemas.len(),
            "loaded schema store"
        );

        Ok(Self { schema_dir, schemas })
    }

    /// The directory the store was loaded from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Versions a schema is available for, ascending.
    pub fn versions(&self) -> Vec<FormatVersion> {
        let mut versions: Vec<FormatVersion> = self.schemas.keys().copied().collect();
        versions.sort();
        versions
    }

    /// The schema for `version`, or `None` — the distinct "no schema
    /// available" outcome, not a validation failure.
    pub fn schema_for(&self, version: FormatVersion) -> Option<&Value> {
        self.schemas.get(&version)
    }
}

/// Map `cityjson-v06.schema.json`-style filenames to a format version.
fn version_from_filename(name: &str) -> Option<FormatVersion> {
    let token = name
        .strip_prefix("cityjson-v")?
        .strip_suffix(".schema.json")?;
    match token {
        "05" => Some(FormatVersion::V05),
        "06" => Some(FormatVersion::V06),
        "08" => Some(FormatVersion::V08),
        "09" => Some(FormatVersion::V09),
        "10" => Some(FormatVersion::V10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_from_filename() {
        assert_eq!(
            version_from_filename("cityjson-v10.schema.json"),
            Some(FormatVersion::V10)
        );
        assert_eq!(
            version_from_filename("cityjson-v06.schema.json"),
            Some(FormatVersion::V06)
        );
        assert_eq!(version_from_filename("cityjson-v99.schema.json"), None);
        assert_eq!(version_from_filename("module.schema.json"), None);
        assert_eq!(version_from_filename("cityjson-v10.json"), None);
    }

    #[test]
    fn test_missing_directory_rejected() {
        let err = SchemaStore::new("/nonexistent/schema/dir").unwrap_err();
        assert!(matches!(err, StoreError::DirUnreadable { .. }));
    }
}
