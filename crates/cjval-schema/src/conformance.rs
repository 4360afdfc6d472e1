//! # Schema Conformance
//!
//! Validates a document against the JSON Schema for its declared version.
//! Reports the first violation only — downstream rules assume a minimally
//! schema-valid shape and never run after a failure here.

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

/// Error during schema conformance checking.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema document itself could not be compiled.
    #[error("invalid schema document: {0}")]
    InvalidSchema(String),

    /// The document violated the schema.
    #[error("schema violation at {instance_path}: {message}")]
    Violation {
        /// JSON Pointer to the violating field in the document.
        instance_path: String,
        /// Human-readable description of the violation.
        message: String,
    },
}

/// Compile `schema` and build a reusable validator.
///
/// # Errors
///
/// Returns [`SchemaError::InvalidSchema`] when the schema does not compile.
pub fn build_validator(schema: &Value) -> Result<Validator, SchemaError> {
    jsonschema::validator_for(schema).map_err(|e| SchemaError::InvalidSchema(e.to_string()))
}

/// Validate `instance` against `schema`, reporting the first violation.
///
/// Standard JSON-Schema semantics: type mismatches, missing required
/// properties, enum violations, pattern mismatches.
///
/// # Errors
///
/// Returns [`SchemaError::Violation`] for the first non-conformance found,
/// or [`SchemaError::InvalidSchema`] when the schema does not compile.
pub fn check_schema(instance: &Value, schema: &Value) -> Result<(), SchemaError> {
    let validator = build_validator(schema)?;
    match validator.iter_errors(instance).next() {
        None => Ok(()),
        Some(first) => Err(SchemaError::Violation {
            instance_path: first.instance_path.to_string(),
            message: first.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["type", "version"],
            "properties": {
                "type": {"enum": ["CityJSON"]},
                "version": {"type": "string", "pattern": "^[0-9]\\.[0-9]$"}
            }
        })
    }

    #[test]
    fn test_conforming_document_passes() {
        let doc = json!({"type": "CityJSON", "version": "1.0"});
        check_schema(&doc, &schema()).unwrap();
    }

    #[test]
    fn test_missing_required_property() {
        let doc = json!({"type": "CityJSON"});
        let err = check_schema(&doc, &schema()).unwrap_err();
        match err {
            SchemaError::Violation { message, .. } => assert!(message.contains("version")),
            other => panic!("expected Violation, got: {other}"),
        }
    }

    #[test]
    fn test_pattern_violation_names_instance_path() {
        let doc = json!({"type": "CityJSON", "version": "not-a-version"});
        let err = check_schema(&doc, &schema()).unwrap_err();
        match err {
            SchemaError::Violation { instance_path, .. } => {
                assert_eq!(instance_path, "/version");
            }
            other => panic!("expected Violation, got: {other}"),
        }
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let bad = json!({"type": 42});
        let err = check_schema(&json!({}), &bad).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema(_)));
    }
}
