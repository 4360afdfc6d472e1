//! # Engine — Two-Phase Validation Flow
//!
//! Phase 1: schema conformance, fatal on failure. Phase 2: every remaining
//! rule, accumulating. The engine never mutates the document and holds no
//! state across runs — each run is a pure function of (document, schema,
//! registry) → report.

use serde_json::Value;

use cjval_core::CityJsonDocument;
use cjval_schema::{conformance, AttributeRegistry};

use crate::report::{SchemaOutcome, SeverityPolicy, ValidationReport};
use crate::{appearance, attributes, metadata, refs, semantics, vertices};

/// The schema phase's input, resolved by the caller.
#[derive(Debug, Clone, Copy)]
pub enum SchemaInput<'a> {
    /// A resolved schema document for the declared version.
    Resolved(&'a Value),
    /// No schema is available for the declared version.
    Unavailable,
    /// The caller asked to skip the schema phase.
    Skip,
}

/// The validation engine.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: SeverityPolicy,
}

impl Validator {
    /// An engine with the default severity policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with a custom severity policy.
    pub fn with_policy(policy: SeverityPolicy) -> Self {
        Self { policy }
    }

    /// Run a full validation pass.
    ///
    /// The schema phase runs first. A `Failed` or `Unavailable` outcome
    /// short-circuits the run — the structural rules assume the gross shape
    /// schema validation guarantees and would report nonsense otherwise.
    /// After a passed (or skipped) schema phase, every rule runs and every
    /// violation is collected; no rule aborts the others.
    pub fn validate(
        &self,
        doc: &CityJsonDocument,
        schema: SchemaInput<'_>,
        registry: Option<&AttributeRegistry>,
    ) -> ValidationReport {
        let schema_outcome = match schema {
            SchemaInput::Skip => SchemaOutcome::Skipped,
            SchemaInput::Unavailable => {
                return ValidationReport {
                    schema: SchemaOutcome::NoSchema {
                        version: doc.version(),
                    },
                    findings: Vec::new(),
                };
            }
            SchemaInput::Resolved(schema) => match conformance::check_schema(doc.raw(), schema) {
                Ok(()) => SchemaOutcome::Passed,
                Err(e) => {
                    return ValidationReport {
                        schema: SchemaOutcome::Failed {
                            message: e.to_string(),
                        },
                        findings: Vec::new(),
                    };
                }
            },
        };

        let mut findings = Vec::new();
        findings.extend(refs::city_object_groups(doc));
        findings.extend(refs::building_parts(doc));
        findings.extend(refs::building_installations(doc));
        findings.extend(refs::parent_child_symmetry(doc));
        findings.extend(semantics::semantics_alignment(doc));
        findings.extend(vertices::vertex_index_bounds(doc));
        findings.extend(vertices::duplicate_vertices(doc));
        findings.extend(vertices::orphan_vertices(doc));
        findings.extend(metadata::metadata_presence(doc));
        findings.extend(metadata::cityjson_properties(doc));
        findings.extend(metadata::geometry_empty(doc));
        if let Some(registry) = registry {
            findings.extend(attributes::citygml_attributes(doc, registry));
        }
        findings.extend(appearance::appearance_ranges(doc));

        for finding in &mut findings {
            finding.severity = self.policy.severity_for(finding.rule);
        }

        ValidationReport {
            schema: schema_outcome,
            findings,
        }
    }
}
