//! # Findings, Reports, Severity Policy
//!
//! Rules return structured [`Finding`]s; formatting into the two
//! newline-delimited text reports is a final aggregation concern. This
//! keeps rule logic decoupled from presentation and the findings
//! machine-consumable.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use cjval_core::FormatVersion;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Suspicious but legal; affects `is_clean`, never `is_valid`.
    Warning,
    /// A specification violation; the document is invalid.
    Error,
}

/// Identifies the rule a finding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    /// City-object-group member ids resolve.
    CityObjectGroups,
    /// BuildingPart parent linkage and parent-kind compatibility.
    BuildingParts,
    /// BuildingInstallation parent linkage and parent-kind compatibility.
    BuildingInstallations,
    /// `parents`/`children` resolve and are symmetric.
    ParentChildSymmetry,
    /// `semantics.values` congruent with `boundaries`, indices in range.
    SemanticsAlignment,
    /// Boundary vertex indices within the vertex list.
    VertexIndexBounds,
    /// Vertices sharing a post-transform coordinate.
    DuplicateVertices,
    /// Vertices never referenced by any geometry.
    OrphanVertices,
    /// `metadata.crs.epsg` / `metadata.bbox` presence.
    MetadataPresence,
    /// Unrecognized top-level document members.
    CityjsonProperties,
    /// Present-but-empty geometry or boundary arrays.
    GeometryEmpty,
    /// Attribute names/types against the CityGML registry.
    CitygmlAttributes,
    /// Material/texture indices and default-theme pointers in range.
    AppearanceRanges,
}

impl RuleCode {
    /// Stable identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CityObjectGroups => "city_object_groups",
            Self::BuildingParts => "building_parts",
            Self::BuildingInstallations => "building_installations",
            Self::ParentChildSymmetry => "parent_child_symmetry",
            Self::SemanticsAlignment => "semantics_alignment",
            Self::VertexIndexBounds => "vertex_index_bounds",
            Self::DuplicateVertices => "duplicate_vertices",
            Self::OrphanVertices => "orphan_vertices",
            Self::MetadataPresence => "metadata_presence",
            Self::CityjsonProperties => "cityjson_properties",
            Self::GeometryEmpty => "geometry_empty",
            Self::CitygmlAttributes => "citygml_attributes",
            Self::AppearanceRanges => "appearance_ranges",
        }
    }

    /// The severity this rule's findings carry unless the policy overrides
    /// it. The split mirrors the upstream convention: broken references and
    /// misaligned arrays make a file invalid; wasteful vertices, missing
    /// metadata, and unrecognized attributes are advisory.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::CityObjectGroups
            | Self::BuildingParts
            | Self::BuildingInstallations
            | Self::ParentChildSymmetry
            | Self::SemanticsAlignment
            | Self::VertexIndexBounds
            | Self::AppearanceRanges => Severity::Error,
            Self::DuplicateVertices
            | Self::OrphanVertices
            | Self::MetadataPresence
            | Self::CityjsonProperties
            | Self::GeometryEmpty
            | Self::CitygmlAttributes => Severity::Warning,
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violation reported by one rule.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// The rule that produced the finding.
    pub rule: RuleCode,
    /// Severity after policy application.
    pub severity: Severity,
    /// Human-readable description of the violation.
    pub message: String,
    /// Ids of the city objects involved, for traceability.
    pub object_ids: Vec<String>,
}

impl Finding {
    /// A finding carrying its rule's default severity and no object ids.
    pub fn new(rule: RuleCode, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: rule.default_severity(),
            message: message.into(),
            object_ids: Vec::new(),
        }
    }

    /// Attach the ids of the objects involved.
    pub fn with_objects<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.object_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// Per-rule severity overrides.
///
/// The warning/error split is business policy, not structural necessity:
/// a consumer may reasonably treat missing metadata as fatal. The engine
/// stamps every finding with `severity_for(rule)`.
#[derive(Debug, Clone, Default)]
pub struct SeverityPolicy {
    overrides: BTreeMap<RuleCode, Severity>,
}

impl SeverityPolicy {
    /// The default policy: every rule at its default severity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override one rule's severity.
    pub fn set(mut self, rule: RuleCode, severity: Severity) -> Self {
        self.overrides.insert(rule, severity);
        self
    }

    /// The effective severity for `rule`.
    pub fn severity_for(&self, rule: RuleCode) -> Severity {
        self.overrides
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_severity())
    }
}

/// Outcome of the schema conformance phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SchemaOutcome {
    /// The document conforms to its schema.
    Passed,
    /// The caller requested skipping the schema check.
    Skipped,
    /// No schema is available for the declared version. Distinct from
    /// `Failed`: the document was not judged, it could not be judged.
    NoSchema {
        /// The version no schema was found for.
        version: FormatVersion,
    },
    /// The document violated its schema; the rule phase did not run.
    Failed {
        /// The first violation encountered.
        message: String,
    },
}

/// The result of a validation run: the schema outcome plus every finding
/// from the rule phase.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Outcome of the schema phase.
    pub schema: SchemaOutcome,
    /// Accumulated rule findings.
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Whether the document is valid: the schema phase did not fail and no
    /// Error-severity finding was produced.
    pub fn is_valid(&self) -> bool {
        let schema_ok = matches!(self.schema, SchemaOutcome::Passed | SchemaOutcome::Skipped);
        schema_ok && !self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Whether the document produced no warnings. Independent of
    /// [`is_valid`](Self::is_valid): a file can be invalid yet clean, or
    /// valid with caveats.
    pub fn is_clean(&self) -> bool {
        !self.findings.iter().any(|f| f.severity == Severity::Warning)
    }

    /// Findings of a given severity.
    pub fn findings_with(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    /// Newline-delimited error accumulation, including a failed or absent
    /// schema phase.
    pub fn error_report(&self) -> String {
        let mut lines = Vec::new();
        match &self.schema {
            SchemaOutcome::Failed { message } => lines.push(message.clone()),
            SchemaOutcome::NoSchema { version } => {
                lines.push(format!("no schema available for CityJSON version {version}"));
            }
            SchemaOutcome::Passed | SchemaOutcome::Skipped => {}
        }
        lines.extend(self.findings_with(Severity::Error).map(Finding::to_string));
        lines.join("\n")
    }

    /// Newline-delimited warning accumulation.
    pub fn warning_report(&self) -> String {
        self.findings_with(Severity::Warning)
            .map(Finding::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severities() {
        assert_eq!(
            RuleCode::ParentChildSymmetry.default_severity(),
            Severity::Error
        );
        assert_eq!(
            RuleCode::DuplicateVertices.default_severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_policy_override() {
        let policy = SeverityPolicy::new().set(RuleCode::MetadataPresence, Severity::Error);
        assert_eq!(
            policy.severity_for(RuleCode::MetadataPresence),
            Severity::Error
        );
        assert_eq!(
            policy.severity_for(RuleCode::OrphanVertices),
            Severity::Warning
        );
    }

    #[test]
    fn test_report_verdicts_independent() {
        let report = ValidationReport {
            schema: SchemaOutcome::Passed,
            findings: vec![Finding::new(
                RuleCode::ParentChildSymmetry,
                "asymmetric link",
            )],
        };
        assert!(!report.is_valid());
        assert!(report.is_clean());

        let report = ValidationReport {
            schema: SchemaOutcome::Skipped,
            findings: vec![Finding::new(RuleCode::OrphanVertices, "vertex 3 orphaned")],
        };
        assert!(report.is_valid());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_error_report_includes_schema_failure() {
        let report = ValidationReport {
            schema: SchemaOutcome::Failed {
                message: "schema violation at /vertices: not an array".to_string(),
            },
            findings: vec![],
        };
        assert!(!report.is_valid());
        assert!(report.error_report().contains("/vertices"));
    }

    #[test]
    fn test_no_schema_outcome_distinct() {
        let report = ValidationReport {
            schema: SchemaOutcome::NoSchema {
                version: FormatVersion::V08,
            },
            findings: vec![],
        };
        assert!(!report.is_valid());
        assert!(report.error_report().contains("0.8"));
        assert!(matches!(report.schema, SchemaOutcome::NoSchema { .. }));
    }
}
