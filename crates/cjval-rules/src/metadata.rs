//! # Metadata & Document-Shape Rules
//!
//! Advisory checks: missing metadata, unrecognized top-level members, and
//! present-but-empty geometry arrays. Files predating the metadata
//! conventions are common, so none of these make a file invalid by
//! default.

use serde_json::Value;

use cjval_core::CityJsonDocument;

use crate::report::{Finding, RuleCode};

/// Top-level members a CityJSON document may carry.
const ROOT_MEMBERS: [&str; 7] = [
    "type",
    "version",
    "transform",
    "vertices",
    "CityObjects",
    "appearance",
    "metadata",
];

/// Warn when `metadata.crs.epsg` or `metadata.bbox` is absent.
pub fn metadata_presence(doc: &CityJsonDocument) -> Vec<Finding> {
    let mut findings = Vec::new();
    let epsg = doc
        .metadata()
        .and_then(|m| m.crs.as_ref())
        .and_then(|crs| crs.epsg);
    if epsg.is_none() {
        findings.push(Finding::new(
            RuleCode::MetadataPresence,
            "metadata.crs.epsg is absent",
        ));
    }
    if doc.metadata().and_then(|m| m.bbox).is_none() {
        findings.push(Finding::new(
            RuleCode::MetadataPresence,
            "metadata.bbox is absent",
        ));
    }
    findings
}

/// Warn on top-level members outside the recognized set.
pub fn cityjson_properties(doc: &CityJsonDocument) -> Vec<Finding> {
    let Some(root) = doc.raw().as_object() else {
        return Vec::new();
    };
    root.keys()
        .filter(|key| !ROOT_MEMBERS.contains(&key.as_str()))
        .map(|key| {
            Finding::new(
                RuleCode::CityjsonProperties,
                format!("\"{key}\" is not a recognized top-level CityJSON member"),
            )
        })
        .collect()
}

/// Warn when a geometry list or a boundaries array is present but empty.
pub fn geometry_empty(doc: &CityJsonDocument) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        if let Some(geometries) = &object.geometry {
            if geometries.is_empty() {
                findings.push(
                    Finding::new(
                        RuleCode::GeometryEmpty,
                        format!("CityObject \"{id}\" has an empty geometry array"),
                    )
                    .with_objects([id.as_str()]),
                );
            }
            for (index, geometry) in geometries.iter().enumerate() {
                if geometry.boundaries.is_empty_nested() && boundaries_present(doc, id, index) {
                    findings.push(
                        Finding::new(
                            RuleCode::GeometryEmpty,
                            format!(
                                "geometry {index} of CityObject \"{id}\" has empty boundaries"
                            ),
                        )
                        .with_objects([id.as_str()]),
                    );
                }
            }
        }
    }
    findings
}

/// Whether the raw geometry object actually carries a `boundaries` member
/// (the typed model defaults an absent one to an empty tree, and absence is
/// the schema checker's business, not this rule's).
fn boundaries_present(doc: &CityJsonDocument, object_id: &str, geometry_index: usize) -> bool {
    doc.raw()
        .get("CityObjects")
        .and_then(|objects| objects.get(object_id))
        .and_then(|object| object.get("geometry"))
        .and_then(Value::as_array)
        .and_then(|geometries| geometries.get(geometry_index))
        .and_then(|geometry| geometry.get("boundaries"))
        .is_some()
}
