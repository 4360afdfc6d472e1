//! # Vertex Usage Rules
//!
//! Linear passes over the vertex list and every boundary tree. Duplicate
//! and orphan vertices are legal but wasteful (warnings); an index past the
//! end of the vertex list is a broken reference (error). All passes build
//! hash lookups — no all-pairs comparison, so large vertex counts stay
//! cheap.

use std::collections::{HashMap, HashSet};

use cjval_core::CityJsonDocument;

use crate::report::{Finding, RuleCode};

/// Group vertices by post-transform coordinate; every group of size > 1 is
/// one warning naming all member indices.
pub fn duplicate_vertices(doc: &CityJsonDocument) -> Vec<Finding> {
    // Keyed on the exact bit patterns of the transformed coordinates;
    // equal coordinates hash equal, and JSON input never yields NaN.
    let mut groups: HashMap<[u64; 3], Vec<usize>> = HashMap::new();
    for (index, vertex) in doc.vertices().iter().enumerate() {
        let world = doc.real_world(vertex);
        let key = [world[0].to_bits(), world[1].to_bits(), world[2].to_bits()];
        groups.entry(key).or_default().push(index);
    }

    let mut duplicates: Vec<Vec<usize>> = groups
        .into_values()
        .filter(|group| group.len() > 1)
        .collect();
    duplicates.sort();

    duplicates
        .into_iter()
        .map(|group| {
            let world = doc.real_world(&doc.vertices()[group[0]]);
            let indices = group
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Finding::new(
                RuleCode::DuplicateVertices,
                format!(
                    "vertices {indices} collapse to the same coordinate \
                     ({}, {}, {})",
                    world[0], world[1], world[2]
                ),
            )
        })
        .collect()
}

/// Any vertex index never referenced by a boundary is one warning.
pub fn orphan_vertices(doc: &CityJsonDocument) -> Vec<Finding> {
    let referenced = referenced_indices(doc);
    (0..doc.vertices().len())
        .filter(|index| !referenced.contains(index))
        .map(|index| {
            Finding::new(
                RuleCode::OrphanVertices,
                format!("vertex {index} is not referenced by any geometry"),
            )
        })
        .collect()
}

/// Any boundary index at or past the end of the vertex list is an error;
/// one finding per offending geometry, listing the offending indices.
pub fn vertex_index_bounds(doc: &CityJsonDocument) -> Vec<Finding> {
    let vertex_count = doc.vertices().len();
    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        for (index, geometry) in object.geometries().iter().enumerate() {
            let mut seen = HashSet::new();
            geometry.boundaries.collect_indices(&mut seen);
            let mut out_of_range: Vec<usize> =
                seen.into_iter().filter(|i| *i >= vertex_count).collect();
            if out_of_range.is_empty() {
                continue;
            }
            out_of_range.sort_unstable();
            let listed = out_of_range
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            findings.push(
                Finding::new(
                    RuleCode::VertexIndexBounds,
                    format!(
                        "geometry {index} of CityObject \"{id}\" references vertices {listed} \
                         but the file has {vertex_count} vertices"
                    ),
                )
                .with_objects([id.as_str()]),
            );
        }
    }
    findings
}

fn referenced_indices(doc: &CityJsonDocument) -> HashSet<usize> {
    let mut referenced = HashSet::new();
    for object in doc.city_objects().values() {
        for geometry in object.geometries() {
            geometry.boundaries.collect_indices(&mut referenced);
        }
    }
    referenced
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(vertices: Value, transform: Option<Value>, geometry: Value) -> CityJsonDocument {
        let mut value = json!({
            "type": "CityJSON",
            "version": "1.0",
            "CityObjects": {
                "b1": {"type": "Building", "geometry": [geometry]}
            },
            "vertices": vertices
        });
        if let Some(transform) = transform {
            value["transform"] = transform;
        }
        CityJsonDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_duplicate_pair_reported_once() {
        let doc = doc(
            json!([[0, 0, 0], [1, 1, 1], [0, 0, 0]]),
            None,
            json!({"type": "MultiPoint", "boundaries": [0, 1, 2]}),
        );
        let findings = duplicate_vertices(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("0, 2"));
    }

    #[test]
    fn test_duplicates_detected_post_transform() {
        // Distinct stored coordinates that collapse under the transform.
        let doc = doc(
            json!([[10, 0, 0], [20, 0, 0]]),
            Some(json!({"scale": [0.0, 1.0, 1.0], "translate": [5.0, 0.0, 0.0]})),
            json!({"type": "MultiPoint", "boundaries": [0, 1]}),
        );
        let findings = duplicate_vertices(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("0, 1"));
    }

    #[test]
    fn test_distinct_vertices_clean() {
        let doc = doc(
            json!([[0, 0, 0], [1, 0, 0], [2, 0, 0]]),
            None,
            json!({"type": "MultiPoint", "boundaries": [0, 1, 2]}),
        );
        assert!(duplicate_vertices(&doc).is_empty());
    }

    #[test]
    fn test_orphan_vertex_reported() {
        let doc = doc(
            json!([[0, 0, 0], [1, 0, 0], [2, 0, 0]]),
            None,
            json!({"type": "MultiPoint", "boundaries": [0, 2]}),
        );
        let findings = orphan_vertices(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("vertex 1"));
    }

    #[test]
    fn test_referencing_vertex_clears_orphan() {
        let doc = doc(
            json!([[0, 0, 0], [1, 0, 0]]),
            None,
            json!({"type": "MultiPoint", "boundaries": [0, 1]}),
        );
        assert!(orphan_vertices(&doc).is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let doc = doc(
            json!([[0, 0, 0], [1, 0, 0]]),
            None,
            json!({"type": "MultiPoint", "boundaries": [0, 1, 99]}),
        );
        let findings = vertex_index_bounds(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("99"));
        assert!(findings[0].message.contains("2 vertices"));
        assert_eq!(findings[0].severity, crate::report::Severity::Error);
    }

    #[test]
    fn test_in_range_indices_pass() {
        let doc = doc(
            json!([[0, 0, 0], [1, 0, 0]]),
            None,
            json!({"type": "MultiPoint", "boundaries": [0, 1]}),
        );
        assert!(vertex_index_bounds(&doc).is_empty());
    }
}
