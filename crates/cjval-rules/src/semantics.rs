//! # Semantic-Array Alignment
//!
//! A geometry's `semantics.values` array must mirror the shape of its
//! `boundaries` one level above the surfaces: each surface gets exactly one
//! semantic slot, and each non-null slot must index into
//! `semantics.surfaces`. Purely structural — no geometric computation.

use cjval_core::{Boundaries, CityJsonDocument, SemanticValues};

use crate::report::{Finding, RuleCode};

/// Check every geometry carrying a `semantics` block.
pub fn semantics_alignment(doc: &CityJsonDocument) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        for (index, geometry) in object.geometries().iter().enumerate() {
            let Some(semantics) = &geometry.semantics else {
                continue;
            };
            let Some(values) = &semantics.values else {
                continue;
            };
            check_node(
                values,
                &geometry.boundaries,
                semantics.surfaces.len(),
                id,
                index,
                &mut findings,
            );
        }
    }
    findings
}

/// Recursive congruence walk. A boundaries node of depth 2 is one surface
/// (an array of rings of indices) and must line up with a single semantic
/// slot; every level above must match element-for-element.
fn check_node(
    values: &SemanticValues,
    boundaries: &Boundaries,
    surface_count: usize,
    object_id: &str,
    geometry_index: usize,
    findings: &mut Vec<Finding>,
) {
    if boundaries.depth() == 2 {
        match values {
            SemanticValues::Leaf(None) => {}
            SemanticValues::Leaf(Some(surface)) => {
                if *surface as usize >= surface_count {
                    findings.push(
                        Finding::new(
                            RuleCode::SemanticsAlignment,
                            format!(
                                "geometry {geometry_index} of CityObject \"{object_id}\": \
                                 semantics surface index {surface} out of range \
                                 ({surface_count} surfaces)"
                            ),
                        )
                        .with_objects([object_id]),
                    );
                }
            }
            SemanticValues::Nested(_) => findings.push(mismatch(object_id, geometry_index)),
        }
        return;
    }

    match (values, boundaries) {
        (SemanticValues::Nested(slots), Boundaries::Nested(parts)) => {
            if slots.len() != parts.len() {
                findings.push(mismatch(object_id, geometry_index));
                return;
            }
            for (slot, part) in slots.iter().zip(parts) {
                check_node(slot, part, surface_count, object_id, geometry_index, findings);
            }
        }
        // A lone slot where structure is expected, or boundaries too
        // shallow to carry surfaces at all.
        _ => findings.push(mismatch(object_id, geometry_index)),
    }
}

fn mismatch(object_id: &str, geometry_index: usize) -> Finding {
    Finding::new(
        RuleCode::SemanticsAlignment,
        format!(
            "geometry {geometry_index} of CityObject \"{object_id}\": semantics values array \
             does not match the shape of boundaries"
        ),
    )
    .with_objects([object_id])
}
