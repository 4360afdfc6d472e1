//! # Referential Integrity Rules
//!
//! Each rule inspects one cross-cutting relationship in the document's
//! object graph and reports every violation it finds. Broken references
//! make a file invalid but never abort the remaining rules.

use std::collections::HashMap;

use cjval_core::{CityJsonDocument, CityObjectKind};

use crate::report::{Finding, RuleCode};

/// Every id in a CityObjectGroup's member list must exist in `CityObjects`.
pub fn city_object_groups(doc: &CityJsonDocument) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        if object.kind != CityObjectKind::CityObjectGroup {
            continue;
        }
        for member in object.members.as_deref().unwrap_or(&[]) {
            if !doc.city_objects().contains_key(member) {
                findings.push(
                    Finding::new(
                        RuleCode::CityObjectGroups,
                        format!(
                            "CityObjectGroup \"{id}\" lists member \"{member}\" \
                             which is not a CityObject in this file"
                        ),
                    )
                    .with_objects([id.as_str(), member.as_str()]),
                );
            }
        }
    }
    findings
}

/// Every BuildingPart must be the child of exactly one Building or
/// BuildingPart.
pub fn building_parts(doc: &CityJsonDocument) -> Vec<Finding> {
    required_parent_consistency(doc, CityObjectKind::BuildingPart, RuleCode::BuildingParts)
}

/// Every BuildingInstallation must be the child of exactly one Building or
/// BuildingPart.
pub fn building_installations(doc: &CityJsonDocument) -> Vec<Finding> {
    required_parent_consistency(
        doc,
        CityObjectKind::BuildingInstallation,
        RuleCode::BuildingInstallations,
    )
}

/// Shared body of the part/installation rules, driven by the
/// kind-compatibility table.
fn required_parent_consistency(
    doc: &CityJsonDocument,
    child_kind: CityObjectKind,
    rule: RuleCode,
) -> Vec<Finding> {
    let allowed = child_kind.allowed_parents().unwrap_or(&[]);

    // One pass building the reverse index: object id -> ids listing it
    // as a child.
    let mut referencing_parents: HashMap<&str, Vec<&str>> = HashMap::new();
    for (parent_id, parent) in doc.city_objects() {
        for child_id in parent.child_ids() {
            referencing_parents
                .entry(child_id.as_str())
                .or_default()
                .push(parent_id.as_str());
        }
    }

    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        if object.kind != child_kind {
            continue;
        }
        let parents = referencing_parents
            .get(id.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        match parents {
            [] => findings.push(
                Finding::new(
                    rule,
                    format!("{child_kind} \"{id}\" is not referenced as a child of any CityObject"),
                )
                .with_objects([id.as_str()]),
            ),
            [parent_id] => {
                // contains_key guaranteed: the id came from the index.
                if let Some(parent) = doc.city_objects().get(*parent_id) {
                    if !allowed.contains(&parent.kind) {
                        let expected = allowed
                            .iter()
                            .map(CityObjectKind::as_str)
                            .collect::<Vec<_>>()
                            .join(" or ");
                        findings.push(
                            Finding::new(
                                rule,
                                format!(
                                    "parent \"{parent_id}\" of {child_kind} \"{id}\" has type \
                                     {}; expected {expected}",
                                    parent.kind
                                ),
                            )
                            .with_objects([id.as_str(), *parent_id]),
                        );
                    }
                }
            }
            many => {
                let mut ids: Vec<&str> = many.to_vec();
                ids.sort_unstable();
                findings.push(
                    Finding::new(
                        rule,
                        format!(
                            "{child_kind} \"{id}\" is referenced as a child of {} CityObjects \
                             ({}); expected exactly one",
                            ids.len(),
                            ids.join(", ")
                        ),
                    )
                    .with_objects(std::iter::once(id.as_str()).chain(ids.iter().copied())),
                );
            }
        }
    }
    findings
}

/// Ids in `children`/`parents` must exist, and the relation must be
/// symmetric: if A lists B as child, B must list A as parent, and vice
/// versa.
pub fn parent_child_symmetry(doc: &CityJsonDocument) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        for child_id in object.child_ids() {
            match doc.city_objects().get(child_id) {
                None => findings.push(
                    Finding::new(
                        RuleCode::ParentChildSymmetry,
                        format!(
                            "\"{id}\" lists child \"{child_id}\" which is not a CityObject \
                             in this file"
                        ),
                    )
                    .with_objects([id.as_str(), child_id.as_str()]),
                ),
                Some(child) => {
                    if !child.parent_ids().iter().any(|p| p == id) {
                        findings.push(
                            Finding::new(
                                RuleCode::ParentChildSymmetry,
                                format!(
                                    "\"{id}\" lists \"{child_id}\" as child, but \"{child_id}\" \
                                     does not list \"{id}\" back as parent"
                                ),
                            )
                            .with_objects([id.as_str(), child_id.as_str()]),
                        );
                    }
                }
            }
        }
        for parent_id in object.parent_ids() {
            match doc.city_objects().get(parent_id) {
                None => findings.push(
                    Finding::new(
                        RuleCode::ParentChildSymmetry,
                        format!(
                            "\"{id}\" lists parent \"{parent_id}\" which is not a CityObject \
                             in this file"
                        ),
                    )
                    .with_objects([id.as_str(), parent_id.as_str()]),
                ),
                Some(parent) => {
                    if !parent.child_ids().iter().any(|c| c == id) {
                        findings.push(
                            Finding::new(
                                RuleCode::ParentChildSymmetry,
                                format!(
                                    "\"{id}\" lists \"{parent_id}\" as parent, but \
                                     \"{parent_id}\" does not list \"{id}\" back as child"
                                ),
                            )
                            .with_objects([id.as_str(), parent_id.as_str()]),
                        );
                    }
                }
            }
        }
    }
    findings
}
