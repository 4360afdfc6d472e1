//! # Appearance Range Rule
//!
//! Per-geometry material and texture assignments reference the appearance
//! block by index. A dangling index is a broken reference, same as a
//! dangling object id. The assignments are kept raw in the model (their
//! nesting mirrors the boundary structure), so this rule walks them
//! generically.

use std::collections::BTreeSet;

use serde_json::Value;

use cjval_core::CityJsonDocument;

use crate::report::{Finding, RuleCode};

/// Check material/texture indices against the appearance arrays, and the
/// default-theme pointers against the themes actually used.
pub fn appearance_ranges(doc: &CityJsonDocument) -> Vec<Finding> {
    let material_count = doc.appearance().map_or(0, |a| a.materials.len());
    let texture_count = doc.appearance().map_or(0, |a| a.textures.len());
    let uv_count = doc.appearance().map_or(0, |a| a.vertices_texture.len());

    let mut findings = Vec::new();
    let mut material_themes = BTreeSet::new();
    let mut texture_themes = BTreeSet::new();

    for (id, object) in doc.city_objects() {
        for (index, geometry) in object.geometries().iter().enumerate() {
            if let Some(themes) = geometry.material.as_ref().and_then(Value::as_object) {
                for (theme, assignment) in themes {
                    material_themes.insert(theme.clone());
                    for i in assignment_indices(assignment) {
                        if i as usize >= material_count {
                            findings.push(
                                Finding::new(
                                    RuleCode::AppearanceRanges,
                                    format!(
                                        "geometry {index} of CityObject \"{id}\": material \
                                         index {i} out of range ({material_count} materials)"
                                    ),
                                )
                                .with_objects([id.as_str()]),
                            );
                        }
                    }
                }
            }
            if let Some(themes) = geometry.texture.as_ref().and_then(Value::as_object) {
                for (theme, assignment) in themes {
                    texture_themes.insert(theme.clone());
                    for ring in innermost_rings(assignment) {
                        // First entry indexes `textures`, the rest index
                        // `vertices-texture`; a null first entry means the
                        // surface is untextured.
                        if let Some(t) = ring.first().and_then(Value::as_u64) {
                            if t as usize >= texture_count {
                                findings.push(
                                    Finding::new(
                                        RuleCode::AppearanceRanges,
                                        format!(
                                            "geometry {index} of CityObject \"{id}\": texture \
                                             index {t} out of range ({texture_count} textures)"
                                        ),
                                    )
                                    .with_objects([id.as_str()]),
                                );
                            }
                        }
                        for uv in ring.iter().skip(1).filter_map(Value::as_u64) {
                            if uv as usize >= uv_count {
                                findings.push(
                                    Finding::new(
                                        RuleCode::AppearanceRanges,
                                        format!(
                                            "geometry {index} of CityObject \"{id}\": \
                                             texture-vertex index {uv} out of range \
                                             ({uv_count} texture vertices)"
                                        ),
                                    )
                                    .with_objects([id.as_str()]),
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    if let Some(appearance) = doc.appearance() {
        if let Some(theme) = &appearance.default_theme_material {
            if !material_themes.contains(theme) {
                findings.push(Finding::new(
                    RuleCode::AppearanceRanges,
                    format!("default-theme-material \"{theme}\" is not used by any geometry"),
                ));
            }
        }
        if let Some(theme) = &appearance.default_theme_texture {
            if !texture_themes.contains(theme) {
                findings.push(Finding::new(
                    RuleCode::AppearanceRanges,
                    format!("default-theme-texture \"{theme}\" is not used by any geometry"),
                ));
            }
        }
    }

    findings
}

/// Integer leaves of a material assignment (`"value": 0` or a nested
/// `"values"` array with nulls for unassigned surfaces).
fn assignment_indices(assignment: &Value) -> Vec<u64> {
    let mut out = Vec::new();
    let source = assignment
        .get("values")
        .or_else(|| assignment.get("value"))
        .unwrap_or(assignment);
    collect_integers(source, &mut out);
    out
}

fn collect_integers(value: &Value, out: &mut Vec<u64>) {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_u64() {
                out.push(i);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_integers(item, out);
            }
        }
        _ => {}
    }
}

/// Innermost arrays of a texture assignment: arrays whose elements are all
/// numbers or nulls.
fn innermost_rings(assignment: &Value) -> Vec<&Vec<Value>> {
    let mut out = Vec::new();
    let source = assignment.get("values").unwrap_or(assignment);
    walk_rings(source, &mut out);
    out
}

fn walk_rings<'v>(value: &'v Value, out: &mut Vec<&'v Vec<Value>>) {
    if let Value::Array(items) = value {
        if !items.is_empty() && items.iter().all(|i| i.is_number() || i.is_null()) {
            out.push(items);
        } else {
            for item in items {
                walk_rings(item, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(appearance: Option<serde_json::Value>, geometry_extras: serde_json::Value) -> CityJsonDocument {
        let mut geometry = json!({
            "type": "MultiSurface",
            "boundaries": [[[0, 1, 2]]]
        });
        for (key, value) in geometry_extras.as_object().unwrap() {
            geometry[key] = value.clone();
        }
        let mut value = json!({
            "type": "CityJSON",
            "version": "1.0",
            "CityObjects": {
                "b1": {"type": "Building", "geometry": [geometry]}
            },
            "vertices": [[0, 0, 0], [1, 0, 0], [1, 1, 0]]
        });
        if let Some(appearance) = appearance {
            value["appearance"] = appearance;
        }
        CityJsonDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_material_in_range() {
        let doc = doc(
            Some(json!({"materials": [{"name": "brick"}, {"name": "glass"}]})),
            json!({"material": {"visual": {"values": [1]}}}),
        );
        assert!(appearance_ranges(&doc).is_empty());
    }

    #[test]
    fn test_material_out_of_range() {
        let doc = doc(
            Some(json!({"materials": [{"name": "brick"}]})),
            json!({"material": {"visual": {"values": [3]}}}),
        );
        let findings = appearance_ranges(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("material index 3"));
    }

    #[test]
    fn test_texture_indices_checked() {
        let doc = doc(
            Some(json!({
                "textures": [{"image": "wall.png"}],
                "vertices-texture": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]
            })),
            json!({"texture": {"winter": {"values": [[[0, 0, 1, 2]]]}}}),
        );
        assert!(appearance_ranges(&doc).is_empty());

        let doc = doc(
            Some(json!({
                "textures": [{"image": "wall.png"}],
                "vertices-texture": [[0.0, 0.0]]
            })),
            json!({"texture": {"winter": {"values": [[[2, 0, 9]]]}}}),
        );
        let findings = appearance_ranges(&doc);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().any(|f| f.message.contains("texture index 2")));
        assert!(findings.iter().any(|f| f.message.contains("texture-vertex index 9")));
    }

    #[test]
    fn test_null_texture_slot_ignored() {
        let doc = doc(
            Some(json!({"textures": [{"image": "wall.png"}], "vertices-texture": []})),
            json!({"texture": {"winter": {"values": [[[null]]]}}}),
        );
        assert!(appearance_ranges(&doc).is_empty());
    }

    #[test]
    fn test_dangling_default_theme() {
        let doc = doc(
            Some(json!({
                "materials": [{"name": "brick"}],
                "default-theme-material": "nocturnal"
            })),
            json!({"material": {"visual": {"values": [0]}}}),
        );
        let findings = appearance_ranges(&doc);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("nocturnal"));
    }

    #[test]
    fn test_no_appearance_clean() {
        let doc = doc(None, json!({}));
        assert!(appearance_ranges(&doc).is_empty());
    }
}
