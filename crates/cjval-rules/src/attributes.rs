//! # CityGML Attribute Rule
//!
//! Checks every attribute used on every city object against the supplied
//! registry. Attributes are extensible by design, so unrecognized names
//! and mismatched types are advisory.

use cjval_core::CityJsonDocument;
use cjval_schema::AttributeRegistry;

use crate::report::{Finding, RuleCode};

/// Warn on attribute names the registry does not recognize for the object's
/// kind, and on values whose JSON type does not match the registered one.
/// Kinds with no registry entry are not checked.
pub fn citygml_attributes(doc: &CityJsonDocument, registry: &AttributeRegistry) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (id, object) in doc.city_objects() {
        let Some(attributes) = &object.attributes else {
            continue;
        };
        let Some(recognized) = registry.attributes_for(object.kind.as_str()) else {
            continue;
        };
        for (name, value) in attributes {
            match recognized.get(name) {
                None => findings.push(
                    Finding::new(
                        RuleCode::CitygmlAttributes,
                        format!(
                            "attribute \"{name}\" on {} \"{id}\" is not a recognized \
                             CityGML attribute",
                            object.kind
                        ),
                    )
                    .with_objects([id.as_str()]),
                ),
                Some(expected) if !expected.matches(value) => findings.push(
                    Finding::new(
                        RuleCode::CitygmlAttributes,
                        format!(
                            "attribute \"{name}\" on {} \"{id}\" should be of type \
                             {expected}",
                            object.kind
                        ),
                    )
                    .with_objects([id.as_str()]),
                ),
                Some(_) => {}
            }
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> AttributeRegistry {
        serde_json::from_value(json!({
            "Building": {
                "measuredHeight": "number",
                "storeysAboveGround": "integer",
                "roofType": "string"
            }
        }))
        .unwrap()
    }

    fn doc(attributes: serde_json::Value) -> CityJsonDocument {
        CityJsonDocument::from_value(json!({
            "type": "CityJSON",
            "version": "1.0",
            "CityObjects": {
                "b1": {"type": "Building", "attributes": attributes}
            },
            "vertices": []
        }))
        .unwrap()
    }

    #[test]
    fn test_recognized_attributes_clean() {
        let doc = doc(json!({"measuredHeight": 11.5, "storeysAboveGround": 3}));
        assert!(citygml_attributes(&doc, &registry()).is_empty());
    }

    #[test]
    fn test_unrecognized_attribute_warns() {
        let doc = doc(json!({"paintColour": "red"}));
        let findings = citygml_attributes(&doc, &registry());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("paintColour"));
    }

    #[test]
    fn test_type_mismatch_warns() {
        let doc = doc(json!({"measuredHeight": "tall"}));
        let findings = citygml_attributes(&doc, &registry());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("should be of type number"));
    }

    #[test]
    fn test_unregistered_kind_not_checked() {
        let doc = CityJsonDocument::from_value(json!({
            "type": "CityJSON",
            "version": "1.0",
            "CityObjects": {
                "r1": {"type": "Road", "attributes": {"anything": true}}
            },
            "vertices": []
        }))
        .unwrap();
        assert!(citygml_attributes(&doc, &registry()).is_empty());
    }
}
