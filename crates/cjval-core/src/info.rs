//! # Document Summary
//!
//! A serializable snapshot of what a document contains, surfaced by the
//! `cjval info` subcommand.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::document::CityJsonDocument;

/// Summary of a parsed document.
#[derive(Debug, Serialize)]
pub struct DocumentInfo {
    /// Declared format version.
    pub cityjson_version: String,
    /// EPSG code from `metadata.crs`, if present.
    pub epsg: Option<i64>,
    /// Bounding box from `metadata.bbox`, if present.
    pub bbox: Option<[f64; 6]>,
    /// Number of city objects.
    pub cityobjects_total: usize,
    /// Number of vertices.
    pub vertices_total: usize,
    /// Distinct city-object kinds present, sorted.
    pub cityobjects_present: Vec<String>,
    /// Distinct geometry primitives present, sorted.
    pub geom_primitives_present: Vec<String>,
    /// Whether the appearance block defines materials.
    pub has_materials: bool,
    /// Whether the appearance block defines textures.
    pub has_textures: bool,
}

impl CityJsonDocument {
    /// Summarize the document.
    pub fn info(&self) -> DocumentInfo {
        let mut kinds = BTreeSet::new();
        let mut primitives = BTreeSet::new();
        for object in self.city_objects().values() {
            kinds.insert(object.kind.as_str());
            for geometry in object.geometries() {
                primitives.insert(geometry.kind.as_str());
            }
        }

        DocumentInfo {
            cityjson_version: self.version().to_string(),
            epsg: self
                .metadata()
                .and_then(|m| m.crs.as_ref())
                .and_then(|crs| crs.epsg),
            bbox: self.metadata().and_then(|m| m.bbox),
            cityobjects_total: self.city_objects().len(),
            vertices_total: self.vertices().len(),
            cityobjects_present: kinds.into_iter().map(str::to_owned).collect(),
            geom_primitives_present: primitives.into_iter().map(str::to_owned).collect(),
            has_materials: self.appearance().is_some_and(|a| !a.materials.is_empty()),
            has_textures: self.appearance().is_some_and(|a| !a.textures.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_info_summary() {
        let doc = CityJsonDocument::from_value(json!({
            "type": "CityJSON",
            "version": "1.0",
            "metadata": {"crs": {"epsg": 7415}},
            "vertices": [[0, 0, 0], [1, 1, 1], [2, 2, 2]],
            "CityObjects": {
                "b1": {
                    "type": "Building",
                    "geometry": [{"type": "MultiSurface", "boundaries": [[[0, 1, 2]]]}]
                },
                "r1": {"type": "Road", "geometry": [{"type": "MultiLineString", "boundaries": [[0, 1]]}]}
            }
        }))
        .unwrap();

        let info = doc.info();
        assert_eq!(info.cityjson_version, "1.0");
        assert_eq!(info.epsg, Some(7415));
        assert_eq!(info.bbox, None);
        assert_eq!(info.cityobjects_total, 2);
        assert_eq!(info.vertices_total, 3);
        assert_eq!(info.cityobjects_present, vec!["Building", "Road"]);
        assert_eq!(info.geom_primitives_present, vec!["MultiLineString", "MultiSurface"]);
        assert!(!info.has_materials);
        assert!(!info.has_textures);
    }
}
