//! # City Objects — Kind Taxonomy and Parent Compatibility
//!
//! Defines the closed set of CityJSON city-object kinds and the explicit
//! parent-compatibility table. The table is data, not string comparison:
//! every `match` over [`CityObjectKind`] is exhaustive, so adding a kind
//! forces the compatibility rule to account for it at compile time.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geometry::Geometry;

/// All city-object kinds defined by CityJSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CityObjectKind {
    /// A building; may own BuildingParts and BuildingInstallations.
    Building,
    /// A part of a building (wing, annex).
    BuildingPart,
    /// An outer installation attached to a building (balcony, antenna).
    BuildingInstallation,
    /// A bridge; may own BridgeParts and installations.
    Bridge,
    /// A part of a bridge.
    BridgePart,
    /// An installation attached to a bridge.
    BridgeInstallation,
    /// A structural element of a bridge (pylon, anchorage).
    BridgeConstructionElement,
    /// A tunnel; may own TunnelParts and installations.
    Tunnel,
    /// A part of a tunnel.
    TunnelPart,
    /// An installation attached to a tunnel.
    TunnelInstallation,
    /// A named aggregation of other city objects.
    CityObjectGroup,
    /// Street furniture (benches, lampposts).
    CityFurniture,
    /// A generic object not covered by the other kinds.
    GenericCityObject,
    /// A land-use area.
    LandUse,
    /// Vegetation covering an area.
    PlantCover,
    /// A railway.
    Railway,
    /// A road.
    Road,
    /// A single vegetation object (a tree).
    SolitaryVegetationObject,
    /// A triangulated terrain relief.
    #[serde(rename = "TINRelief")]
    TinRelief,
    /// A transport square (plaza).
    TransportSquare,
    /// A water body.
    WaterBody,
}

impl CityObjectKind {
    /// The kind name as it appears in a document's `type` member.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "Building",
            Self::BuildingPart => "BuildingPart",
            Self::BuildingInstallation => "BuildingInstallation",
            Self::Bridge => "Bridge",
            Self::BridgePart => "BridgePart",
            Self::BridgeInstallation => "BridgeInstallation",
            Self::BridgeConstructionElement => "BridgeConstructionElement",
            Self::Tunnel => "Tunnel",
            Self::TunnelPart => "TunnelPart",
            Self::TunnelInstallation => "TunnelInstallation",
            Self::CityObjectGroup => "CityObjectGroup",
            Self::CityFurniture => "CityFurniture",
            Self::GenericCityObject => "GenericCityObject",
            Self::LandUse => "LandUse",
            Self::PlantCover => "PlantCover",
            Self::Railway => "Railway",
            Self::Road => "Road",
            Self::SolitaryVegetationObject => "SolitaryVegetationObject",
            Self::TinRelief => "TINRelief",
            Self::TransportSquare => "TransportSquare",
            Self::WaterBody => "WaterBody",
        }
    }

    /// Kinds a parent of this kind must have, or `None` when the kind is a
    /// top-level object with no parent requirement.
    ///
    /// This is the single source of truth for the part/installation
    /// consistency rules.
    pub fn allowed_parents(&self) -> Option<&'static [CityObjectKind]> {
        match self {
            Self::BuildingPart => Some(&[Self::Building, Self::BuildingPart]),
            Self::BuildingInstallation => Some(&[Self::Building, Self::BuildingPart]),
            Self::BridgePart => Some(&[Self::Bridge, Self::BridgePart]),
            Self::BridgeInstallation => Some(&[Self::Bridge, Self::BridgePart]),
            Self::BridgeConstructionElement => Some(&[Self::Bridge, Self::BridgePart]),
            Self::TunnelPart => Some(&[Self::Tunnel, Self::TunnelPart]),
            Self::TunnelInstallation => Some(&[Self::Tunnel, Self::TunnelPart]),
            Self::Building
            | Self::Bridge
            | Self::Tunnel
            | Self::CityObjectGroup
            | Self::CityFurniture
            | Self::GenericCityObject
            | Self::LandUse
            | Self::PlantCover
            | Self::Railway
            | Self::Road
            | Self::SolitaryVegetationObject
            | Self::TinRelief
            | Self::TransportSquare
            | Self::WaterBody => None,
        }
    }
}

impl fmt::Display for CityObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A semantic urban entity, identified by its key in `CityObjects`.
#[derive(Debug, Clone, Deserialize)]
pub struct CityObject {
    /// The object kind.
    #[serde(rename = "type")]
    pub kind: CityObjectKind,

    /// Geometries of this object. `None` when the member is absent,
    /// `Some(vec![])` when present but empty — the distinction feeds the
    /// empty-geometry rule.
    #[serde(default)]
    pub geometry: Option<Vec<Geometry>>,

    /// Free-form attributes (checked against the CityGML registry).
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,

    /// Ids of child objects.
    #[serde(default)]
    pub children: Option<Vec<String>>,

    /// Ids of parent objects.
    #[serde(default)]
    pub parents: Option<Vec<String>>,

    /// Member ids (CityObjectGroup only).
    #[serde(default)]
    pub members: Option<Vec<String>>,
}

impl CityObject {
    /// The object's geometries, empty when the member is absent.
    pub fn geometries(&self) -> &[Geometry] {
        self.geometry.as_deref().unwrap_or(&[])
    }

    /// Ids listed in `children`, empty when absent.
    pub fn child_ids(&self) -> &[String] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Ids listed in `parents`, empty when absent.
    pub fn parent_ids(&self) -> &[String] {
        self.parents.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip() {
        let kind: CityObjectKind = serde_json::from_value(json!("BuildingPart")).unwrap();
        assert_eq!(kind, CityObjectKind::BuildingPart);
        assert_eq!(serde_json::to_value(kind).unwrap(), json!("BuildingPart"));
    }

    #[test]
    fn test_tin_relief_rename() {
        let kind: CityObjectKind = serde_json::from_value(json!("TINRelief")).unwrap();
        assert_eq!(kind, CityObjectKind::TinRelief);
        assert_eq!(kind.as_str(), "TINRelief");
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let result = serde_json::from_value::<CityObjectKind>(json!("Skyscraper"));
        assert!(result.is_err());
    }

    #[test]
    fn test_allowed_parents_table() {
        assert_eq!(
            CityObjectKind::BuildingPart.allowed_parents(),
            Some(&[CityObjectKind::Building, CityObjectKind::BuildingPart][..])
        );
        assert_eq!(
            CityObjectKind::TunnelInstallation.allowed_parents(),
            Some(&[CityObjectKind::Tunnel, CityObjectKind::TunnelPart][..])
        );
        assert_eq!(CityObjectKind::Building.allowed_parents(), None);
        assert_eq!(CityObjectKind::WaterBody.allowed_parents(), None);
    }

    #[test]
    fn test_city_object_defaults() {
        let object: CityObject = serde_json::from_value(json!({"type": "Road"})).unwrap();
        assert!(object.geometry.is_none());
        assert!(object.geometries().is_empty());
        assert!(object.child_ids().is_empty());
        assert!(object.parent_ids().is_empty());
    }

    #[test]
    fn test_city_object_empty_geometry_preserved() {
        let object: CityObject =
            serde_json::from_value(json!({"type": "Road", "geometry": []})).unwrap();
        assert_eq!(object.geometry.as_deref(), Some(&[][..]));
    }
}
