//! # Geometry — Primitives, Boundary Trees, Semantics
//!
//! A geometry's `boundaries` member is a nested array of vertex indices
//! whose depth depends on the primitive kind (a Solid is an array of shells
//! of surfaces of rings of indices). The model keeps it as a recursive tree
//! so the alignment and vertex-usage rules can walk it without caring about
//! the kind up front; the kind's expected depth is available separately for
//! rules that do.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// All geometry primitive kinds defined by CityJSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// A set of points.
    MultiPoint,
    /// A set of line strings.
    MultiLineString,
    /// A set of surfaces.
    MultiSurface,
    /// A set of adjoining surfaces forming one surface.
    CompositeSurface,
    /// A single solid.
    Solid,
    /// A set of solids.
    MultiSolid,
    /// A set of adjoining solids forming one solid.
    CompositeSolid,
}

impl GeometryKind {
    /// The kind name as it appears in a geometry's `type` member.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiSurface => "MultiSurface",
            Self::CompositeSurface => "CompositeSurface",
            Self::Solid => "Solid",
            Self::MultiSolid => "MultiSolid",
            Self::CompositeSolid => "CompositeSolid",
        }
    }

    /// Nesting depth of a well-formed `boundaries` array for this kind,
    /// counting a vertex index as depth 0.
    pub fn boundary_depth(&self) -> usize {
        match self {
            Self::MultiPoint => 1,
            Self::MultiLineString => 2,
            Self::MultiSurface | Self::CompositeSurface => 3,
            Self::Solid => 4,
            Self::MultiSolid | Self::CompositeSolid => 5,
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spatial primitive owned by exactly one city object.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// The primitive kind.
    #[serde(rename = "type")]
    pub kind: GeometryKind,

    /// Level of detail; a number in most versions, a string in some.
    #[serde(default)]
    pub lod: Option<Value>,

    /// Nested vertex-index structure.
    #[serde(default)]
    pub boundaries: Boundaries,

    /// Semantic surface classification, if present.
    #[serde(default)]
    pub semantics: Option<Semantics>,

    /// Per-theme material assignments (indices into `appearance.materials`).
    /// Kept raw; the appearance range rule walks it generically.
    #[serde(default)]
    pub material: Option<Value>,

    /// Per-theme texture assignments (indices into `appearance.textures`
    /// and `appearance.vertices-texture`). Kept raw like `material`.
    #[serde(default)]
    pub texture: Option<Value>,
}

/// A node of the nested `boundaries` structure: either a vertex index or a
/// list of deeper nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Boundaries {
    /// A leaf: an index into the document's vertex list.
    Index(u64),
    /// An array level (ring, surface, shell, ... depending on depth).
    Nested(Vec<Boundaries>),
}

impl Default for Boundaries {
    fn default() -> Self {
        Boundaries::Nested(Vec::new())
    }
}

impl Boundaries {
    /// True for an array node with no elements.
    pub fn is_empty_nested(&self) -> bool {
        matches!(self, Boundaries::Nested(items) if items.is_empty())
    }

    /// Depth of this node: 0 for an index leaf, 1 + deepest child otherwise.
    pub fn depth(&self) -> usize {
        match self {
            Boundaries::Index(_) => 0,
            Boundaries::Nested(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// Insert every vertex index reachable from this node into `out`.
    pub fn collect_indices(&self, out: &mut HashSet<usize>) {
        match self {
            Boundaries::Index(i) => {
                out.insert(*i as usize);
            }
            Boundaries::Nested(items) => {
                for item in items {
                    item.collect_indices(out);
                }
            }
        }
    }

    /// The largest vertex index reachable from this node, if any.
    pub fn max_index(&self) -> Option<u64> {
        match self {
            Boundaries::Index(i) => Some(*i),
            Boundaries::Nested(items) => items.iter().filter_map(Self::max_index).max(),
        }
    }
}

/// Semantic surface classification attached to a geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Semantics {
    /// Semantic surface descriptors.
    #[serde(default)]
    pub surfaces: Vec<SemanticSurface>,

    /// Per-surface indices into `surfaces`, shaped like the boundary
    /// structure one level above the surfaces. Null leaves mean the surface
    /// is ungrouped.
    #[serde(default)]
    pub values: Option<SemanticValues>,
}

/// One semantic surface descriptor (RoofSurface, WallSurface, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct SemanticSurface {
    /// The surface classification name.
    #[serde(rename = "type")]
    pub surface_type: String,

    /// Additional descriptor attributes (parent, children, free-form).
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// A node of the `semantics.values` structure: either one semantic slot
/// (an index into `surfaces`, or null) or a list of deeper nodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SemanticValues {
    /// One semantic slot.
    Leaf(Option<u64>),
    /// An array level mirroring the boundary structure.
    Nested(Vec<SemanticValues>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn boundaries(value: serde_json::Value) -> Boundaries {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_boundary_depth_per_kind() {
        assert_eq!(GeometryKind::MultiPoint.boundary_depth(), 1);
        assert_eq!(GeometryKind::MultiSurface.boundary_depth(), 3);
        assert_eq!(GeometryKind::Solid.boundary_depth(), 4);
        assert_eq!(GeometryKind::CompositeSolid.boundary_depth(), 5);
    }

    #[test]
    fn test_boundaries_depth() {
        assert_eq!(boundaries(json!([2, 44, 0])).depth(), 1);
        assert_eq!(boundaries(json!([[2, 44, 0], [7, 8, 9]])).depth(), 2);
        assert_eq!(boundaries(json!([[[0, 3, 2, 1]], [[4, 5, 6, 7]]])).depth(), 3);
    }

    #[test]
    fn test_boundaries_collect_and_max() {
        let b = boundaries(json!([[[0, 3, 2, 1]], [[4, 5, 6, 7]]]));
        let mut seen = HashSet::new();
        b.collect_indices(&mut seen);
        assert_eq!(seen.len(), 8);
        assert!(seen.contains(&0) && seen.contains(&7));
        assert_eq!(b.max_index(), Some(7));
    }

    #[test]
    fn test_empty_boundaries() {
        let b = Boundaries::default();
        assert!(b.is_empty_nested());
        assert_eq!(b.max_index(), None);
    }

    #[test]
    fn test_semantic_values_untagged() {
        let values: SemanticValues = serde_json::from_value(json!([0, null, 2])).unwrap();
        let SemanticValues::Nested(slots) = values else {
            panic!("expected nested values");
        };
        assert!(matches!(slots[0], SemanticValues::Leaf(Some(0))));
        assert!(matches!(slots[1], SemanticValues::Leaf(None)));
        assert!(matches!(slots[2], SemanticValues::Leaf(Some(2))));
    }

    #[test]
    fn test_geometry_parses() {
        let g: Geometry = serde_json::from_value(json!({
            "type": "MultiSurface",
            "lod": 2,
            "boundaries": [[[0, 1, 2]]],
            "semantics": {
                "surfaces": [{"type": "RoofSurface"}, {"type": "WallSurface", "slope": 33.4}],
                "values": [1]
            }
        }))
        .unwrap();
        assert_eq!(g.kind, GeometryKind::MultiSurface);
        let semantics = g.semantics.unwrap();
        assert_eq!(semantics.surfaces.len(), 2);
        assert_eq!(semantics.surfaces[1].surface_type, "WallSurface");
        assert!(semantics.surfaces[1].attributes.contains_key("slope"));
    }

    proptest! {
        #[test]
        fn prop_collected_indices_match_leaves(indices in prop::collection::vec(0u64..500, 1..40)) {
            let ring = Boundaries::Nested(indices.iter().map(|i| Boundaries::Index(*i)).collect());
            let surface = Boundaries::Nested(vec![ring]);
            let mut seen = HashSet::new();
            surface.collect_indices(&mut seen);
            let expected: HashSet<usize> = indices.iter().map(|i| *i as usize).collect();
            prop_assert_eq!(seen, expected);
            prop_assert_eq!(surface.max_index(), indices.iter().copied().max());
            prop_assert_eq!(surface.depth(), 2);
        }
    }
}
