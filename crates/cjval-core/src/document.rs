//! # Document Model
//!
//! The in-memory representation of a parsed CityJSON document. Construction
//! enforces the two gates that must hold before any validation rule runs:
//! the `type` member equals the literal `"CityJSON"`, and the declared
//! `version` is in the supported set. Everything else is left to the schema
//! checker and the rule engine.
//!
//! The document keeps both the raw `serde_json::Value` (the schema checker
//! and the top-level-property rule need the unfiltered tree) and the typed
//! model the rules read. Both are immutable after construction.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::object::CityObject;
use crate::parse::{self, DuplicateKeys};
use crate::version::FormatVersion;

/// A vertex: three coordinates, possibly integer-quantized (see
/// [`Transform`]).
pub type Vertex = [f64; 3];

/// Scale/translate pair converting stored vertex coordinates to real-world
/// coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct Transform {
    /// Per-axis scale factors.
    pub scale: [f64; 3],
    /// Per-axis translation.
    pub translate: [f64; 3],
}

impl Transform {
    /// Map a stored vertex to its real-world coordinate.
    pub fn apply(&self, v: &Vertex) -> Vertex {
        [
            v[0] * self.scale[0] + self.translate[0],
            v[1] * self.scale[1] + self.translate[1],
            v[2] * self.scale[2] + self.translate[2],
        ]
    }
}

/// Coordinate reference system metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Crs {
    /// EPSG code of the CRS.
    #[serde(default)]
    pub epsg: Option<i64>,
}

/// Document metadata block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    /// Coordinate reference system.
    #[serde(default)]
    pub crs: Option<Crs>,
    /// Axis-aligned bounding box: `[minx, miny, minz, maxx, maxy, maxz]`.
    #[serde(default)]
    pub bbox: Option<[f64; 6]>,
}

/// Appearance block: materials, textures, and texture vertex coordinates,
/// referenced by index from per-geometry assignments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Appearance {
    /// Material definitions.
    #[serde(default)]
    pub materials: Vec<Value>,
    /// Texture definitions.
    #[serde(default)]
    pub textures: Vec<Value>,
    /// UV coordinates referenced from texture assignments.
    #[serde(rename = "vertices-texture", default)]
    pub vertices_texture: Vec<[f64; 2]>,
    /// Theme used for textures when a geometry does not name one.
    #[serde(rename = "default-theme-texture", default)]
    pub default_theme_texture: Option<String>,
    /// Theme used for materials when a geometry does not name one.
    #[serde(rename = "default-theme-material", default)]
    pub default_theme_material: Option<String>,
}

/// Typed body of the document; `type` and `version` are handled separately
/// so their failures surface as the dedicated [`ParseError`] variants.
#[derive(Debug, Deserialize)]
struct DocumentBody {
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    vertices: Vec<Vertex>,
    #[serde(rename = "CityObjects", default)]
    city_objects: BTreeMap<String, CityObject>,
    #[serde(default)]
    appearance: Option<Appearance>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

/// A parsed, validated-shape CityJSON document, read-only for the lifetime
/// of a validation run.
#[derive(Debug)]
pub struct CityJsonDocument {
    raw: Value,
    version: FormatVersion,
    transform: Option<Transform>,
    vertices: Vec<Vertex>,
    city_objects: BTreeMap<String, CityObject>,
    appearance: Option<Appearance>,
    metadata: Option<Metadata>,
}

impl CityJsonDocument {
    /// Parse a document from raw text under the given duplicate-key mode.
    pub fn from_str(text: &str, mode: DuplicateKeys) -> Result<Self, ParseError> {
        let raw = parse::value_from_str(text, mode)?;
        Self::from_value(raw)
    }

    /// Build a document from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// - [`ParseError::NotCityJson`] when `type` is missing or not the
    ///   literal `"CityJSON"` — the document is rejected outright and no
    ///   rule runs.
    /// - [`ParseError::MissingVersion`] / [`ParseError::UnsupportedVersion`]
    ///   for a missing or unrecognized `version`.
    /// - [`ParseError::Model`] when the value does not map onto the typed
    ///   model.
    pub fn from_value(raw: Value) -> Result<Self, ParseError> {
        match raw.get("type").and_then(Value::as_str) {
            Some("CityJSON") => {}
            _ => return Err(ParseError::NotCityJson),
        }

        let version = raw
            .get("version")
            .and_then(Value::as_str)
            .ok_or(ParseError::MissingVersion)
            .and_then(FormatVersion::from_str)?;

        let body = DocumentBody::deserialize(&raw).map_err(|e| ParseError::Model(e.to_string()))?;

        Ok(Self {
            raw,
            version,
            transform: body.transform,
            vertices: body.vertices,
            city_objects: body.city_objects,
            appearance: body.appearance,
            metadata: body.metadata,
        })
    }

    /// The unfiltered JSON tree the document was built from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The declared format version.
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// The quantization transform, if any.
    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    /// The shared vertex list.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All city objects, keyed by identifier.
    pub fn city_objects(&self) -> &BTreeMap<String, CityObject> {
        &self.city_objects
    }

    /// The appearance block, if any.
    pub fn appearance(&self) -> Option<&Appearance> {
        self.appearance.as_ref()
    }

    /// The metadata block, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// The real-world coordinate of a stored vertex.
    pub fn real_world(&self, v: &Vertex) -> Vertex {
        match &self.transform {
            Some(t) => t.apply(v),
            None => *v,
        }
    }
}
