//! # cjval-schema — Schema Conformance & Registries
//!
//! Everything the validation engine consumes as *already-resolved external
//! data*: the JSON Schema for a format version and the CityGML attribute
//! registry.
//!
//! ## Conformance (`conformance`)
//!
//! [`conformance::check_schema`] validates a document against a schema via
//! the `jsonschema` crate and reports the FIRST violation it encounters.
//! This short-circuit is deliberate: the structural rules downstream assume
//! the gross shape schema validation guarantees, so enumerating every
//! schema violation buys nothing.
//!
//! ## Schema Store (`store`)
//!
//! [`SchemaStore`] loads every `*.schema.json` file from a directory at
//! construction and indexes it by format version derived from the filename
//! (`cityjson-v10.schema.json` → 1.0). A version with no schema on disk is
//! the distinct "no schema available" outcome, not a validation failure.
//!
//! Remote retrieval and `$ref` dereferencing of external schema files are
//! out of scope; the store only reads already-resolved local files.
//!
//! ## Attribute Registry (`registry`)
//!
//! [`AttributeRegistry`] maps each city-object kind to its recognized
//! CityGML-derived attribute names and expected value types. A default
//! registry ships embedded; callers may load their own.

pub mod conformance;
pub mod registry;
pub mod store;

pub use conformance::{check_schema, SchemaError};
pub use registry::{AttributeRegistry, AttributeType, RegistryError};
pub use store::{SchemaStore, StoreError};
