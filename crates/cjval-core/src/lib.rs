//! # cjval-core — Foundational Types for the CityJSON Validation Suite
//!
//! This crate is the bedrock of the validation suite. It defines the parsed
//! document model and the parsing path that produces it. Every other crate
//! in the workspace depends on `cjval-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for open-looking strings.** `CityObjectKind`,
//!    `GeometryKind`, and `FormatVersion` are tagged enumerations, not bare
//!    strings. The parent-compatibility rule matches exhaustively over
//!    `CityObjectKind`, so adding a kind forces every consumer to handle it
//!    at compile time.
//!
//! 2. **Duplicate keys are rejected during parsing, not after.** Once a JSON
//!    object literal has been decoded into a map, colliding keys are
//!    unrecoverably lost to last-write-wins. [`parse::value_from_str`] runs
//!    the collision check inside the deserializer so the document is
//!    rejected before any data loss occurs.
//!
//! 3. **The document is read-only after construction.** [`CityJsonDocument`]
//!    exposes accessors, not mutable state. Validation rules are pure
//!    functions over it and stay safely parallelizable and idempotent.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cjval-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod geometry;
pub mod info;
pub mod object;
pub mod parse;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use document::{Appearance, CityJsonDocument, Crs, Metadata, Transform, Vertex};
pub use error::ParseError;
pub use geometry::{Boundaries, Geometry, GeometryKind, SemanticSurface, SemanticValues, Semantics};
pub use info::DocumentInfo;
pub use object::{CityObject, CityObjectKind};
pub use parse::DuplicateKeys;
pub use version::FormatVersion;
