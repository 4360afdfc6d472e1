//! # cjval-cli — Subcommand Handlers
//!
//! Thin drivers wiring file I/O, schema-directory resolution, and registry
//! loading around the validation engine. All domain logic lives in
//! `cjval-rules`.

pub mod info;
pub mod validate;
