//! # cjval-rules — The Validation Engine
//!
//! The ordered set of structural and semantic rule-checkers that run over a
//! parsed [`cjval_core::CityJsonDocument`] and produce two independent
//! result streams: hard errors (the file is invalid) and warnings
//! (suspicious but legal).
//!
//! ## Engine Flow
//!
//! 1. **Schema conformance** runs first and is fatal: a failure (or a
//!    missing schema) short-circuits the run, because every later rule
//!    assumes the gross shape the schema guarantees.
//! 2. **Every remaining rule runs**, accumulating findings. No rule aborts
//!    the others; violations are batch diagnostics for data producers.
//!
//! ## Rule Contract
//!
//! Each rule is a pure, total function `fn(&CityJsonDocument) ->
//! Vec<Finding>`: it reads the whole document, never mutates it, reports
//! every violation it finds, and depends on no other rule's output. Rules
//! are therefore order-independent and safely parallelizable; the engine
//! runs them sequentially because a single linear pass per rule is already
//! cheap.
//!
//! Severity is policy, not structure: findings carry their rule's default
//! severity and the engine re-stamps them from its [`SeverityPolicy`], so a
//! caller can promote, say, missing metadata to a hard error without
//! touching rule logic.

pub mod appearance;
pub mod attributes;
pub mod engine;
pub mod metadata;
pub mod refs;
pub mod report;
pub mod semantics;
pub mod vertices;

pub use engine::{SchemaInput, Validator};
pub use report::{Finding, RuleCode, SchemaOutcome, Severity, SeverityPolicy, ValidationReport};
