//! # Validate Subcommand
//!
//! Loads a CityJSON file, resolves the schema for its declared version
//! from a local directory, and runs the full rule engine. Prints the two
//! report streams and exits 0 (valid), 1 (invalid), or 2 (operational
//! error).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cjval_core::{CityJsonDocument, DuplicateKeys};
use cjval_rules::{SchemaInput, SchemaOutcome, Validator};
use cjval_schema::{AttributeRegistry, SchemaStore};

/// Arguments for the `cjval validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// CityJSON file to validate.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Directory holding cityjson-v*.schema.json files.
    #[arg(long, value_name = "DIR", default_value = "schemas")]
    pub schema_dir: PathBuf,

    /// Skip the schema conformance phase.
    #[arg(long)]
    pub skip_schema: bool,

    /// Tolerate duplicate JSON keys (last value wins) instead of rejecting
    /// the file.
    #[arg(long)]
    pub ignore_duplicate_keys: bool,

    /// Attribute registry JSON file. Defaults to the embedded CityGML
    /// registry.
    #[arg(long, value_name = "FILE")]
    pub registry: Option<PathBuf>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("cannot read {}", args.path.display()))?;

    let mode = if args.ignore_duplicate_keys {
        DuplicateKeys::LastWins
    } else {
        DuplicateKeys::Reject
    };

    let document = match CityJsonDocument::from_str(&text, mode) {
        Ok(document) => document,
        Err(e) => {
            println!("ERROR: {e}");
            println!("\n{} is invalid", args.path.display());
            return Ok(1);
        }
    };

    tracing::info!(
        version = %document.version(),
        objects = document.city_objects().len(),
        vertices = document.vertices().len(),
        "parsed document"
    );

    let registry = match &args.registry {
        Some(path) => AttributeRegistry::from_file(path)
            .with_context(|| format!("cannot load registry {}", path.display()))?,
        None => AttributeRegistry::builtin().context("embedded registry is broken")?,
    };

    // Schema resolution: a missing directory or a version with no schema
    // file is the distinct "no schema available" outcome, not a crash.
    let store = if args.skip_schema || !args.schema_dir.is_dir() {
        None
    } else {
        Some(SchemaStore::new(&args.schema_dir).context("cannot load schema directory")?)
    };

    let schema_input = if args.skip_schema {
        SchemaInput::Skip
    } else {
        match store
            .as_ref()
            .and_then(|s| s.schema_for(document.version()))
        {
            Some(schema) => SchemaInput::Resolved(schema),
            None => SchemaInput::Unavailable,
        }
    };

    let report = Validator::new().validate(&document, schema_input, Some(&registry));

    match &report.schema {
        SchemaOutcome::Passed => println!("schema: conformant"),
        SchemaOutcome::Skipped => println!("schema: skipped"),
        SchemaOutcome::NoSchema { version } => {
            println!("schema: no schema available for version {version}");
        }
        SchemaOutcome::Failed { .. } => println!("schema: FAILED"),
    }

    let errors = report.error_report();
    if !errors.is_empty() {
        println!("\n=== ERRORS ===\n{errors}");
    }
    let warnings = report.warning_report();
    if !warnings.is_empty() {
        println!("\n=== WARNINGS ===\n{warnings}");
    }

    let verdict = match (report.is_valid(), report.is_clean()) {
        (true, true) => "valid, no warnings",
        (true, false) => "valid, with warnings",
        (false, true) => "invalid",
        (false, false) => "invalid, with warnings",
    };
    println!("\n{}: {verdict}", args.path.display());

    if report.is_valid() {
        Ok(0)
    } else {
        Ok(1)
    }
}
