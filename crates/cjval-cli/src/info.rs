//! # Info Subcommand
//!
//! Prints a JSON summary of a CityJSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use cjval_core::{CityJsonDocument, DuplicateKeys};

/// Arguments for the `cjval info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// CityJSON file to summarize.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

/// Execute the info subcommand.
pub fn run_info(args: &InfoArgs) -> Result<u8> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("cannot read {}", args.path.display()))?;

    // Summaries are diagnostic; read leniently.
    let document = CityJsonDocument::from_str(&text, DuplicateKeys::LastWins)
        .with_context(|| format!("cannot parse {}", args.path.display()))?;

    let info = document.info();
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(0)
}
