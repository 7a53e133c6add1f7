//! # Dotforge CLI
//!
//! Command-line exporter. Loads a project document, rebuilds the editing
//! session against the chosen platform's capabilities, and emits that
//! platform's source code.
//!
//! ## Usage
//!
//! ```bash
//! dotforge badge.json --platform adafruit_gfx -o badge.ino.inc
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use dotforge_codegen::{platform_by_id, platforms};
use dotforge_core::{FontRegistry, ProjectDocument};

/// Command-line arguments for the exporter.
#[derive(Debug, Clone, Parser)]
#[command(name = "dotforge")]
#[command(about = "Generate embedded display source code from a Dotforge project")]
#[command(version)]
pub struct CliArgs {
    /// Project document to export (JSON)
    #[arg(required_unless_present = "list_platforms")]
    pub project: Option<PathBuf>,

    /// Platform id to generate for, overriding the document's choice
    #[arg(long, env = "DOTFORGE_PLATFORM")]
    pub platform: Option<String>,

    /// Write generated source here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// List available platform ids and exit
    #[arg(long)]
    pub list_platforms: bool,
}

/// One line per platform: the id, then the human-readable name.
#[must_use]
pub fn platform_table() -> String {
    let mut table = String::new();
    for platform in platforms() {
        let _ = writeln!(table, "{:<16} {}", platform.id(), platform.display_name());
    }
    table
}

/// Generate source for an already parsed document.
///
/// # Errors
///
/// Fails when the platform id is unknown, the document does not pass
/// validation, or rendering fails.
pub fn generate_source(
    document: &ProjectDocument,
    platform_override: Option<&str>,
) -> anyhow::Result<String> {
    let id = platform_override.unwrap_or(&document.platform);
    let platform = platform_by_id(id).context("selecting platform")?;
    let session = document
        .to_session(platform.features(), FontRegistry::default())
        .with_context(|| format!("loading project {}", document.name))?;
    tracing::debug!(
        "Generating {} source for {} layers",
        platform.id(),
        session.layer_count()
    );
    let buffer = platform.generate(&session).context("generating source")?;
    Ok(buffer.assemble())
}

/// Load a project document from disk and generate its source.
///
/// # Errors
///
/// Fails on unreadable files, malformed JSON, or generation failures.
pub fn export_project(path: &Path, platform_override: Option<&str>) -> anyhow::Result<String> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document = ProjectDocument::from_json(&raw).context("parsing project document")?;
    generate_source(&document, platform_override)
}
