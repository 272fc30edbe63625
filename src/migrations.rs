//! Migration gap detection
//!
//! Compares the full table list against the filenames in the migrations
//! directory to find tables with no migration file yet. Matching is
//! substring-based: a table counts as migrated when any filename contains
//! its name. A table name that happens to be a substring of another table's
//! migration filename is therefore missed; this mirrors the documented
//! behavior and is covered by a test rather than special-cased.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Compute the set of tables lacking a migration file.
#[must_use]
pub fn compute_gap(all_tables: &[String], migration_filenames: &[String]) -> BTreeSet<String> {
    all_tables
        .iter()
        .filter(|table| !migration_filenames.iter().any(|file| file.contains(table.as_str())))
        .cloned()
        .collect()
}

/// List the filenames in the migrations directory.
///
/// A missing directory is treated as an empty migration history, so every
/// table lands in the gap.
pub fn scan_migration_filenames(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read migrations directory: {}", dir.display()))?;

    let mut filenames = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read migrations directory entry")?;
        filenames.push(entry.file_name().to_string_lossy().into_owned());
    }
    filenames.sort();

    Ok(filenames)
}
