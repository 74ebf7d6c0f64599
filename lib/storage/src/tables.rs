//! Loading of the build input tables.
//!
//! All three tables are JSON Lines files, one row object per line, matching
//! the row structs in `gamerec-core`. Collaborators that fetch from remote
//! sources are responsible for producing these files; this module only ever
//! reads them.
//!
//! Undecodable lines are skipped and counted rather than failing the whole
//! load, but a missing file or a file that yields no valid rows at all is
//! fatal.

use gamerec_core::{CatalogRow, Error, Result, ReviewRow, TagRow};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Load the catalog table.
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogRow>> {
    load_rows(path, "catalog")
}

/// Load the review summary table.
pub fn load_reviews(path: &Path) -> Result<Vec<ReviewRow>> {
    load_rows(path, "reviews")
}

/// Load the tag summary table.
pub fn load_tags(path: &Path) -> Result<Vec<TagRow>> {
    load_rows(path, "tags")
}

fn load_rows<T: DeserializeOwned>(path: &Path, table: &str) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(Error::MissingInputFile(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    let mut non_empty = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        non_empty += 1;
        match serde_json::from_str::<T>(&line) {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                warn!(table, line = line_no + 1, error = %e, "skipping malformed row");
            }
        }
    }

    if rows.is_empty() && non_empty > 0 {
        return Err(Error::SchemaMismatch(format!(
            "{table} table at {} contains no decodable rows",
            path.display()
        )));
    }

    info!(table, rows = rows.len(), skipped, "table loaded");
    Ok(rows)
}
