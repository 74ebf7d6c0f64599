//! Persistence of the feature bundle.
//!
//! One build produces one [`StoredBundle`]: the weighted matrix with its
//! vocabularies plus the row-aligned cleaned catalog. The bundle is written
//! with bincode to a temp file and renamed into place, so readers never see
//! a torn file.

use anyhow::Context;
use gamerec_core::{CatalogItem, Error, Result};
use gamerec_features::FeatureBundle;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredBundle {
    pub bundle: FeatureBundle,
    pub catalog: Vec<CatalogItem>,
    /// Unix seconds of the build that produced this bundle.
    pub created_at: u64,
}

/// Write the bundle and catalog atomically to `path`.
pub fn save_bundle(path: &Path, bundle: &FeatureBundle, catalog: &[CatalogItem]) -> Result<()> {
    bundle.validate()?;
    if bundle.len() != catalog.len() {
        return Err(Error::SchemaMismatch(format!(
            "bundle has {} rows but catalog has {} items",
            bundle.len(),
            catalog.len()
        )));
    }

    let stored = StoredBundle {
        bundle: bundle.clone(),
        catalog: catalog.to_vec(),
        created_at: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };

    write_atomic(path, &stored).map_err(|e| Error::Storage(e.to_string()))?;
    info!(path = %path.display(), items = stored.catalog.len(), "feature bundle saved");
    Ok(())
}

/// Load a previously saved bundle. Validates the length invariants before
/// handing the data to an engine.
pub fn load_bundle(path: &Path) -> Result<(FeatureBundle, Vec<CatalogItem>)> {
    if !path.exists() {
        return Err(Error::MissingInputFile(path.to_path_buf()));
    }

    let data = std::fs::read(path)?;
    let stored: StoredBundle = bincode::deserialize(&data)
        .map_err(|e| Error::SchemaMismatch(format!("feature bundle is malformed: {e}")))?;

    stored.bundle.validate()?;
    if stored.bundle.len() != stored.catalog.len() {
        return Err(Error::SchemaMismatch(format!(
            "stored bundle has {} rows but {} catalog items",
            stored.bundle.len(),
            stored.catalog.len()
        )));
    }

    info!(path = %path.display(), items = stored.catalog.len(), "feature bundle loaded");
    Ok((stored.bundle, stored.catalog))
}

fn write_atomic(path: &Path, stored: &StoredBundle) -> anyhow::Result<()> {
    let data = bincode::serialize(stored).context("serializing feature bundle")?;
    let temp_file = path.with_extension("tmp");
    std::fs::write(&temp_file, &data)
        .with_context(|| format!("writing {}", temp_file.display()))?;
    std::fs::rename(&temp_file, path)
        .with_context(|| format!("renaming into {}", path.display()))?;
    Ok(())
}
