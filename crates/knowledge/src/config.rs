//! On-disk layout of the index directory.

use crate::types::IndexManifest;
use netassist_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the SQLite database path inside an index directory.
pub fn get_index_path(index_dir: &Path) -> PathBuf {
    index_dir.join("index.sqlite")
}

/// Get the build manifest path inside an index directory.
pub fn get_manifest_path(index_dir: &Path) -> PathBuf {
    index_dir.join("manifest.json")
}

/// Load the build manifest, if the index has one.
pub fn load_manifest(index_dir: &Path) -> AppResult<Option<IndexManifest>> {
    let path = get_manifest_path(index_dir);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read manifest at {:?}: {}", path, e))
    })?;

    let manifest = serde_json::from_str(&content).map_err(|e| {
        AppError::Knowledge(format!("Failed to parse manifest at {:?}: {}", path, e))
    })?;

    Ok(Some(manifest))
}

/// Save the build manifest.
pub fn save_manifest(index_dir: &Path, manifest: &IndexManifest) -> AppResult<()> {
    fs::create_dir_all(index_dir).map_err(|e| {
        AppError::Knowledge(format!("Failed to create index directory: {}", e))
    })?;

    let path = get_manifest_path(index_dir);
    let json = serde_json::to_string_pretty(manifest)
        .map_err(|e| AppError::Knowledge(format!("Failed to serialize manifest: {}", e)))?;

    fs::write(&path, json).map_err(|e| {
        AppError::Knowledge(format!("Failed to write manifest to {:?}: {}", path, e))
    })?;

    tracing::debug!("Saved index manifest to {:?}", path);
    Ok(())
}
