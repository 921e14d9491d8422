use std::fs;
use std::path::Path;

use crate::error::{PostbuildError, PostbuildResult};
use crate::models::AssetManifest;

/// Load a flat asset manifest emitted by the bundler.
pub fn load_manifest(path: &Path) -> PostbuildResult<AssetManifest> {
  let content = fs::read_to_string(path).map_err(|err| PostbuildError::io(path, err))?;
  serde_json::from_str(&content).map_err(|err| PostbuildError::parse(path, err))
}

/// Write a manifest as compact UTF-8 JSON.
pub fn write_manifest(path: &Path, manifest: &AssetManifest) -> PostbuildResult<()> {
  let json =
    serde_json::to_string(manifest).map_err(|source| PostbuildError::Serialize { source })?;
  fs::write(path, json).map_err(|err| PostbuildError::io(path, err))
}

/// Remove a consumed source manifest.
pub fn remove_manifest(path: &Path) -> PostbuildResult<()> {
  fs::remove_file(path).map_err(|err| PostbuildError::io(path, err))
}
