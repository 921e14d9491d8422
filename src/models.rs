//! Data structures consumed and produced by the post-build step.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entry points whose legacy bundles must be loaded, in load order.
pub const DEFAULT_ENTRY_POINTS: [&str; 3] = ["manifest", "vendor", "main"];

/// Flat mapping from logical asset name to the hashed public path emitted by the bundler.
///
/// Iteration follows the key order of the JSON object the manifest was parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AssetManifest(IndexMap<String, String>);

impl AssetManifest {
  /// Create an empty manifest.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace an entry, keeping the original position of an existing key.
  pub fn insert(&mut self, key: impl Into<String>, url: impl Into<String>) -> Option<String> {
    self.0.insert(key.into(), url.into())
  }

  /// Look up the URL recorded for an exact key.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  /// Returns `true` when the key is present.
  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  /// Iterate entries in manifest order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(key, url)| (key.as_str(), url.as_str()))
  }

  /// Iterate keys in manifest order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  /// Number of entries.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns `true` when the manifest has no entries.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K, V> FromIterator<(K, V)> for AssetManifest
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(
      iter
        .into_iter()
        .map(|(key, url)| (key.into(), url.into()))
        .collect(),
    )
  }
}

/// Which source manifest wins when both define the same key.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
  /// Values from the legacy manifest replace modern ones.
  #[default]
  Legacy,
  /// Values from the modern manifest replace legacy ones.
  Modern,
}

/// Result of merging two manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
  /// Union of both manifests.
  pub merged: AssetManifest,
  /// Keys that were present in both sources, in merged order.
  pub collisions: Vec<String>,
}

/// Summary of a completed post-build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostbuildReport {
  /// Number of entries written to the merged manifest.
  pub merged_entries: usize,
  /// Keys present in both source manifests.
  pub collisions: Vec<String>,
  /// Script tags that were spliced into the HTML file.
  pub legacy_scripts: String,
  /// Source manifests removed after merging.
  pub removed_sources: Vec<PathBuf>,
}
