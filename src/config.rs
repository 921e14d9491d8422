//! Post-build configuration loader describing the build output layout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PostbuildError, PostbuildResult};
use crate::models::{DEFAULT_ENTRY_POINTS, Precedence};
use crate::project::BuildLayout;

/// File name searched for when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "postbuild.config.json";

/// Discoverable configuration naming the build artifacts the post-build step touches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostbuildConfig {
  /// Bundler output directory, relative to the working directory unless absolute.
  pub build_dir: String,
  /// File name of the manifest emitted by the legacy build.
  pub legacy_manifest: String,
  /// File name of the manifest emitted by the modern build.
  pub modern_manifest: String,
  /// File name of the merged manifest written by this step.
  pub merged_manifest: String,
  /// File name of the rendered HTML page that receives the legacy scripts.
  pub index_html: String,
  /// Entry point names looked up in the legacy manifest, in load order.
  pub entry_points: Vec<String>,
  /// Source that wins when both manifests define a key.
  pub precedence: Precedence,
  /// Literal marker the scripts are inserted in front of.
  pub body_marker: String,
}

impl Default for PostbuildConfig {
  fn default() -> Self {
    Self {
      build_dir: "build".into(),
      legacy_manifest: "assets-legacy.json".into(),
      modern_manifest: "assets-modern.json".into(),
      merged_manifest: "assets.json".into(),
      index_html: "index.html".into(),
      entry_points: DEFAULT_ENTRY_POINTS.iter().map(|name| name.to_string()).collect(),
      precedence: Precedence::default(),
      body_marker: "</body>".into(),
    }
  }
}

impl PostbuildConfig {
  /// Load `postbuild.config.json` from the provided directory.
  ///
  /// A missing file yields the defaults; a file that exists but fails to parse is an error.
  pub fn discover(dir: &Path) -> PostbuildResult<Self> {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    match fs::read_to_string(&candidate) {
      Ok(content) => Self::from_str_at(&content, &candidate),
      Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
      Err(err) => Err(PostbuildError::io(candidate, err)),
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> PostbuildResult<Self> {
    let content = fs::read_to_string(path).map_err(|err| PostbuildError::io(path, err))?;
    Self::from_str_at(&content, path)
  }

  fn from_str_at(content: &str, path: &Path) -> PostbuildResult<Self> {
    serde_json::from_str(content).map_err(|err| PostbuildError::parse(path, err))
  }

  /// Convert the configuration into resolved paths rooted at `base_dir`.
  pub fn into_layout(self, base_dir: &Path) -> BuildLayout {
    let build_dir = self.build_dir_path(base_dir);
    self.layout_in(build_dir)
  }

  /// Resolve the configured file names inside an already resolved build directory.
  pub fn layout_in(self, build_dir: PathBuf) -> BuildLayout {
    BuildLayout {
      legacy_manifest: build_dir.join(&self.legacy_manifest),
      modern_manifest: build_dir.join(&self.modern_manifest),
      merged_manifest: build_dir.join(&self.merged_manifest),
      index_html: build_dir.join(&self.index_html),
      build_dir,
      entry_points: self.entry_points,
      precedence: self.precedence,
      body_marker: self.body_marker,
    }
  }

  /// Path of the build directory relative to `base_dir`.
  pub fn build_dir_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.build_dir)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_match_bundler_output_names() {
    let layout = PostbuildConfig::default().into_layout(Path::new("/site"));
    assert_eq!(layout.build_dir, PathBuf::from("/site/build"));
    assert_eq!(layout.legacy_manifest, PathBuf::from("/site/build/assets-legacy.json"));
    assert_eq!(layout.modern_manifest, PathBuf::from("/site/build/assets-modern.json"));
    assert_eq!(layout.merged_manifest, PathBuf::from("/site/build/assets.json"));
    assert_eq!(layout.index_html, PathBuf::from("/site/build/index.html"));
    assert_eq!(layout.entry_points, ["manifest", "vendor", "main"]);
    assert_eq!(layout.body_marker, "</body>");
  }

  #[test]
  fn discover_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = PostbuildConfig::discover(dir.path()).unwrap();
    assert_eq!(config, PostbuildConfig::default());
  }

  #[test]
  fn discover_merges_partial_file_with_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{ "build_dir": "dist", "precedence": "modern" }"#,
    )
    .unwrap();

    let config = PostbuildConfig::discover(dir.path()).unwrap();
    assert_eq!(config.build_dir, "dist");
    assert_eq!(config.precedence, Precedence::Modern);
    assert_eq!(config.merged_manifest, "assets.json");
  }

  #[test]
  fn discover_reports_malformed_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ build_dir: ").unwrap();

    let err = PostbuildConfig::discover(dir.path()).unwrap_err();
    assert!(matches!(err, PostbuildError::Parse { .. }));
  }

  #[test]
  fn absolute_build_dir_ignores_base() {
    let config = PostbuildConfig {
      build_dir: "/var/www/build".into(),
      ..PostbuildConfig::default()
    };
    assert_eq!(
      config.build_dir_path(Path::new("/project")),
      PathBuf::from("/var/www/build")
    );
  }
}
