//! Resolved description of the build output the post-build step operates on.

use std::path::{Path, PathBuf};

use crate::config::PostbuildConfig;
use crate::error::{PostbuildError, PostbuildResult};
use crate::models::Precedence;

/// Concrete paths and settings for a single post-build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
  /// Bundler output directory.
  pub build_dir: PathBuf,
  /// Manifest emitted by the legacy build.
  pub legacy_manifest: PathBuf,
  /// Manifest emitted by the modern build.
  pub modern_manifest: PathBuf,
  /// Destination of the merged manifest.
  pub merged_manifest: PathBuf,
  /// Rendered HTML page patched in place.
  pub index_html: PathBuf,
  /// Entry point names in load order.
  pub entry_points: Vec<String>,
  /// Winner for keys present in both manifests.
  pub precedence: Precedence,
  /// Literal insertion marker inside the HTML page.
  pub body_marker: String,
}

impl BuildLayout {
  /// Layout with default file names inside `build_dir`.
  pub fn new(build_dir: impl Into<PathBuf>) -> Self {
    PostbuildConfig::default().layout_in(build_dir.into())
  }

  /// Source manifests consumed (and deleted) by the merge step.
  pub fn source_manifests(&self) -> [&Path; 2] {
    [&self.legacy_manifest, &self.modern_manifest]
  }

  /// Reject layouts where concurrent steps would touch the same file.
  pub fn validate(&self) -> PostbuildResult<()> {
    if self.body_marker.is_empty() {
      return Err(invalid("body marker must not be empty"));
    }

    if self.legacy_manifest == self.modern_manifest {
      return Err(invalid(format!(
        "legacy and modern manifests both point at {}",
        self.legacy_manifest.display()
      )));
    }

    for source in self.source_manifests() {
      if source == self.merged_manifest {
        return Err(invalid(format!(
          "merged manifest {} would be deleted as a source manifest",
          self.merged_manifest.display()
        )));
      }
      if source == self.index_html {
        return Err(invalid(format!(
          "{} is configured as both a manifest and the HTML page",
          source.display()
        )));
      }
    }

    if self.merged_manifest == self.index_html {
      return Err(invalid(format!(
        "{} is configured as both the merged manifest and the HTML page",
        self.index_html.display()
      )));
    }

    Ok(())
  }
}

fn invalid(reason: impl Into<String>) -> PostbuildError {
  PostbuildError::InvalidLayout {
    reason: reason.into(),
  }
}
