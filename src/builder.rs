//! Post-build orchestrator merging manifests and patching the HTML entry page.

use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::bundle::{inject_legacy_scripts, render_legacy_scripts};
use crate::error::PostbuildResult;
use crate::manifest::{join_step, load_manifest, merge_manifests, replace_sources};
use crate::models::{AssetManifest, MergeOutcome, PostbuildReport};
use crate::project::BuildLayout;

/// Runs the post-build step against a single build output directory.
pub struct PostbuildBuilder {
  layout: BuildLayout,
}

impl PostbuildBuilder {
  /// Create a builder for the provided layout.
  pub fn new(layout: BuildLayout) -> Self {
    Self { layout }
  }

  /// Layout this builder operates on.
  pub fn layout(&self) -> &BuildLayout {
    &self.layout
  }

  /// Merge the manifests and append the legacy scripts.
  ///
  /// Both manifests are parsed before anything on disk changes. The merge and the HTML patch
  /// then run concurrently; the run fails if either of them fails.
  pub fn build(&self) -> Result<PostbuildReport> {
    let layout = &self.layout;
    layout.validate()?;

    info!("[postbuild]:");

    let legacy =
      load_manifest(&layout.legacy_manifest).context("failed to load legacy manifest")?;
    let modern =
      load_manifest(&layout.modern_manifest).context("failed to load modern manifest")?;
    let legacy_scripts = render_legacy_scripts(&legacy, &layout.entry_points);

    let (merged, injected) = thread::scope(|scope| {
      let merge = scope.spawn(|| self.merge(&legacy, &modern));
      let inject = scope.spawn(|| self.append_legacy_scripts(&legacy_scripts));
      (join_step(merge), join_step(inject))
    });

    let (outcome, removed_sources) = match (merged, injected) {
      (Ok(merged), Ok(())) => merged,
      (Err(err), Ok(())) => return Err(err).context("failed to merge manifests"),
      (Ok(_), Err(err)) => return Err(err).context("failed to append legacy scripts"),
      (Err(merge_err), Err(inject_err)) => {
        error!("failed to append legacy scripts: {inject_err}");
        return Err(merge_err).context("failed to merge manifests");
      }
    };

    info!("  DONE");

    Ok(PostbuildReport {
      merged_entries: outcome.merged.len(),
      collisions: outcome.collisions,
      legacy_scripts,
      removed_sources,
    })
  }

  fn merge(
    &self,
    legacy: &AssetManifest,
    modern: &AssetManifest,
  ) -> PostbuildResult<(MergeOutcome, Vec<PathBuf>)> {
    info!("  merging manifests...");

    let outcome = merge_manifests(legacy, modern, self.layout.precedence);
    for key in &outcome.collisions {
      debug!(
        "{key} is defined by both builds, keeping the {:?} value",
        self.layout.precedence
      );
    }

    let removed = replace_sources(&self.layout, &outcome.merged)?;
    Ok((outcome, removed))
  }

  fn append_legacy_scripts(&self, scripts: &str) -> PostbuildResult<()> {
    info!("  appending 'nomodule' scripts...");

    if scripts.is_empty() {
      warn!(
        "no legacy entry points ({}) found in {}",
        self.layout.entry_points.join(", "),
        self.layout.legacy_manifest.display()
      );
    }

    inject_legacy_scripts(&self.layout, scripts)
  }
}
