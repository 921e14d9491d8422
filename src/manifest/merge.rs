use std::path::PathBuf;
use std::thread;

use log::{debug, error};

use crate::error::PostbuildResult;
use crate::manifest::io::{remove_manifest, write_manifest};
use crate::models::{AssetManifest, MergeOutcome, Precedence};
use crate::project::BuildLayout;

/// Union two manifests, resolving shared keys with `precedence`.
///
/// Legacy keys come first in their original order, followed by keys only the modern manifest
/// defines. A shared key keeps its legacy position whichever side wins.
pub fn merge_manifests(
  legacy: &AssetManifest,
  modern: &AssetManifest,
  precedence: Precedence,
) -> MergeOutcome {
  let mut merged = legacy.clone();
  let mut collisions = Vec::new();

  for (key, url) in modern.iter() {
    if merged.contains_key(key) {
      collisions.push(key.to_string());
      if precedence == Precedence::Legacy {
        continue;
      }
    }
    merged.insert(key, url);
  }

  MergeOutcome { merged, collisions }
}

/// Write the merged manifest, then delete both source manifests.
///
/// The deletions run concurrently. Every failure is logged and the first one is returned.
pub fn replace_sources(
  layout: &BuildLayout,
  merged: &AssetManifest,
) -> PostbuildResult<Vec<PathBuf>> {
  write_manifest(&layout.merged_manifest, merged)?;
  debug!(
    "wrote {} entries to {}",
    merged.len(),
    layout.merged_manifest.display()
  );

  let results: Vec<PostbuildResult<()>> = thread::scope(|scope| {
    let handles: Vec<_> = layout
      .source_manifests()
      .into_iter()
      .map(|path| scope.spawn(move || remove_manifest(path)))
      .collect();
    handles.into_iter().map(join_step).collect()
  });

  let mut first_error = None;
  for result in results {
    if let Err(err) = result {
      error!("{err}");
      first_error.get_or_insert(err);
    }
  }
  if let Some(err) = first_error {
    return Err(err);
  }

  Ok(
    layout
      .source_manifests()
      .iter()
      .map(|path| path.to_path_buf())
      .collect(),
  )
}

pub(crate) fn join_step<T>(
  handle: thread::ScopedJoinHandle<'_, PostbuildResult<T>>,
) -> PostbuildResult<T> {
  match handle.join() {
    Ok(result) => result,
    Err(panic) => std::panic::resume_unwind(panic),
  }
}
