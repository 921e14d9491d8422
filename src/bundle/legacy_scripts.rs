//! Rendering of `<script nomodule>` tags for the legacy entry points.

use crate::models::AssetManifest;

/// Find the first manifest entry whose key contains `entry_point`.
///
/// Keys emitted by the bundler carry content hashes (`vendor.3f9a1c.js`), so the lookup is a
/// substring match in manifest order rather than an exact key.
pub fn find_entry<'a>(
  manifest: &'a AssetManifest,
  entry_point: &str,
) -> Option<(&'a str, &'a str)> {
  manifest.iter().find(|(key, _)| key.contains(entry_point))
}

/// Render one `<script nomodule>` tag per entry point found in `manifest`.
///
/// Tags follow the order of `entry_points`, not the manifest: the runtime chunk must execute
/// before vendor code and vendor code before the application. Entry points without a matching
/// key are skipped.
pub fn render_legacy_scripts<S: AsRef<str>>(
  manifest: &AssetManifest,
  entry_points: &[S],
) -> String {
  entry_points
    .iter()
    .filter_map(|entry_point| find_entry(manifest, entry_point.as_ref()))
    .map(|(_, url)| {
      format!(
        "<script nomodule src=\"{}\"></script>",
        escape_attribute(url)
      )
    })
    .collect()
}

fn escape_attribute(value: &str) -> String {
  value.replace('&', "&amp;").replace('"', "&quot;")
}
