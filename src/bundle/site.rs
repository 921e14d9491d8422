//! HTML patching for the rendered site entry page.

use std::fs;
use std::path::Path;

use crate::error::{PostbuildError, PostbuildResult};
use crate::project::BuildLayout;

/// Insert `scripts` immediately before the first occurrence of `marker`.
///
/// Works on raw bytes so pages in any ASCII-compatible encoding are patched without
/// re-encoding. Returns `None` when the marker does not occur. Every byte outside the
/// insertion point is left untouched.
pub fn splice_before_marker(html: &[u8], marker: &[u8], scripts: &[u8]) -> Option<Vec<u8>> {
  let index = find_bytes(html, marker)?;
  let mut patched = Vec::with_capacity(html.len() + scripts.len());
  patched.extend_from_slice(&html[..index]);
  patched.extend_from_slice(scripts);
  patched.extend_from_slice(&html[index..]);
  Some(patched)
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  if needle.is_empty() {
    return Some(0);
  }
  haystack
    .windows(needle.len())
    .position(|window| window == needle)
}

/// Splice the legacy script tags into the layout's `index.html`, rewriting it in place.
///
/// The file is left as-is when the body marker is missing.
pub fn inject_legacy_scripts(layout: &BuildLayout, scripts: &str) -> PostbuildResult<()> {
  patch_html_file(&layout.index_html, &layout.body_marker, scripts)
}

fn patch_html_file(path: &Path, marker: &str, scripts: &str) -> PostbuildResult<()> {
  let html = fs::read(path).map_err(|err| PostbuildError::io(path, err))?;

  let patched = splice_before_marker(&html, marker.as_bytes(), scripts.as_bytes()).ok_or_else(
    || PostbuildError::MissingMarker {
      path: path.to_path_buf(),
      marker: marker.to_string(),
    },
  )?;

  fs::write(path, patched).map_err(|err| PostbuildError::io(path, err))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  const SCRIPTS: &str = "<script nomodule src=\"/scripts/main.1a.js\"></script>";

  #[test]
  fn splices_directly_before_closing_body() {
    let html = b"<html><body><div id=\"app\"></div></body></html>\n";
    let patched = splice_before_marker(html, b"</body>", SCRIPTS.as_bytes()).unwrap();
    assert_eq!(
      String::from_utf8(patched).unwrap(),
      "<html><body><div id=\"app\"></div><script nomodule src=\"/scripts/main.1a.js\"></script></body></html>\n"
    );
  }

  #[test]
  fn uses_first_marker_occurrence() {
    let html = b"<body>a</body><body>b</body>";
    let patched = splice_before_marker(html, b"</body>", b"X").unwrap();
    assert_eq!(patched, b"<body>aX</body><body>b</body>");
  }

  #[test]
  fn missing_marker_yields_none() {
    assert_eq!(
      splice_before_marker(b"<html></html>", b"</body>", SCRIPTS.as_bytes()),
      None
    );
  }

  #[test]
  fn patches_non_utf8_index_byte_for_byte() {
    let dir = tempdir().unwrap();
    let layout = BuildLayout::new(dir.path());
    fs::write(&layout.index_html, b"<html><body>caf\xE9</body></html>").unwrap();

    inject_legacy_scripts(&layout, "<script nomodule src=\"/m.js\"></script>").unwrap();

    assert_eq!(
      fs::read(&layout.index_html).unwrap(),
      b"<html><body>caf\xE9<script nomodule src=\"/m.js\"></script></body></html>"
    );
  }

  #[test]
  fn patches_index_in_place() {
    let dir = tempdir().unwrap();
    let layout = BuildLayout::new(dir.path());
    let original = "<!DOCTYPE html>\n<html>\n  <head>\n    <script type=\"module\" src=\"/scripts/main.mjs\"></script>\n  </head>\n  <body>\n    <div id=\"app\"></div>\n  </body>\n</html>\n";
    fs::write(&layout.index_html, original).unwrap();

    inject_legacy_scripts(&layout, SCRIPTS).unwrap();

    let updated = fs::read_to_string(&layout.index_html).unwrap();
    let index = original.find("</body>").unwrap();
    assert_eq!(&updated[..index], &original[..index]);
    assert_eq!(&updated[index..index + SCRIPTS.len()], SCRIPTS);
    assert_eq!(&updated[index + SCRIPTS.len()..], &original[index..]);
  }

  #[test]
  fn missing_marker_is_an_error_and_keeps_file() {
    let dir = tempdir().unwrap();
    let layout = BuildLayout::new(dir.path());
    let original = "<html><div id=\"app\"></div></html>";
    fs::write(&layout.index_html, original).unwrap();

    let err = inject_legacy_scripts(&layout, SCRIPTS).unwrap_err();
    assert!(matches!(err, PostbuildError::MissingMarker { .. }));
    assert_eq!(fs::read_to_string(&layout.index_html).unwrap(), original);
  }

  #[test]
  fn missing_index_is_io_error() {
    let dir = tempdir().unwrap();
    let layout = BuildLayout::new(dir.path());

    let err = inject_legacy_scripts(&layout, SCRIPTS).unwrap_err();
    assert!(matches!(err, PostbuildError::Io { .. }));
  }
}
