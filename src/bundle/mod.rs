//! Helpers for patching the rendered HTML with scripts from the legacy build.

pub mod legacy_scripts;
pub mod site;

pub use legacy_scripts::{find_entry, render_legacy_scripts};
pub use site::{inject_legacy_scripts, splice_before_marker};
