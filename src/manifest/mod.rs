//! Loading, merging and replacing the modern and legacy asset manifests.

mod io;
mod merge;

pub use io::{load_manifest, remove_manifest, write_manifest};
pub use merge::{merge_manifests, replace_sources};

pub(crate) use merge::join_step;
