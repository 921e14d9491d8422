//! Error taxonomy shared by the manifest merger and the script injector.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for post-build operations.
pub type PostbuildResult<T> = Result<T, PostbuildError>;

/// Every failure the post-build step can hit. All of them are fatal.
#[derive(Debug, Error)]
pub enum PostbuildError {
  /// Reading, writing or deleting a build artifact failed.
  #[error("i/o error on {path}: {source}")]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },

  /// A manifest or configuration file is not valid JSON of the expected shape.
  #[error("failed to parse {path}: {source}")]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },

  /// The merged manifest could not be encoded.
  #[error("failed to serialise merged manifest: {source}")]
  Serialize {
    /// Source encoding error.
    source: serde_json::Error,
  },

  /// The HTML file has no insertion marker, so the scripts have nowhere to go.
  #[error("marker '{marker}' not found in {path}")]
  MissingMarker {
    /// HTML file that was searched.
    path: PathBuf,
    /// Literal marker that was expected.
    marker: String,
  },

  /// The configured paths cannot be processed safely.
  #[error("invalid build layout: {reason}")]
  InvalidLayout {
    /// Human readable description of the conflict.
    reason: String,
  },
}

impl PostbuildError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
    Self::Parse {
      path: path.into(),
      source,
    }
  }
}
