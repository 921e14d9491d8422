#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod bundle;
pub mod config;
pub mod error;
pub mod manifest;
pub mod models;
pub mod project;

pub use builder::PostbuildBuilder;
pub use config::PostbuildConfig;
pub use error::{PostbuildError, PostbuildResult};
pub use models::{AssetManifest, PostbuildReport, Precedence};
pub use project::BuildLayout;
