//! `postbuild` merges the modern and legacy asset manifests of a differential build and
//! appends the legacy `<script nomodule>` tags to the rendered `index.html`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use differential_postbuild::{BuildLayout, PostbuildBuilder, PostbuildConfig, Precedence};

/// Post-build step for modern/legacy differential bundles
#[derive(Parser, Debug)]
#[command(name = "postbuild")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Configuration file (defaults to `postbuild.config.json` in the working directory)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Bundler output directory, overriding the configured one
  #[arg(short, long)]
  build_dir: Option<PathBuf>,

  /// Build whose value wins when both manifests define a key
  #[arg(long, value_enum)]
  precedence: Option<Precedence>,

  /// Log every step, including key collisions
  #[arg(short, long)]
  verbose: bool,
}

fn init_logger(verbose: bool) {
  let default = if verbose { "debug" } else { "info" };
  env_logger::Builder::from_env(env_logger::Env::new().default_filter_or(default))
    .format_timestamp(None)
    .format_target(false)
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logger(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("Error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let cwd = std::env::current_dir().context("failed to resolve working directory")?;
  let layout = resolve_layout(&cli, &cwd)?;

  let builder = PostbuildBuilder::new(layout);
  let report = builder.build()?;

  info!(
    "wrote {} entries to {} ({} shared keys), removed {} source manifests",
    report.merged_entries,
    builder.layout().merged_manifest.display(),
    report.collisions.len(),
    report.removed_sources.len()
  );

  Ok(())
}

/// Layer CLI flags over the configuration file and resolve the build layout.
fn resolve_layout(cli: &Cli, cwd: &Path) -> Result<BuildLayout> {
  // Relative paths in an explicit config file resolve against the file's directory.
  let (mut config, base_dir) = match &cli.config {
    Some(path) => {
      let config_path = cwd.join(path);
      let base = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf());
      (PostbuildConfig::from_path(&config_path)?, base)
    }
    None => (PostbuildConfig::discover(cwd)?, cwd.to_path_buf()),
  };

  if let Some(precedence) = cli.precedence {
    config.precedence = precedence;
  }

  Ok(match &cli.build_dir {
    Some(build_dir) => config.layout_in(cwd.join(build_dir)),
    None => config.into_layout(&base_dir),
  })
}
