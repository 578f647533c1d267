//! Build orchestrator tying selection, manifest rendering and injection together.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::bundle::inject::{is_in_place, render_injected_worker, write_worker};
use crate::bundle::manifest::render_manifest_summary;
use crate::config::PrecacheConfig;
use crate::manifest::{select_precache_assets, select_precache_assets_with_deadline};
use crate::models::PrecacheManifestSummary;

/// Generic build result type used across the crate.
pub type BuildResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Artifacts produced by a precache build, held in memory until written.
pub struct PrecacheArtifacts {
  /// Ordered relative paths selected for precaching.
  pub entries: Vec<String>,
  /// Prettified JSON summary of the selection.
  pub manifest_json: String,
  /// Service-worker text with the manifest spliced in.
  pub service_worker: String,
  /// File system paths that should trigger rerunning the build when changed.
  pub rerun_paths: Vec<PathBuf>,
}

/// High-level helper for generating and writing precache bundles.
pub struct PrecacheBuilder<'a> {
  base_dir: &'a Path,
  config: &'a PrecacheConfig,
  deadline: Option<Duration>,
}

impl<'a> PrecacheBuilder<'a> {
  /// Create a builder resolving the configuration against `base_dir`.
  pub fn new(base_dir: &'a Path, config: &'a PrecacheConfig) -> Self {
    Self {
      base_dir,
      config,
      deadline: None,
    }
  }

  /// Abort the directory walk once `deadline` elapses.
  pub fn with_deadline(mut self, deadline: Duration) -> Self {
    self.deadline = Some(deadline);
    self
  }

  /// Select assets, render the manifest and splice it into the template.
  ///
  /// Nothing is written to disk; pair with [`PrecacheBuilder::write`].
  pub fn build(&self) -> BuildResult<PrecacheArtifacts> {
    self.config.validate(self.base_dir)?;

    let entries = match self.deadline {
      Some(deadline) => {
        select_precache_assets_with_deadline(self.config, self.base_dir, deadline)?
      }
      None => select_precache_assets(self.config, self.base_dir)?,
    };

    let manifest_json = render_manifest_summary(&PrecacheManifestSummary {
      glob_directory: self.config.glob_directory.clone(),
      entries: entries.clone(),
    })?;

    let sw_src = self.config.sw_src_path(self.base_dir);
    let template = fs::read_to_string(&sw_src)
      .with_context(|| format!("failed to read {}", sw_src.display()))?;
    let service_worker = render_injected_worker(&template, &entries)?;

    let rerun_paths = vec![self.config.root_dir(self.base_dir), sw_src];

    Ok(PrecacheArtifacts {
      entries,
      manifest_json,
      service_worker,
      rerun_paths,
    })
  }

  /// Write the injected worker to the configured destination.
  pub fn write(&self, artifacts: &PrecacheArtifacts) -> BuildResult<PathBuf> {
    let sw_src = self.config.sw_src_path(self.base_dir);
    let sw_dest = self.config.sw_dest_path(self.base_dir);
    if sw_dest.exists() && is_in_place(&sw_src, &sw_dest) {
      log::info!("rewriting {} in place", sw_dest.display());
    }

    write_worker(&sw_dest, &artifacts.service_worker)?;
    Ok(sw_dest)
  }

  /// Write the manifest summary JSON to `path`.
  pub fn write_manifest(&self, artifacts: &PrecacheArtifacts, path: &Path) -> BuildResult<()> {
    fs::write(path, &artifacts.manifest_json)
      .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
  }
}
