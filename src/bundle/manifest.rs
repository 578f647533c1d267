//! Writing and re-reading the serialized precache manifest summary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::PrecacheManifestSummary;

/// Render a manifest summary as prettified JSON.
pub fn render_manifest_summary(summary: &PrecacheManifestSummary) -> Result<String> {
  serde_json::to_string_pretty(summary).context("failed to serialize precache manifest summary")
}

/// Load a previously written manifest summary from disk.
pub fn load_manifest_summary(path: &Path) -> Result<PrecacheManifestSummary> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("manifest summary not found at {}", path.display()))?;
  let summary: PrecacheManifestSummary =
    serde_json::from_str(&content).context("failed to parse precache manifest JSON")?;
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn written_summaries_can_be_loaded_back() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("precache-manifest.json");

    let summary = PrecacheManifestSummary {
      glob_directory: "dist/".into(),
      entries: vec!["a.css".into(), "b.js".into()],
    };
    fs::write(&path, render_manifest_summary(&summary).unwrap()).unwrap();

    let loaded = load_manifest_summary(&path).unwrap();
    assert_eq!(loaded.glob_directory, "dist/");
    assert_eq!(loaded.entries, vec!["a.css", "b.js"]);
  }

  #[test]
  fn missing_summary_reports_the_path() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("absent.json");

    let err = load_manifest_summary(&path).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
  }
}
