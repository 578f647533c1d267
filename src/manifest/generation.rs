//! The selection operation: configuration in, ordered path list out.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use crate::config::{ConfigError, PrecacheConfig};
use crate::manifest::scanning::{TimeoutError, scan_relative_files};
use crate::selection::{AssetInclusion, AssetSelection, PatternError};

/// Errors surfaced by the selection operations.
///
/// Selection either returns a complete path set or fails; there is no
/// partial-success mode and nothing is retried internally.
#[derive(Debug)]
pub enum SelectError {
  /// The configuration referenced a missing or unreadable filesystem input.
  Config(ConfigError),
  /// An include or ignore pattern failed to compile.
  Pattern(PatternError),
  /// The directory walk exceeded the caller-supplied deadline.
  Timeout(TimeoutError),
}

/// Select the root-relative paths of every file that should be precached.
///
/// Files are kept when they match at least one include pattern and are then
/// dropped when they match any ignore pattern. The result is sorted and
/// duplicate-free; an empty include list yields an empty result. Nothing is
/// written to disk.
pub fn select_precache_assets(
  config: &PrecacheConfig,
  base_dir: &Path,
) -> Result<Vec<String>, SelectError> {
  select_with_limit(config, base_dir, None)
}

/// Like [`select_precache_assets`], aborting the walk once `deadline` elapses.
pub fn select_precache_assets_with_deadline(
  config: &PrecacheConfig,
  base_dir: &Path,
  deadline: Duration,
) -> Result<Vec<String>, SelectError> {
  select_with_limit(config, base_dir, Some(deadline))
}

/// Walk `root` and keep the paths accepted by `inclusion`, sorted and de-duplicated.
pub fn select_with<S: AssetInclusion>(
  inclusion: &S,
  root: &Path,
  limit: Option<Duration>,
) -> Result<Vec<String>, TimeoutError> {
  let scanned = scan_relative_files(root, limit)?;
  let selected: BTreeSet<String> = scanned
    .into_iter()
    .filter(|path| inclusion.is_included(path))
    .collect();

  Ok(selected.into_iter().collect())
}

fn select_with_limit(
  config: &PrecacheConfig,
  base_dir: &Path,
  limit: Option<Duration>,
) -> Result<Vec<String>, SelectError> {
  config.validate_root(base_dir)?;

  let selection = AssetSelection::from_patterns(&config.glob_patterns, &config.glob_ignores)?;
  if selection.selects_nothing() {
    return Ok(Vec::new());
  }

  Ok(select_with(&selection, &config.root_dir(base_dir), limit)?)
}

impl From<ConfigError> for SelectError {
  fn from(err: ConfigError) -> Self {
    Self::Config(err)
  }
}

impl From<PatternError> for SelectError {
  fn from(err: PatternError) -> Self {
    Self::Pattern(err)
  }
}

impl From<TimeoutError> for SelectError {
  fn from(err: TimeoutError) -> Self {
    Self::Timeout(err)
  }
}

impl std::fmt::Display for SelectError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Config(err) => err.fmt(f),
      Self::Pattern(err) => err.fmt(f),
      Self::Timeout(err) => err.fmt(f),
    }
  }
}

impl std::error::Error for SelectError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Config(err) => Some(err),
      Self::Pattern(err) => Some(err),
      Self::Timeout(err) => Some(err),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use std::path::Path;
  use tempfile::tempdir;

  fn write_bundle(root: &Path) {
    fs::create_dir_all(root.join("dist/node_modules/pkg")).unwrap();
    fs::write(root.join("dist/a.css"), "body {}").unwrap();
    fs::write(root.join("dist/b.js"), "export {}").unwrap();
    fs::write(root.join("dist/node_modules/pkg/x.js"), "module.exports = {}").unwrap();
  }

  fn config(patterns: &[&str], ignores: &[&str]) -> PrecacheConfig {
    PrecacheConfig {
      glob_directory: "dist/".into(),
      glob_patterns: patterns.iter().map(|value| value.to_string()).collect(),
      glob_ignores: ignores.iter().map(|value| value.to_string()).collect(),
      sw_src: "dist/sw.js".into(),
      sw_dest: "dist/sw.js".into(),
    }
  }

  #[test]
  fn selects_matching_files_and_drops_ignored_trees() {
    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let config = config(&["**/*.{css,js}"], &["node_modules/**"]);
    let selected = select_precache_assets(&config, temp.path()).unwrap();
    assert_eq!(selected, vec!["a.css", "b.js"]);
  }

  #[test]
  fn overlapping_includes_produce_no_duplicates() {
    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let config = config(&["**/*.css", "a.*", "**/*"], &["node_modules/**"]);
    let selected = select_precache_assets(&config, temp.path()).unwrap();
    assert_eq!(selected, vec!["a.css", "b.js"]);
  }

  #[test]
  fn literal_ignore_removes_the_only_match() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join("dist")).unwrap();
    fs::write(temp.path().join("dist/config.js"), "{}").unwrap();

    let config = config(&["**/*.js"], &["config.js"]);
    let selected = select_precache_assets(&config, temp.path()).unwrap();
    assert!(selected.is_empty());
  }

  #[test]
  fn empty_include_list_yields_empty_selection() {
    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let config = config(&[], &[]);
    let selected = select_precache_assets(&config, temp.path()).unwrap();
    assert!(selected.is_empty());
  }

  #[test]
  fn missing_root_is_a_config_error() {
    let temp = tempdir().unwrap();
    let config = config(&["**/*"], &[]);

    let err = select_precache_assets(&config, temp.path()).unwrap_err();
    assert!(matches!(err, SelectError::Config(ConfigError::RootMissing { .. })));
  }

  #[test]
  fn malformed_glob_is_a_pattern_error() {
    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let config = config(&["**/*.["], &[]);
    let err = select_precache_assets(&config, temp.path()).unwrap_err();
    assert!(matches!(err, SelectError::Pattern(_)));
  }

  #[test]
  fn elapsed_deadline_is_a_timeout_error() {
    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let config = config(&["**/*"], &[]);
    let err = select_precache_assets_with_deadline(&config, temp.path(), Duration::ZERO)
      .unwrap_err();
    assert!(matches!(err, SelectError::Timeout(_)));
  }

  #[test]
  fn select_with_accepts_custom_inclusion_filters() {
    struct CssOnly;
    impl AssetInclusion for CssOnly {
      fn is_included(&self, relative_path: &str) -> bool {
        relative_path.ends_with(".css")
      }
    }

    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let selected = select_with(&CssOnly, &temp.path().join("dist"), None).unwrap();
    assert_eq!(selected, vec!["a.css"]);
  }

  #[test]
  fn repeated_selection_over_an_unchanged_tree_is_identical() {
    let temp = tempdir().unwrap();
    write_bundle(temp.path());

    let config = config(&["**/*.{css,js}"], &["node_modules/**"]);
    let first = select_precache_assets(&config, temp.path()).unwrap();
    let second = select_precache_assets(&config, temp.path()).unwrap();
    assert_eq!(first, second);
  }
}
