//! Glob-driven filtering of which bundle files enter the precache manifest.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// Trait describing inclusion filters for precache content.
pub trait AssetInclusion {
  /// Returns `true` when the relative path should appear in the manifest.
  fn is_included(&self, relative_path: &str) -> bool;
}

/// Compiled include/exclude matcher applied to root-relative file paths.
///
/// `*` matches within a single path segment, `**` matches across segments and
/// `{a,b,c}` is an alternation group. Ignore patterns are evaluated after the
/// include patterns, so a path matching both is always excluded.
#[derive(Debug, Clone)]
pub struct AssetSelection {
  include: GlobSet,
  exclude: GlobSet,
  has_includes: bool,
}

/// Error raised when a glob pattern fails to compile.
#[derive(Debug)]
pub struct PatternError {
  pattern: String,
  source: globset::Error,
}

impl PatternError {
  /// The pattern that failed to compile.
  pub fn pattern(&self) -> &str {
    &self.pattern
  }
}

impl AssetSelection {
  /// Compile include and ignore pattern lists into a matcher.
  pub fn from_patterns(include: &[String], exclude: &[String]) -> Result<Self, PatternError> {
    Ok(Self {
      include: build_globset(include)?,
      exclude: build_globset(exclude)?,
      has_includes: !include.is_empty(),
    })
  }

  /// Determine whether a root-relative path belongs in the manifest.
  pub fn is_included(&self, relative_path: &str) -> bool {
    if !self.has_includes {
      return false;
    }

    if self.exclude.is_match(relative_path) {
      return false;
    }

    self.include.is_match(relative_path)
  }

  /// Returns true when no include pattern was supplied, so nothing can match.
  pub fn selects_nothing(&self) -> bool {
    !self.has_includes
  }
}

impl AssetInclusion for AssetSelection {
  fn is_included(&self, relative_path: &str) -> bool {
    AssetSelection::is_included(self, relative_path)
  }
}

impl std::fmt::Display for PatternError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "invalid glob pattern `{}`: {}", self.pattern, self.source)
  }
}

impl std::error::Error for PatternError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.source)
  }
}

/// Compile a pattern list into a single matcher set.
///
/// `literal_separator` keeps `*` from crossing segment boundaries; only `**`
/// may span directories.
fn build_globset(patterns: &[String]) -> Result<GlobSet, PatternError> {
  let mut builder = GlobSetBuilder::new();
  for pattern in patterns {
    let glob = GlobBuilder::new(pattern)
      .literal_separator(true)
      .build()
      .map_err(|err| PatternError {
        pattern: pattern.clone(),
        source: err,
      })?;
    builder.add(glob);
  }
  builder.build().map_err(|err| PatternError {
    pattern: err.glob().unwrap_or_default().to_string(),
    source: err,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn patterns(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
  }

  #[test]
  fn empty_include_list_selects_nothing() {
    let selection = AssetSelection::from_patterns(&[], &[]).unwrap();
    assert!(selection.selects_nothing());
    assert!(!selection.is_included("index.html"));
  }

  #[test]
  fn star_stays_within_one_segment() {
    let selection = AssetSelection::from_patterns(&patterns(&["*.js"]), &[]).unwrap();
    assert!(selection.is_included("app.js"));
    assert!(!selection.is_included("vendor/app.js"));
  }

  #[test]
  fn double_star_crosses_segments() {
    let selection = AssetSelection::from_patterns(&patterns(&["**/*.js"]), &[]).unwrap();
    assert!(selection.is_included("app.js"));
    assert!(selection.is_included("vendor/nested/app.js"));
  }

  #[test]
  fn brace_alternation_expands() {
    let selection =
      AssetSelection::from_patterns(&patterns(&["**/*.{css,html,wasm}"]), &[]).unwrap();
    assert!(selection.is_included("styles/main.css"));
    assert!(selection.is_included("index.html"));
    assert!(selection.is_included("pkg/app_bg.wasm"));
    assert!(!selection.is_included("app.js"));
  }

  #[test]
  fn ignores_win_over_includes() {
    let selection = AssetSelection::from_patterns(
      &patterns(&["**/*.js"]),
      &patterns(&["node_modules/**"]),
    )
    .unwrap();

    assert!(selection.is_included("app.js"));
    assert!(!selection.is_included("node_modules/pkg/index.js"));
  }

  #[test]
  fn literal_filename_ignore_matches_exactly() {
    let selection = AssetSelection::from_patterns(
      &patterns(&["**/*.js"]),
      &patterns(&["config.js"]),
    )
    .unwrap();

    assert!(!selection.is_included("config.js"));
    assert!(selection.is_included("nested/config.js"));
  }

  #[test]
  fn invalid_pattern_reports_the_offending_glob() {
    let err = AssetSelection::from_patterns(&patterns(&["a["]), &[]).unwrap_err();
    assert_eq!(err.pattern(), "a[");
  }
}
