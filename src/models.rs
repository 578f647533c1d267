//! Data structures produced while generating a precache bundle.

use serde::{Deserialize, Serialize};

/// Serializable summary of a completed precache selection.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecacheManifestSummary {
  /// Directory the selection was made against, as written in the configuration.
  pub glob_directory: String,
  /// Ordered relative paths included in the precache manifest.
  pub entries: Vec<String>,
}
