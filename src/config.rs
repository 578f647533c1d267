//! Configuration loader describing the precache selection inputs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default configuration file name searched for by [`PrecacheConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "precache.config.json";

/// Declarative description of a precache build.
///
/// The JSON field names (`globDirectory`, `globPatterns`, ...) are the wire
/// format consumed from the configuration file; all paths are resolved
/// relative to a base directory supplied by the caller, which for the CLI is
/// the directory containing the configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecacheConfig {
    /// Directory the glob patterns are matched against.
    pub glob_directory: String,
    /// Patterns selecting files to precache, relative to `glob_directory`.
    #[serde(default)]
    pub glob_patterns: Vec<String>,
    /// Patterns removing files from the selection. Ignores always win over
    /// patterns, regardless of specificity.
    #[serde(default)]
    pub glob_ignores: Vec<String>,
    /// Service-worker template the manifest is injected into.
    pub sw_src: String,
    /// Destination for the injected worker. May equal `sw_src`, in which case
    /// the template is rewritten in place.
    pub sw_dest: String,
}

/// Errors raised while loading or validating the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: io::Error,
    },
    /// Failed to parse the JSON configuration file.
    Parse {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
    /// The configured glob directory does not exist.
    RootMissing {
        /// Resolved glob directory path.
        path: PathBuf,
    },
    /// The configured glob directory exists but cannot be read.
    RootUnreadable {
        /// Resolved glob directory path.
        path: PathBuf,
        /// Source I/O error.
        source: io::Error,
    },
    /// The configured service-worker template does not exist.
    SourceMissing {
        /// Resolved template path.
        path: PathBuf,
    },
}

impl PrecacheConfig {
    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
        serde_json::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Load configuration from the default file name inside `dir`.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        Self::from_path(&dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Resolved directory the glob patterns are matched against.
    pub fn root_dir(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.glob_directory)
    }

    /// Resolved path of the service-worker template.
    pub fn sw_src_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.sw_src)
    }

    /// Resolved path the injected worker is written to.
    pub fn sw_dest_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.sw_dest)
    }

    /// Check that the glob directory exists and is readable.
    pub fn validate_root(&self, base_dir: &Path) -> Result<(), ConfigError> {
        let root = self.root_dir(base_dir);
        match fs::read_dir(&root) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ConfigError::RootMissing { path: root })
            }
            Err(err) => Err(ConfigError::RootUnreadable {
                path: root,
                source: err,
            }),
        }
    }

    /// Check that the service-worker template exists.
    pub fn validate_source(&self, base_dir: &Path) -> Result<(), ConfigError> {
        let sw_src = self.sw_src_path(base_dir);
        match fs::metadata(&sw_src) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(ConfigError::SourceMissing { path: sw_src })
            }
            Err(err) => Err(ConfigError::Io {
                path: sw_src,
                source: err,
            }),
        }
    }

    /// Validate every filesystem input the configuration references.
    pub fn validate(&self, base_dir: &Path) -> Result<(), ConfigError> {
        self.validate_root(base_dir)?;
        self.validate_source(base_dir)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            Self::RootMissing { path } => {
                write!(f, "glob directory {} does not exist", path.display())
            }
            Self::RootUnreadable { path, source } => {
                write!(f, "glob directory {} is not readable: {}", path.display(), source)
            }
            Self::SourceMissing { path } => {
                write!(f, "service-worker template {} does not exist", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::RootUnreadable { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::RootMissing { .. } | Self::SourceMissing { .. } => None,
        }
    }
}
