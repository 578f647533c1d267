#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod bundle;
pub mod config;
pub mod manifest;
pub mod models;
pub mod selection;

pub use builder::{BuildResult, PrecacheArtifacts, PrecacheBuilder};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, PrecacheConfig};
pub use manifest::{SelectError, select_precache_assets, select_precache_assets_with_deadline};
pub use selection::{AssetInclusion, AssetSelection, PatternError};
