//! Precache selection broken into focused submodules for easier testing.

mod generation;
mod scanning;

pub use generation::{
    SelectError, select_precache_assets, select_precache_assets_with_deadline, select_with,
};
pub use scanning::{TimeoutError, scan_relative_files};
