//! Directory walking utilities for harvesting precache candidate files.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use walkdir::WalkDir;

/// Error returned when the walk exceeds the caller-supplied deadline.
#[derive(Debug)]
pub struct TimeoutError {
    root: PathBuf,
    limit: Duration,
}

impl TimeoutError {
    /// Directory that was being scanned when the deadline elapsed.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The deadline that was exceeded.
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl std::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scan of {} exceeded the {:?} deadline",
            self.root.display(),
            self.limit
        )
    }
}

impl std::error::Error for TimeoutError {}

/// Walk `root` and return the `/`-separated relative path of every regular file.
///
/// Symbolic links are followed. Link cycles and unreadable subtrees are
/// skipped with a warning rather than aborting the walk; the caller is
/// expected to have validated `root` itself beforehand.
pub fn scan_relative_files(
    root: &Path,
    limit: Option<Duration>,
) -> Result<Vec<String>, TimeoutError> {
    let started = Instant::now();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        if let Some(limit) = limit {
            if started.elapsed() >= limit {
                return Err(TimeoutError {
                    root: root.to_path_buf(),
                    limit,
                });
            }
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    log::warn!("skipping symlink cycle back into {}", ancestor.display());
                } else {
                    log::warn!("skipping unreadable entry under {}: {}", root.display(), err);
                }
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    Ok(files)
}
