//! Splicing the precache manifest into the service-worker template.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use regex::{NoExpand, Regex};
use same_file::is_same_file;

/// Token the worker template must contain exactly once.
pub const INJECTION_POINT: &str = "self.__WB_MANIFEST";

/// Replace the injection point in `template` with the manifest array literal.
///
/// The entry list is rendered with `serde_json`, which produces a valid JS
/// array literal, so the template stays syntactically intact around the
/// splice. Zero occurrences of the injection point means the template cannot
/// receive the manifest; more than one makes the splice ambiguous. Both are
/// rejected.
pub fn render_injected_worker(template: &str, entries: &[String]) -> Result<String> {
    let pattern =
        Regex::new(&regex::escape(INJECTION_POINT)).expect("invalid injection point regex");

    let occurrences = pattern.find_iter(template).count();
    if occurrences == 0 {
        return Err(anyhow!(
            "could not find {INJECTION_POINT} in the service-worker template"
        ));
    }
    if occurrences > 1 {
        return Err(anyhow!(
            "found {occurrences} occurrences of {INJECTION_POINT}; the template must contain exactly one"
        ));
    }

    let literal =
        serde_json::to_string(entries).context("failed to render the precache manifest literal")?;
    Ok(pattern.replace(template, NoExpand(&literal)).into_owned())
}

/// Inject `entries` into the template at `sw_src` and write the result to `sw_dest`.
///
/// The template is read in full before any write happens, so `sw_src` and
/// `sw_dest` may refer to the same file.
pub fn inject_manifest_file(sw_src: &Path, sw_dest: &Path, entries: &[String]) -> Result<String> {
    let template = fs::read_to_string(sw_src)
        .with_context(|| format!("failed to read {}", sw_src.display()))?;
    let injected = render_injected_worker(&template, entries)?;
    write_worker(sw_dest, &injected)?;
    Ok(injected)
}

/// Write injected worker text, creating parent directories as needed.
pub fn write_worker(sw_dest: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = sw_dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(sw_dest, contents).with_context(|| format!("failed to write {}", sw_dest.display()))
}

/// Whether source and destination refer to the same file on disk.
pub fn is_in_place(sw_src: &Path, sw_dest: &Path) -> bool {
    is_same_file(sw_src, sw_dest).unwrap_or(sw_src == sw_dest)
}
