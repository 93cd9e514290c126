//! Sibling output path derivation.
//!
//! Given an input name, the `split` command writes its two outputs next to
//! it, inserting a `_uniqs` / `_dupes` marker before the file extension:
//! `people.txt` becomes `people_uniqs.txt` and `people_dupes.txt`.
//! Pre-existing files at those paths are silently overwritten; this naming
//! policy belongs to the caller, not the classification core.

use std::path::{Path, PathBuf};

/// Marker inserted before the extension for the unique output.
pub const UNIQUE_MARKER: &str = "_uniqs";
/// Marker inserted before the extension for the duplicate output.
pub const DUPLICATE_MARKER: &str = "_dupes";

/// Derive the `(unique, duplicate)` sibling output paths for an input.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use linedupe::output::sibling_outputs;
///
/// let (uniqs, dupes) = sibling_outputs(Path::new("data/people.txt"));
/// assert_eq!(uniqs, Path::new("data/people_uniqs.txt"));
/// assert_eq!(dupes, Path::new("data/people_dupes.txt"));
/// ```
#[must_use]
pub fn sibling_outputs(input: &Path) -> (PathBuf, PathBuf) {
    (
        with_marker(input, UNIQUE_MARKER),
        with_marker(input, DUPLICATE_MARKER),
    )
}

fn with_marker(path: &Path, marker: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut name = format!("{stem}{marker}");
    if let Some(extension) = path.extension() {
        name.push('.');
        name.push_str(&extension.to_string_lossy());
    }
    path.with_file_name(name)
}
