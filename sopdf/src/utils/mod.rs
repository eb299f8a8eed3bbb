//! Utilities for path collection, output naming and size formatting.

use crate::{Result, error::SoPdfError};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Expand multiple glob patterns into filesystem paths.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`. Pattern order is preserved;
/// matches of a single pattern come back in the order `glob` yields them
/// (alphabetical).
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
/// - Fails with `FileNotFound` when a literal (non-wildcard) path matches nothing.
///
/// An argument naming an existing file is taken literally, even if it
/// contains glob metacharacters such as `[1]`.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern)?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let pattern = pattern.as_ref();
    let literal = Path::new(pattern);
    if literal.exists() {
        return Ok(vec![literal.to_path_buf()]);
    }

    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| SoPdfError::Other {
        message: err.to_string(),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| SoPdfError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    // A plain path that matched nothing is a missing file, not an empty glob.
    if resolved_paths.is_empty() && !has_glob_metachars(pattern) {
        return Err(SoPdfError::file_not_found(PathBuf::from(pattern)));
    }

    Ok(resolved_paths)
}

fn has_glob_metachars(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// File stem of `path`, falling back to `"untitled"`.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| "untitled".to_string())
}

/// Build `<dir>/<stem><suffix>.pdf` for a derived output file.
///
/// `dir` defaults to the directory containing `source`.
///
/// ```
/// use sopdf::utils::derived_output_path;
/// use std::path::{Path, PathBuf};
///
/// let out = derived_output_path(Path::new("/docs/report.pdf"), None, "_part1");
/// assert_eq!(out, PathBuf::from("/docs/report_part1.pdf"));
/// ```
pub fn derived_output_path(source: &Path, dir: Option<&Path>, suffix: &str) -> PathBuf {
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}{}.pdf", file_stem(source), suffix))
}

/// Hidden temp file next to `path`: `.{name}.{pid}.{n}.tmp`.
///
/// The name is unique per process and call, so it never collides with a
/// user file such as `report.tmp`.
pub fn sibling_temp_path(path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{name}.{}.{n}.tmp", std::process::id()))
}

/// Append a `.pdf` extension unless the path already has one (case-insensitive).
pub fn ensure_pdf_extension(path: PathBuf) -> PathBuf {
    let has_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if has_pdf {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".pdf");
        PathBuf::from(name)
    }
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
