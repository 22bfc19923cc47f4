//! Display scale from resource file names
//!
//! Resources follow the `name@2x.gif` convention: the scale factor is encoded
//! as an `@Nx` suffix on the file stem, optionally followed by a `~device`
//! modifier (`name@2x~ipad.gif`).

use std::path::{Path, PathBuf};

/// Extension assumed for resource names given without one
pub const DEFAULT_EXTENSION: &str = "gif";

/// Get the display scale of a resource from its file name.
///
/// Accepts a full path or only a file name. Returns `N` for a stem ending in
/// `@Nx` and `1.0` for everything else, including malformed suffixes.
///
/// # Examples
///
/// ```
/// use animgif::scale::resource_scale_from_path;
///
/// assert_eq!(resource_scale_from_path("spinner@2x.gif"), 2.0);
/// assert_eq!(resource_scale_from_path("assets/spinner@3X.gif"), 3.0);
/// assert_eq!(resource_scale_from_path("spinner.gif"), 1.0);
/// ```
pub fn resource_scale_from_path(path: impl AsRef<Path>) -> f32 {
    path.as_ref()
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(parse_scale_suffix)
        .map(|n| n as f32)
        .unwrap_or(1.0)
}

/// Parse the `@Nx` suffix of a file stem.
fn parse_scale_suffix(stem: &str) -> Option<u32> {
    // Device modifiers come after the scale: name@2x~ipad
    let stem = stem.split('~').next().unwrap_or(stem);
    let (_, suffix) = stem.rsplit_once('@')?;
    let digits = suffix.strip_suffix('x').or_else(|| suffix.strip_suffix('X'))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    (n > 0).then_some(n)
}

/// Build the file name of the `scale` variant of a resource.
///
/// A name without an extension gets [`DEFAULT_EXTENSION`].
pub fn scaled_file_name(name: &str, scale: u32) -> String {
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, ext),
        _ => (name, DEFAULT_EXTENSION),
    };
    if scale <= 1 {
        format!("{}.{}", stem, ext)
    } else {
        format!("{}@{}x.{}", stem, scale, ext)
    }
}

/// Look up a named resource across directories.
///
/// For each directory in order, tries every scale variant from
/// `display_scale` down to 1 and returns the first file that exists. Names
/// that already carry a scale suffix are only tried verbatim.
pub fn find_resource<P: AsRef<Path>>(
    dirs: &[P],
    name: &str,
    display_scale: u32,
) -> Option<PathBuf> {
    let has_suffix = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(parse_scale_suffix)
        .is_some();

    let candidates: Vec<String> = if has_suffix {
        vec![scaled_file_name(name, 1)]
    } else {
        (1..=display_scale.max(1))
            .rev()
            .map(|scale| scaled_file_name(name, scale))
            .collect()
    };

    for dir in dirs {
        for candidate in &candidates {
            let path = dir.as_ref().join(candidate);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "resolved resource '{}'", name);
                return Some(path);
            }
        }
    }

    None
}
