//! PNG output and frame file naming

use crate::error::Result;
use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// Returns the image unchanged for a factor of 0 or 1.
pub fn scale_image(image: RgbaImage, factor: u8) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    let new_w = w * u32::from(factor);
    let new_h = h * u32::from(factor);
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}

/// Path for an extracted frame: `{dir}/{stem}_{index:03}.png`.
///
/// `dir` defaults to the input's directory. The stem drops any `@Nx` scale
/// suffix so that all variants of a resource extract to the same names.
pub fn frame_output_path(input: &Path, index: usize, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .map(strip_scale_suffix)
        .unwrap_or("frame");
    let dir = out_dir.or_else(|| input.parent()).unwrap_or(Path::new(""));
    dir.join(format!("{}_{:03}.png", stem, index))
}

fn strip_scale_suffix(stem: &str) -> &str {
    match stem.rsplit_once('@') {
        Some((base, suffix))
            if !base.is_empty()
                && suffix.len() > 1
                && suffix[..suffix.len() - 1].bytes().all(|b| b.is_ascii_digit())
                && suffix.ends_with(['x', 'X']) =>
        {
            base
        }
        _ => stem,
    }
}
