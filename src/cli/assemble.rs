//! Assemble command implementation

use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use crate::encoder::write_gif;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the assemble command
pub fn run_assemble(frames: &[PathBuf], output: &Path, delay_ms: u64, loops: u32) -> ExitCode {
    let mut images: Vec<RgbaImage> = Vec::with_capacity(frames.len());
    for path in frames {
        match image::open(path) {
            Ok(img) => images.push(img.to_rgba8()),
            Err(e) => {
                eprintln!("Error: Cannot open input file '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let durations = vec![Duration::from_millis(delay_ms); images.len()];
    if let Err(e) = write_gif(&images, &durations, loops, output) {
        eprintln!("Error: Failed to write '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {} ({} frames)", output.display(), images.len());
    ExitCode::from(EXIT_SUCCESS)
}
