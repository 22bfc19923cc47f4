//! Extract command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::AgifConfig;
use crate::error::GifError;
use crate::output::{frame_output_path, save_png, scale_image};

use super::{open_animation, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the extract command
pub fn run_extract(
    input: &Path,
    output: Option<&Path>,
    frame: Option<usize>,
    scale: u8,
    config: &AgifConfig,
) -> ExitCode {
    let gif = match open_animation(input, config) {
        Ok(gif) => gif,
        Err(code) => return code,
    };

    let indices: Vec<usize> = match frame {
        Some(index) if index >= gif.frame_count() => {
            eprintln!(
                "Error: Frame {} out of range ({} has {} frames)",
                index,
                input.display(),
                gif.frame_count()
            );
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Some(index) => vec![index],
        None => (0..gif.frame_count()).collect(),
    };

    for index in indices {
        let path = frame_output_path(input, index, output);
        let result = gif
            .frame(index)
            .and_then(|image| save_png(&scale_image((*image).clone(), scale), &path));
        if let Err(e) = result {
            report_failure(index, &e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn report_failure(index: usize, err: &GifError) {
    eprintln!("Error: Failed to extract frame {}: {}", index, err);
}
