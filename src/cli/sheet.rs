//! Sheet command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::AgifConfig;
use crate::output::{save_png, scale_image};
use crate::spritesheet::{render_image_sheet, SheetFrame};

use super::{open_animation, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the sheet command
pub fn run_sheet(
    input: &Path,
    output: &Path,
    cols: Option<u32>,
    layout: bool,
    scale: u8,
    config: &AgifConfig,
) -> ExitCode {
    let gif = match open_animation(input, config) {
        Ok(gif) => gif,
        Err(code) => return code,
    };

    let (sheet, frames) = match render_image_sheet(&gif, cols) {
        Ok(rendered) => rendered,
        Err(e) => {
            eprintln!("Error: Failed to render sheet: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = save_png(&scale_image(sheet, scale), output) {
        eprintln!("Error: Failed to save '{}': {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", output.display());

    if layout {
        let layout_path = output.with_extension("json");
        if let Err(e) = write_layout(&frames, scale, &layout_path) {
            eprintln!("Error: Failed to write '{}': {}", layout_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        println!("Saved: {}", layout_path.display());
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Write frame placement, in output pixels, as pretty JSON
fn write_layout(frames: &[SheetFrame], scale: u8, path: &Path) -> std::io::Result<()> {
    let factor = u32::from(scale.max(1));
    let scaled: Vec<SheetFrame> = frames
        .iter()
        .map(|f| SheetFrame {
            x: f.x * factor,
            y: f.y * factor,
            width: f.width * factor,
            height: f.height * factor,
            ..f.clone()
        })
        .collect();

    let json = serde_json::to_string_pretty(&scaled)?;
    std::fs::write(path, json)
}
