//! Info command implementation

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::animated::{load_path, LoadedImage};
use crate::config::AgifConfig;

use super::{exit_code_for, EXIT_ERROR, EXIT_SUCCESS};

/// Summary printed by `agif info`
#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub animated: bool,
    pub frames: usize,
    pub frame_durations_ms: Vec<u64>,
    pub total_duration_ms: u64,
    /// 0 means the animation loops forever
    pub loop_count: u32,
}

impl ImageSummary {
    pub fn from_loaded(file: &Path, loaded: &LoadedImage) -> Self {
        let (width, height) = loaded.dimensions();
        let (frame_durations_ms, total_duration_ms, loop_count) = match loaded {
            LoadedImage::Animated(gif) => (
                gif.frame_durations()
                    .iter()
                    .map(|d| d.as_millis() as u64)
                    .collect(),
                gif.total_duration().as_millis() as u64,
                gif.loop_count(),
            ),
            LoadedImage::Static { .. } => (vec![0], 0, 1),
        };

        Self {
            file: file.display().to_string(),
            width,
            height,
            scale: loaded.scale(),
            animated: loaded.is_animated(),
            frames: loaded.frame_count(),
            frame_durations_ms,
            total_duration_ms,
            loop_count,
        }
    }

    fn print_text(&self) {
        println!("File:      {}", self.file);
        println!("Size:      {}x{} px @{}x", self.width, self.height, self.scale);
        if !self.animated {
            println!("Frames:    1 (static)");
            return;
        }
        println!("Frames:    {}", self.frames);
        println!("Duration:  {} ms", self.total_duration_ms);
        if self.loop_count == 0 {
            println!("Loops:     forever");
        } else {
            println!("Loops:     {}", self.loop_count);
        }
        println!();
        for (i, ms) in self.frame_durations_ms.iter().enumerate() {
            println!("  frame {:>4}  {:>6} ms", i, ms);
        }
    }
}

/// Execute the info command
pub fn run_info(input: &Path, json: bool, config: &AgifConfig) -> ExitCode {
    let loaded = match load_path(input, &config.image_options()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: Cannot open '{}': {}", input.display(), e);
            return exit_code_for(&e);
        }
    };

    let summary = ImageSummary::from_loaded(input, &loaded);
    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        summary.print_text();
    }

    ExitCode::from(EXIT_SUCCESS)
}
