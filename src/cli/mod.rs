//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod assemble;
mod extract;
mod info;
mod sheet;
mod timeline;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::animated::{GifImage, ImageOptions};
use crate::config::{load_config, AgifConfig};
use crate::error::GifError;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// agif - Inspect, extract and assemble animated GIFs
#[derive(Parser)]
#[command(name = "agif")]
#[command(about = "agif - Inspect, extract and assemble animated GIFs")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: discovered agif.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show size, frame timing and loop count of an image
    Info {
        /// Input image (GIF, or any format for a static summary)
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write frames of an animated GIF as PNG files
    Extract {
        /// Input GIF
        input: PathBuf,

        /// Output directory (default: next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only extract the frame with this index
        #[arg(short, long)]
        frame: Option<usize>,

        /// Upscale frames by integer factor (1-16, default from config)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: Option<u8>,
    },

    /// Render all frames into a sprite sheet PNG
    Sheet {
        /// Input GIF
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of columns (default: one row)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        cols: Option<u32>,

        /// Also write frame placement and timing as JSON next to the sheet
        #[arg(long)]
        layout: bool,

        /// Upscale the sheet by integer factor (1-16, default from config)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: Option<u8>,
    },

    /// Build an animated GIF from PNG frames
    Assemble {
        /// Frame images, in order
        #[arg(required = true)]
        frames: Vec<PathBuf>,

        /// Output GIF file
        #[arg(short, long)]
        output: PathBuf,

        /// Duration of each frame in milliseconds
        #[arg(long, default_value = "100")]
        delay: u64,

        /// Number of plays (0 = loop forever)
        #[arg(long, default_value = "0")]
        loops: u32,
    },

    /// Simulate playback and print every frame change
    Timeline {
        /// Input GIF
        input: PathBuf,

        /// Ticks per second of the simulated display clock
        #[arg(long, default_value = "60", value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: u32,

        /// Seconds to simulate (default: one pass, or all passes of a finite animation)
        #[arg(long)]
        seconds: Option<f64>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Info { input, json } => info::run_info(&input, json, &config),
        Commands::Extract {
            input,
            output,
            frame,
            scale,
        } => extract::run_extract(
            &input,
            output.as_deref(),
            frame,
            scale.unwrap_or(config.output.scale),
            &config,
        ),
        Commands::Sheet {
            input,
            output,
            cols,
            layout,
            scale,
        } => sheet::run_sheet(
            &input,
            &output,
            cols,
            layout,
            scale.unwrap_or(config.output.scale),
            &config,
        ),
        Commands::Assemble {
            frames,
            output,
            delay,
            loops,
        } => assemble::run_assemble(&frames, &output, delay, loops),
        Commands::Timeline {
            input,
            fps,
            seconds,
        } => timeline::run_timeline(&input, fps, seconds, &config),
    }
}

/// Exit code for a failed load: unreadable input is an argument problem
pub(crate) fn exit_code_for(err: &GifError) -> ExitCode {
    match err {
        GifError::Io(_) | GifError::NotAGif | GifError::NotAnimated => {
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Open an animated GIF for a command, reporting failures on stderr.
pub(crate) fn open_animation(input: &Path, config: &AgifConfig) -> Result<GifImage, ExitCode> {
    let options: ImageOptions = config.image_options();
    GifImage::open_with_options(input, &options).map_err(|e| {
        eprintln!("Error: Cannot open '{}': {}", input.display(), e);
        tracing::debug!(kind = e.kind(), "open failed");
        exit_code_for(&e)
    })
}
