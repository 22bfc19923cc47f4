//! animgif - Animated GIF images with frame timing, loop counts and scale
//!
//! This library provides functionality to:
//! - Read per-frame durations, total duration and loop count of a GIF
//! - Access fully composited frames by index, decoded eagerly or on demand
//! - Derive the display scale of a resource from its `@Nx` file name suffix
//! - Drive playback from elapsed time with [`Player`]
//! - Write animations and sprite sheets back out

pub mod animated;
pub mod cache;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod output;
pub mod player;
pub mod scale;
pub mod spritesheet;
pub mod timing;

#[cfg(test)]
mod fixtures;

pub use animated::{load, load_path, GifImage, ImageOptions, LoadedImage};
pub use cache::CachePolicy;
pub use error::GifError;
pub use player::{FrameStep, Player};
pub use scale::resource_scale_from_path;
pub use timing::DelayPolicy;
