//! Error type for decoding, caching and encoding animated images

use std::io;
use thiserror::Error;

/// Errors produced while loading, decoding or writing animated images
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GifError {
    /// IO error while reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The GIF stream is malformed or truncated
    #[error("GIF decode error: {0}")]
    Decode(#[from] gif::DecodingError),
    /// Error from the `image` crate (non-GIF input, PNG/GIF encoding)
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Input does not carry a GIF signature
    #[error("data is not a GIF image")]
    NotAGif,
    /// The GIF stream contains no image blocks
    #[error("GIF contains no frames")]
    NoFrames,
    /// Frame data does not match its declared geometry
    #[error("malformed frame: {0}")]
    Malformed(String),
    /// Logical screen exceeds the canvas size limit
    #[error("GIF canvas {width}x{height} exceeds the size limit")]
    TooLarge { width: u32, height: u32 },
    /// The GIF has a single frame and cannot be animated
    #[error("GIF has a single frame")]
    NotAnimated,
    /// Frame index past the end of the animation
    #[error("frame index {index} out of range (animation has {count} frames)")]
    FrameOutOfRange { index: usize, count: usize },
    /// Caller supplied inconsistent arguments
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Named resource was not found in any search directory
    #[error("resource '{0}' not found")]
    ResourceNotFound(String),
}

/// Result alias used throughout the crate
pub type Result<T, E = GifError> = std::result::Result<T, E>;

impl GifError {
    /// Short machine-readable category, used in log fields and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            GifError::Io(_) => "io_error",
            GifError::Decode(_) => "decode_error",
            GifError::Image(_) => "image_error",
            GifError::NotAGif => "not_a_gif",
            GifError::NoFrames => "no_frames",
            GifError::Malformed(_) => "malformed",
            GifError::TooLarge { .. } => "too_large",
            GifError::NotAnimated => "not_animated",
            GifError::FrameOutOfRange { .. } => "frame_out_of_range",
            GifError::InvalidInput(_) => "invalid_input",
            GifError::ResourceNotFound(_) => "resource_not_found",
        }
    }
}
