//! Animated GIF image type
//!
//! [`GifImage`] exposes the timing of an animation (per-frame durations,
//! total duration, loop count) and random access to fully composited frames.
//! Timing is known right after construction; pixels are decoded according to
//! the [`CachePolicy`].

use crate::cache::{CacheMode, CachePolicy, FrameCache};
use crate::decoder::{decode_all, is_gif, scan, GifMetadata};
use crate::error::{GifError, Result};
use crate::scale::{find_resource, resource_scale_from_path};
use crate::timing::{total_duration, DelayPolicy};
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Decoding options shared by all constructors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageOptions {
    pub delay: DelayPolicy,
    pub cache: CachePolicy,
}

/// An animated GIF with at least two frames.
pub struct GifImage {
    metadata: GifMetadata,
    frame_durations: Vec<Duration>,
    total_duration: Duration,
    scale: f32,
    cache: Mutex<FrameCache>,
}

impl GifImage {
    /// Decode an animation from GIF bytes with default options.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>, scale: f32) -> Result<Self> {
        Self::from_bytes_with_options(data, scale, &ImageOptions::default())
    }

    pub fn from_bytes_with_options(
        data: impl Into<Arc<[u8]>>,
        scale: f32,
        options: &ImageOptions,
    ) -> Result<Self> {
        let data: Arc<[u8]> = data.into();
        let metadata = scan(&data)?;
        if metadata.frame_count() < 2 {
            return Err(GifError::NotAnimated);
        }

        let frame_durations = options.delay.normalize_all(&metadata.delays_cs);
        let total_duration = total_duration(&frame_durations);
        let cache = FrameCache::new(data, &metadata, options.cache)?;

        Ok(Self {
            metadata,
            frame_durations,
            total_duration,
            scale: sanitize_scale(scale),
            cache: Mutex::new(cache),
        })
    }

    /// Open a GIF file. The scale is taken from the file name (`name@2x.gif`).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, &ImageOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: &ImageOptions) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "opening GIF");
        Self::from_bytes_with_options(data, resource_scale_from_path(path), options)
    }

    /// Open a named resource, preferring the variant matching `display_scale`.
    ///
    /// See [`find_resource`] for the lookup order.
    pub fn open_named<P: AsRef<Path>>(
        dirs: &[P],
        name: &str,
        display_scale: u32,
        options: &ImageOptions,
    ) -> Result<Self> {
        let path = find_resource(dirs, name, display_scale)
            .ok_or_else(|| GifError::ResourceNotFound(name.to_string()))?;
        Self::open_with_options(path, options)
    }

    /// Display duration of each frame, one entry per frame.
    pub fn frame_durations(&self) -> &[Duration] {
        &self.frame_durations
    }

    /// Sum of [`frame_durations`](Self::frame_durations).
    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Number of times the animation plays before stopping; 0 loops forever.
    pub fn loop_count(&self) -> u32 {
        self.metadata.loop_count
    }

    pub fn is_infinite(&self) -> bool {
        self.metadata.loop_count == 0
    }

    pub fn frame_count(&self) -> usize {
        self.frame_durations.len()
    }

    /// Pixel width of the logical screen
    pub fn width(&self) -> u32 {
        self.metadata.width
    }

    /// Pixel height of the logical screen
    pub fn height(&self) -> u32 {
        self.metadata.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Size in points: pixel size divided by scale.
    pub fn size(&self) -> (f32, f32) {
        (
            self.metadata.width as f32 / self.scale,
            self.metadata.height as f32 / self.scale,
        )
    }

    pub fn metadata(&self) -> &GifMetadata {
        &self.metadata
    }

    pub fn cache_mode(&self) -> CacheMode {
        self.lock_cache().mode()
    }

    /// Composited image for frame `index` (zero-based).
    pub fn frame(&self, index: usize) -> Result<Arc<RgbaImage>> {
        self.lock_cache().get(index)
    }

    /// First frame, shown before playback starts.
    pub fn poster(&self) -> Result<Arc<RgbaImage>> {
        self.frame(0)
    }

    /// Iterate over every frame in order.
    pub fn frames(&self) -> impl Iterator<Item = Result<Arc<RgbaImage>>> + '_ {
        (0..self.frame_count()).map(move |i| self.frame(i))
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, FrameCache> {
        // The cache holds no invariant a panicking reader could break
        self.cache.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!("frame cache lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl fmt::Debug for GifImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GifImage")
            .field("width", &self.metadata.width)
            .field("height", &self.metadata.height)
            .field("frames", &self.frame_count())
            .field("total_duration", &self.total_duration)
            .field("loop_count", &self.metadata.loop_count)
            .field("scale", &self.scale)
            .finish()
    }
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Result of loading arbitrary image data
#[derive(Debug)]
pub enum LoadedImage {
    /// Multi-frame GIF
    Animated(GifImage),
    /// Single-frame GIF or any other raster format
    Static { image: RgbaImage, scale: f32 },
}

impl LoadedImage {
    pub fn is_animated(&self) -> bool {
        matches!(self, LoadedImage::Animated(_))
    }

    pub fn frame_count(&self) -> usize {
        match self {
            LoadedImage::Animated(gif) => gif.frame_count(),
            LoadedImage::Static { .. } => 1,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            LoadedImage::Animated(gif) => (gif.width(), gif.height()),
            LoadedImage::Static { image, .. } => image.dimensions(),
        }
    }

    pub fn scale(&self) -> f32 {
        match self {
            LoadedImage::Animated(gif) => gif.scale(),
            LoadedImage::Static { scale, .. } => *scale,
        }
    }

    /// First frame of an animation, or the static image.
    pub fn poster(&self) -> Result<Arc<RgbaImage>> {
        match self {
            LoadedImage::Animated(gif) => gif.poster(),
            LoadedImage::Static { image, .. } => Ok(Arc::new(image.clone())),
        }
    }
}

/// Load image data, producing an animation only when there is something to animate.
pub fn load(data: impl Into<Arc<[u8]>>, scale: f32, options: &ImageOptions) -> Result<LoadedImage> {
    let data: Arc<[u8]> = data.into();
    let scale = sanitize_scale(scale);

    if !is_gif(&data) {
        let image = image::load_from_memory(&data)?.to_rgba8();
        return Ok(LoadedImage::Static { image, scale });
    }

    match GifImage::from_bytes_with_options(Arc::clone(&data), scale, options) {
        Ok(gif) => Ok(LoadedImage::Animated(gif)),
        Err(GifError::NotAnimated) => {
            tracing::debug!("single-frame GIF, loading as static image");
            let image = decode_all(data)?
                .into_iter()
                .next()
                .ok_or(GifError::NoFrames)?;
            Ok(LoadedImage::Static { image, scale })
        }
        Err(e) => Err(e),
    }
}

/// Load an image file; the scale is taken from the file name.
pub fn load_path(path: impl AsRef<Path>, options: &ImageOptions) -> Result<LoadedImage> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    load(data, resource_scale_from_path(path), options)
}
