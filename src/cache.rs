//! Decoded frame cache
//!
//! Small animations are decoded once, up front. Animations whose decoded
//! frames would exceed the eager limit are decoded on demand through a
//! sliding window: a request for frame `i` decodes and keeps frames
//! `i..i+window`, and drops everything else except the poster frame.

use crate::decoder::{FrameStream, GifMetadata};
use crate::error::{GifError, Result};
use image::RgbaImage;
use std::sync::Arc;

/// Default decoded-size threshold for eager decoding (16 MiB)
pub const DEFAULT_EAGER_LIMIT_BYTES: u64 = 16 * 1024 * 1024;

/// Default number of frames kept ahead of the requested one
pub const DEFAULT_PREFETCH_WINDOW: usize = 10;

/// Memory policy for decoded frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Decode everything up front when all frames fit in this many bytes
    pub eager_limit_bytes: u64,
    /// Frames decoded and retained per cache miss in windowed mode
    pub prefetch_window: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            eager_limit_bytes: DEFAULT_EAGER_LIMIT_BYTES,
            prefetch_window: DEFAULT_PREFETCH_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Every frame resident
    Eager,
    /// Poster frame plus a window of `window` frames
    Windowed { window: usize },
}

pub struct FrameCache {
    data: Arc<[u8]>,
    mode: CacheMode,
    frames: Vec<Option<Arc<RgbaImage>>>,
    stream: Option<FrameStream>,
}

impl FrameCache {
    /// Build the cache and decode the frames the mode keeps resident from the start.
    pub fn new(data: Arc<[u8]>, meta: &GifMetadata, policy: CachePolicy) -> Result<Self> {
        let frame_count = meta.frame_count();
        let mode = if meta.decoded_size() <= policy.eager_limit_bytes {
            CacheMode::Eager
        } else {
            CacheMode::Windowed {
                window: policy.prefetch_window.max(1),
            }
        };

        let mut cache = Self {
            data,
            mode,
            frames: vec![None; frame_count],
            stream: None,
        };

        match mode {
            CacheMode::Eager => {
                cache.decode_range(0, frame_count)?;
                // Nothing left to decode
                cache.stream = None;
            }
            CacheMode::Windowed { .. } => cache.decode_range(0, 1)?,
        }

        tracing::debug!(
            ?mode,
            frames = frame_count,
            decoded_size = meta.decoded_size(),
            "frame cache ready"
        );

        Ok(cache)
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of decoded frames currently held
    pub fn resident_frames(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    /// Get a composited frame, decoding it if needed.
    pub fn get(&mut self, index: usize) -> Result<Arc<RgbaImage>> {
        let count = self.frame_count();
        if index >= count {
            return Err(GifError::FrameOutOfRange { index, count });
        }

        if let Some(frame) = &self.frames[index] {
            return Ok(Arc::clone(frame));
        }

        let end = match self.mode {
            CacheMode::Eager => count,
            CacheMode::Windowed { window } => index.saturating_add(window).min(count),
        };

        tracing::trace!(index, end, "frame cache miss");
        self.evict_outside(index, end);
        self.decode_range(index, end)?;

        self.frames[index].clone().ok_or_else(|| {
            GifError::Malformed(format!("stream ended before frame {}", index))
        })
    }

    /// Drop decoded frames outside `start..end`, keeping the poster frame.
    fn evict_outside(&mut self, start: usize, end: usize) {
        if self.mode == CacheMode::Eager {
            return;
        }
        for (i, slot) in self.frames.iter_mut().enumerate().skip(1) {
            if i < start || i >= end {
                *slot = None;
            }
        }
    }

    /// Decode frames up to `end`, storing those in `start..end`.
    fn decode_range(&mut self, start: usize, end: usize) -> Result<()> {
        let restart = self
            .stream
            .as_ref()
            .map_or(true, |stream| stream.next_index() > start);
        if restart {
            tracing::trace!(start, "restarting frame stream");
            self.stream = Some(FrameStream::new(Arc::clone(&self.data))?);
        }

        let Some(stream) = self.stream.as_mut() else {
            return Ok(());
        };

        let result = Self::advance(stream, &mut self.frames, start, end);
        if result.is_err() {
            // A failed stream is in an unknown position
            self.stream = None;
        }
        result
    }

    fn advance(
        stream: &mut FrameStream,
        frames: &mut [Option<Arc<RgbaImage>>],
        start: usize,
        end: usize,
    ) -> Result<()> {
        while stream.next_index() < end {
            let index = stream.next_index();
            let Some(frame) = stream.next_frame()? else {
                break;
            };
            if index >= start {
                if let Some(slot) = frames.get_mut(index) {
                    *slot = Some(Arc::new(frame));
                }
            }
        }
        Ok(())
    }
}
