//! GIF metadata scanning and sequential frame compositing
//!
//! Block parsing and LZW decompression are handled by the `gif` crate. This
//! module turns its raw frames (sub-rectangles with a disposal method) into
//! full logical-screen images.

use crate::error::{GifError, Result};
use gif::{ColorOutput, DecodeOptions, DisposalMethod, Repeat};
use image::{Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

/// Metadata collected without compositing any pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GifMetadata {
    /// Logical screen width
    pub width: u32,
    /// Logical screen height
    pub height: u32,
    /// Raw per-frame delays in centiseconds
    pub delays_cs: Vec<u16>,
    /// Number of plays, 0 for infinite
    pub loop_count: u32,
}

impl GifMetadata {
    pub fn frame_count(&self) -> usize {
        self.delays_cs.len()
    }

    /// Bytes needed to hold every composited frame as RGBA
    pub fn decoded_size(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * 4 * self.frame_count() as u64
    }
}

/// Largest logical screen accepted, in pixels. A composited canvas of this
/// size takes 256 MiB.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 26;

/// Check for a `GIF87a` or `GIF89a` signature.
pub fn is_gif(data: &[u8]) -> bool {
    data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a")
}

/// Convert the NETSCAPE2.0 repeat field to a play count.
///
/// An extension value of 0 loops forever. A value of `n` repeats the
/// animation `n` times after the first play. A stream without the extension
/// (reported by the decoder as `Finite(0)`) plays once.
pub fn loop_count_from_repeat(repeat: Repeat) -> u32 {
    match repeat {
        Repeat::Infinite => 0,
        Repeat::Finite(n) => u32::from(n) + 1,
    }
}

/// Inverse of [`loop_count_from_repeat`].
pub fn repeat_from_loop_count(loop_count: u32) -> Repeat {
    match loop_count {
        0 => Repeat::Infinite,
        n => Repeat::Finite(u16::try_from(n - 1).unwrap_or(u16::MAX)),
    }
}

/// Read frame count, delays, screen size and loop count.
///
/// Frames are decoded in indexed mode only; nothing is composited.
pub fn scan(data: &[u8]) -> Result<GifMetadata> {
    if !is_gif(data) {
        return Err(GifError::NotAGif);
    }

    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);
    let mut decoder = options.read_info(data).map_err(|e| open_error(data, e))?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    check_canvas_size(width, height)?;

    let mut delays_cs = Vec::new();
    while let Some(frame) = decoder.read_next_frame()? {
        delays_cs.push(frame.delay);
    }

    if delays_cs.is_empty() {
        return Err(GifError::NoFrames);
    }

    // The application extension may sit anywhere before the first image,
    // so the loop count is only final once every frame has been read.
    let loop_count = loop_count_from_repeat(decoder.repeat());

    tracing::debug!(
        width,
        height,
        frames = delays_cs.len(),
        loop_count,
        "scanned GIF"
    );

    Ok(GifMetadata {
        width,
        height,
        delays_cs,
        loop_count,
    })
}

fn check_canvas_size(width: u32, height: u32) -> Result<()> {
    if u64::from(width) * u64::from(height) > MAX_CANVAS_PIXELS {
        return Err(GifError::TooLarge { width, height });
    }
    Ok(())
}

/// Map a failure to read up to the first frame. A stream that reaches its
/// trailer without any image block has no frames rather than being corrupt.
fn open_error(data: &[u8], err: gif::DecodingError) -> GifError {
    if ends_before_first_image(data) {
        GifError::NoFrames
    } else {
        GifError::Decode(err)
    }
}

/// Walk the header, global color table and extension blocks, and report
/// whether the trailer comes before any image descriptor.
fn ends_before_first_image(data: &[u8]) -> bool {
    // Signature (6) + logical screen descriptor (7)
    let Some(&packed) = data.get(10) else {
        return false;
    };
    let mut pos = 13;
    if packed & 0x80 != 0 {
        pos += 3 << ((packed & 0x07) + 1);
    }

    loop {
        match data.get(pos) {
            Some(0x3b) => return true,
            Some(0x21) => {
                // Introducer and label, then length-prefixed sub-blocks
                pos += 2;
                loop {
                    let Some(&len) = data.get(pos) else {
                        return false;
                    };
                    pos += 1 + usize::from(len);
                    if len == 0 {
                        break;
                    }
                }
            }
            _ => return false,
        }
    }
}

/// Sequential decoder producing fully composited frames.
///
/// Frames can only be produced in order; seeking backwards means creating a
/// new stream.
pub struct FrameStream {
    decoder: gif::Decoder<Cursor<Arc<[u8]>>>,
    canvas: RgbaImage,
    next_index: usize,
}

impl FrameStream {
    pub fn new(data: Arc<[u8]>) -> Result<Self> {
        if !is_gif(&data) {
            return Err(GifError::NotAGif);
        }

        let mut options = DecodeOptions::new();
        options.set_color_output(ColorOutput::RGBA);
        let decoder = options
            .read_info(Cursor::new(Arc::clone(&data)))
            .map_err(|e| open_error(&data, e))?;

        let width = u32::from(decoder.width());
        let height = u32::from(decoder.height());
        check_canvas_size(width, height)?;

        Ok(Self {
            decoder,
            canvas: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            next_index: 0,
        })
    }

    /// Index of the frame the next call to [`next_frame`](Self::next_frame) returns
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Decode and composite the next frame, or `None` at the end of the stream.
    pub fn next_frame(&mut self) -> Result<Option<RgbaImage>> {
        let Some(frame) = self.decoder.read_next_frame()? else {
            return Ok(None);
        };

        let width = u32::from(frame.width);
        let height = u32::from(frame.height);
        let pixels = RgbaImage::from_raw(width, height, frame.buffer.to_vec()).ok_or_else(|| {
            GifError::Malformed(format!(
                "frame {} buffer does not match {}x{}",
                self.next_index, width, height
            ))
        })?;

        let composed = composite(
            &mut self.canvas,
            &pixels,
            u32::from(frame.left),
            u32::from(frame.top),
            frame.dispose,
        );

        tracing::trace!(index = self.next_index, "composited frame");
        self.next_index += 1;
        Ok(Some(composed))
    }
}

/// Blend `current` over `previous`, then update `previous` per the disposal method.
fn blend_and_dispose_pixel(dispose: DisposalMethod, previous: &mut Rgba<u8>, current: &mut Rgba<u8>) {
    if current[3] == 0 {
        *current = *previous;
    }

    match dispose {
        // `Any` is underspecified; viewers treat it as `Keep`
        DisposalMethod::Any | DisposalMethod::Keep => *previous = *current,
        DisposalMethod::Background => *previous = Rgba([0, 0, 0, 0]),
        DisposalMethod::Previous => {}
    }
}

/// Draw a frame rectangle at (`left`, `top`) over the canvas.
///
/// Returns the image to display. The canvas is left in the state the next
/// frame draws over. Frame pixels outside the canvas are clipped.
pub(crate) fn composite(
    canvas: &mut RgbaImage,
    frame: &RgbaImage,
    left: u32,
    top: u32,
    dispose: DisposalMethod,
) -> RgbaImage {
    let (width, height) = canvas.dimensions();
    let (frame_width, frame_height) = frame.dimensions();

    RgbaImage::from_fn(width, height, |x, y| {
        let previous = canvas.get_pixel_mut(x, y);
        let frame_x = x.wrapping_sub(left);
        let frame_y = y.wrapping_sub(top);

        if frame_x < frame_width && frame_y < frame_height {
            let mut pixel = *frame.get_pixel(frame_x, frame_y);
            blend_and_dispose_pixel(dispose, previous, &mut pixel);
            pixel
        } else {
            *previous
        }
    })
}

/// Decode every frame of a GIF.
pub fn decode_all(data: Arc<[u8]>) -> Result<Vec<RgbaImage>> {
    let mut stream = FrameStream::new(data)?;
    let mut frames = Vec::new();
    while let Some(frame) = stream.next_frame()? {
        frames.push(frame);
    }
    Ok(frames)
}
