//! Hand-built GIF streams for unit tests

use gif::{DisposalMethod, Repeat};
use image::Rgba;
use std::borrow::Cow;

/// Global palette: red, green, blue, white
pub(crate) const PALETTE: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];

pub(crate) const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub(crate) const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub(crate) const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub(crate) const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Palette index used as the transparent color in fixtures
pub(crate) const TRANSPARENT: u8 = 3;

pub(crate) struct FixtureFrame {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub indices: Vec<u8>,
    pub delay: u16,
    pub dispose: DisposalMethod,
    pub transparent: Option<u8>,
}

impl FixtureFrame {
    /// Full-rect frame filled with one palette index
    pub fn solid(width: u16, height: u16, index: u8, delay: u16) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
            indices: vec![index; usize::from(width) * usize::from(height)],
            delay,
            dispose: DisposalMethod::Keep,
            transparent: None,
        }
    }

    pub fn at(mut self, left: u16, top: u16) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn dispose(mut self, dispose: DisposalMethod) -> Self {
        self.dispose = dispose;
        self
    }

    pub fn with_indices(mut self, indices: Vec<u8>) -> Self {
        self.indices = indices;
        self.transparent = Some(TRANSPARENT);
        self
    }
}

/// Encode frames into an in-memory GIF. `repeat` of `None` omits the loop extension.
pub(crate) fn build_gif(
    width: u16,
    height: u16,
    frames: &[FixtureFrame],
    repeat: Option<Repeat>,
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width, height, &PALETTE).unwrap();
        if let Some(repeat) = repeat {
            encoder.set_repeat(repeat).unwrap();
        }
        for f in frames {
            let mut frame = gif::Frame::default();
            frame.left = f.left;
            frame.top = f.top;
            frame.width = f.width;
            frame.height = f.height;
            frame.delay = f.delay;
            frame.dispose = f.dispose;
            frame.transparent = f.transparent;
            frame.buffer = Cow::Borrowed(&f.indices);
            encoder.write_frame(&frame).unwrap();
        }
    }
    out
}

/// `count` solid frames cycling red, green, blue, each `delay` centiseconds
pub(crate) fn solid_gif(
    width: u16,
    height: u16,
    count: usize,
    delay: u16,
    repeat: Option<Repeat>,
) -> Vec<u8> {
    let frames: Vec<FixtureFrame> = (0..count)
        .map(|i| FixtureFrame::solid(width, height, (i % 3) as u8, delay))
        .collect();
    build_gif(width, height, &frames, repeat)
}

/// Color a solid fixture frame is filled with
pub(crate) fn solid_color(i: usize) -> Rgba<u8> {
    [RED, GREEN, BLUE][i % 3]
}
