//! Sprite sheet export - lays the frames of an animation out in a grid

use crate::animated::GifImage;
use crate::error::Result;
use image::{imageops, Rgba, RgbaImage};
use serde::Serialize;
use std::borrow::Borrow;

/// Transparent color used for empty cells
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Placement and timing of one frame within a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetFrame {
    pub index: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub duration_ms: u64,
}

/// Columns and rows for `count` cells. `cols` of `None` lays out one row.
pub fn grid_size(count: usize, cols: Option<u32>) -> (u32, u32) {
    let count = count.max(1) as u32;
    let columns = cols.unwrap_or(count).clamp(1, count);
    (columns, count.div_ceil(columns))
}

/// Render frames into a sprite sheet grid.
///
/// Cells are sized to the largest frame; smaller frames sit in the top-left
/// corner of their cell.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use animgif::spritesheet::render_spritesheet;
///
/// let frame = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
/// let frames = vec![frame.clone(), frame.clone(), frame.clone(), frame];
///
/// let sheet = render_spritesheet(&frames, None);
/// assert_eq!(sheet.dimensions(), (8, 2));
///
/// let sheet = render_spritesheet(&frames, Some(2));
/// assert_eq!(sheet.dimensions(), (4, 4));
/// ```
pub fn render_spritesheet<F: Borrow<RgbaImage>>(frames: &[F], cols: Option<u32>) -> RgbaImage {
    let frames: Vec<&RgbaImage> = frames
        .iter()
        .map(|f| <F as Borrow<RgbaImage>>::borrow(f))
        .collect();
    if frames.is_empty() {
        return RgbaImage::from_pixel(1, 1, TRANSPARENT);
    }

    let cell_width = frames.iter().map(|f| f.width()).max().unwrap_or(1);
    let cell_height = frames.iter().map(|f| f.height()).max().unwrap_or(1);
    let (columns, rows) = grid_size(frames.len(), cols);

    let mut sheet = RgbaImage::from_pixel(columns * cell_width, rows * cell_height, TRANSPARENT);
    for (i, frame) in frames.iter().enumerate() {
        let (x, y) = cell_origin(i, columns, cell_width, cell_height);
        imageops::replace(&mut sheet, *frame, i64::from(x), i64::from(y));
    }

    sheet
}

fn cell_origin(index: usize, columns: u32, cell_width: u32, cell_height: u32) -> (u32, u32) {
    let col = index as u32 % columns;
    let row = index as u32 / columns;
    (col * cell_width, row * cell_height)
}

/// Render every frame of an animation into a sheet, with per-frame placement.
pub fn render_image_sheet(gif: &GifImage, cols: Option<u32>) -> Result<(RgbaImage, Vec<SheetFrame>)> {
    let frames = gif.frames().collect::<Result<Vec<_>>>()?;
    let sheet = render_spritesheet(&frames, cols);
    let (columns, _) = grid_size(frames.len(), cols);

    let layout = gif
        .frame_durations()
        .iter()
        .enumerate()
        .map(|(index, duration)| {
            let (x, y) = cell_origin(index, columns, gif.width(), gif.height());
            SheetFrame {
                index,
                x,
                y,
                width: gif.width(),
                height: gif.height(),
                duration_ms: duration.as_millis() as u64,
            }
        })
        .collect();

    Ok((sheet, layout))
}
