//! Animated GIF encoding

use crate::decoder::repeat_from_loop_count;
use crate::error::{GifError, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Round a duration to whole centiseconds, with a floor of one centisecond.
pub fn duration_to_centiseconds(duration: Duration) -> u16 {
    let cs = (duration.as_millis() + 5) / 10;
    cs.clamp(1, u128::from(u16::MAX)) as u16
}

/// Encode frames as an animated GIF.
///
/// # Arguments
///
/// * `frames` - Frame images, all the same size
/// * `durations` - Display duration per frame, same length as `frames`
/// * `loop_count` - Number of plays, 0 to loop forever
/// * `writer` - Destination for the encoded bytes
pub fn encode_gif<W: Write>(
    frames: &[RgbaImage],
    durations: &[Duration],
    loop_count: u32,
    writer: W,
) -> Result<()> {
    let Some(first) = frames.first() else {
        return Err(GifError::InvalidInput("no frames to encode".to_string()));
    };
    if frames.len() != durations.len() {
        return Err(GifError::InvalidInput(format!(
            "{} frames but {} durations",
            frames.len(),
            durations.len()
        )));
    }
    let dimensions = first.dimensions();
    if let Some(i) = frames.iter().position(|f| f.dimensions() != dimensions) {
        return Err(GifError::InvalidInput(format!(
            "frame {} is {}x{}, expected {}x{}",
            i,
            frames[i].width(),
            frames[i].height(),
            dimensions.0,
            dimensions.1
        )));
    }

    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(match repeat_from_loop_count(loop_count) {
        gif::Repeat::Infinite => Repeat::Infinite,
        gif::Repeat::Finite(n) => Repeat::Finite(n),
    })?;

    for (rgba_image, duration) in frames.iter().zip(durations) {
        let delay_cs = duration_to_centiseconds(*duration);
        let delay = Delay::from_numer_denom_ms(u32::from(delay_cs) * 10, 1);
        let frame = Frame::from_parts(rgba_image.clone(), 0, 0, delay);
        encoder.encode_frame(frame)?;
    }

    tracing::debug!(frames = frames.len(), loop_count, "encoded GIF");
    Ok(())
}

/// Encode frames as an animated GIF file, creating parent directories.
pub fn write_gif(
    frames: &[RgbaImage],
    durations: &[Duration],
    loop_count: u32,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_gif(frames, durations, loop_count, &mut writer)?;
    writer.flush()?;
    Ok(())
}
