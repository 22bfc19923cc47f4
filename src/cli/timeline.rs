//! Timeline command implementation
//!
//! Drives a [`Player`] with a fixed display tick and prints the frame shown
//! after every change, which makes delay normalization and loop handling
//! visible without a window.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use crate::config::AgifConfig;
use crate::player::Player;

use super::{open_animation, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the timeline command
pub fn run_timeline(input: &Path, fps: u32, seconds: Option<f64>, config: &AgifConfig) -> ExitCode {
    let gif = match open_animation(input, config) {
        Ok(gif) => gif,
        Err(code) => return code,
    };

    let tick = Duration::from_secs(1) / fps.max(1);
    let span = match seconds {
        Some(s) => match Duration::try_from_secs_f64(s) {
            Ok(span) => span,
            Err(_) => {
                eprintln!("Error: --seconds must be a non-negative number of seconds, got {}", s);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        None => default_span(gif.total_duration(), gif.frame_count(), gif.loop_count(), tick),
    };

    let mut player = Player::for_image(&gif);
    let mut now = Duration::ZERO;

    println!("{:>9}  frame", "time");
    println!("{:>7}ms  {}", 0, player.current_index());
    while now < span {
        now += tick;
        let step = player.advance(tick);
        if step.changed {
            println!("{:>7}ms  {}", now.as_millis(), step.index);
        }
        if step.finished {
            println!("{:>7}ms  finished after {} loop(s)", now.as_millis(), player.completed_loops());
            break;
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// One pass of an endless animation, every pass of a finite one.
///
/// Zero-length frames advance once per tick, so a pass then lasts one tick per frame.
fn default_span(total: Duration, frame_count: usize, loop_count: u32, tick: Duration) -> Duration {
    let pass = if total.is_zero() {
        tick.saturating_mul(u32::try_from(frame_count).unwrap_or(u32::MAX))
    } else {
        total
    };
    pass.saturating_mul(loop_count.max(1))
}
