//! Playback state for an animation
//!
//! A [`Player`] turns elapsed time into the index of the frame to show. It
//! does no rendering and owns no timer: the caller feeds it time deltas from
//! whatever clock drives its display.

use crate::animated::GifImage;
use crate::timing::total_duration;
use std::time::Duration;

/// Outcome of [`Player::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    /// Frame to display now
    pub index: usize,
    /// Whether `index` differs from the frame shown before the call
    pub changed: bool,
    /// Whether playback has stopped
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Player {
    durations: Vec<Duration>,
    total: Duration,
    loop_count: u32,
    index: usize,
    elapsed: Duration,
    completed_loops: u32,
    finished: bool,
}

impl Player {
    /// Create a player for a duration sequence. `loop_count` of 0 plays forever.
    pub fn new(durations: Vec<Duration>, loop_count: u32) -> Self {
        let total = total_duration(&durations);
        Self {
            finished: durations.is_empty(),
            durations,
            total,
            loop_count,
            index: 0,
            elapsed: Duration::ZERO,
            completed_loops: 0,
        }
    }

    pub fn for_image(image: &GifImage) -> Self {
        Self::new(image.frame_durations().to_vec(), image.loop_count())
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Full passes played so far
    pub fn completed_loops(&self) -> u32 {
        self.completed_loops
    }

    /// Time left on the current frame, `None` once finished.
    pub fn time_to_next_frame(&self) -> Option<Duration> {
        if self.finished {
            return None;
        }
        Some(self.durations[self.index].saturating_sub(self.elapsed))
    }

    /// Rewind to the first frame and clear the loop counter.
    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
        self.completed_loops = 0;
        self.finished = self.durations.is_empty();
    }

    /// Advance playback by `dt`.
    pub fn advance(&mut self, dt: Duration) -> FrameStep {
        let before = self.index;

        if !self.finished {
            if self.total.is_zero() {
                // Zero-length frames: one step per tick
                self.step();
            } else {
                self.elapsed = self.elapsed.saturating_add(dt);
                if self.loop_count == 0 && self.elapsed >= self.total {
                    // Whole passes only move the loop counter of an endless animation
                    let total = self.total.as_nanos();
                    let passes = self.elapsed.as_nanos() / total;
                    let folded = self.elapsed.as_nanos() % total;
                    self.completed_loops = self
                        .completed_loops
                        .saturating_add(u32::try_from(passes).unwrap_or(u32::MAX));
                    self.elapsed = Duration::from_nanos(folded as u64);
                }
                while !self.finished && self.elapsed >= self.durations[self.index] {
                    self.elapsed -= self.durations[self.index];
                    self.step();
                }
            }
        }

        FrameStep {
            index: self.index,
            changed: self.index != before,
            finished: self.finished,
        }
    }

    /// Move to the next frame, wrapping or stopping at the end of a pass.
    fn step(&mut self) {
        if self.index + 1 < self.durations.len() {
            self.index += 1;
            return;
        }

        self.completed_loops = self.completed_loops.saturating_add(1);
        if self.loop_count != 0 && self.completed_loops >= self.loop_count {
            self.finished = true;
            self.elapsed = Duration::ZERO;
            tracing::trace!(loops = self.completed_loops, "playback finished");
        } else {
            self.index = 0;
        }
    }
}
