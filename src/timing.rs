//! Frame delay normalization and timeline lookup

use std::time::Duration;

/// How raw GIF delays (centiseconds) are turned into frame durations.
///
/// Many GIFs in the wild carry a delay of 0 or 1 centiseconds. Browsers do not
/// play these as fast as possible; they substitute a fallback delay. Delays
/// strictly below `min_delay` are replaced by `fallback_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    pub min_delay: Duration,
    pub fallback_delay: Duration,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(20),
            fallback_delay: Duration::from_millis(100),
        }
    }
}

impl DelayPolicy {
    /// A policy that keeps every delay as encoded.
    pub fn verbatim() -> Self {
        Self {
            min_delay: Duration::ZERO,
            fallback_delay: Duration::ZERO,
        }
    }

    /// Convert a raw delay in centiseconds to a frame duration.
    pub fn normalize(&self, raw_cs: u16) -> Duration {
        let raw = Duration::from_millis(u64::from(raw_cs) * 10);
        if raw < self.min_delay {
            self.fallback_delay
        } else {
            raw
        }
    }

    /// Normalize a whole delay sequence.
    pub fn normalize_all(&self, raw: &[u16]) -> Vec<Duration> {
        raw.iter().map(|&cs| self.normalize(cs)).collect()
    }
}

/// Sum of all frame durations, saturating at `Duration::MAX`.
pub fn total_duration(durations: &[Duration]) -> Duration {
    durations
        .iter()
        .fold(Duration::ZERO, |acc, d| acc.saturating_add(*d))
}

/// Index of the frame on screen at time `t` within a single pass.
///
/// Returns `None` when `t` is at or past the end of the pass, or when there
/// are no frames.
pub fn frame_index_at(durations: &[Duration], t: Duration) -> Option<usize> {
    let mut start = Duration::ZERO;
    for (i, d) in durations.iter().enumerate() {
        let end = start.saturating_add(*d);
        if t < end {
            return Some(i);
        }
        start = end;
    }
    None
}

/// Start time of every frame within a single pass.
pub fn frame_start_times(durations: &[Duration]) -> Vec<Duration> {
    let mut start = Duration::ZERO;
    durations
        .iter()
        .map(|d| {
            let this = start;
            start = start.saturating_add(*d);
            this
        })
        .collect()
}
