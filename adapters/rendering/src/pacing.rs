//! Capped-rate frame pacing.

use std::time::{Duration, Instant};

/// Computes how long a backend should wait so frames do not exceed a target rate.
///
/// Mirrors a classic game clock: each frame is allowed `1s / fps` measured from
/// the previous frame boundary. Frames that ran long are not paid back later.
#[derive(Clone, Copy, Debug, Default)]
pub struct FramePacer {
    last_boundary: Option<Instant>,
}

impl FramePacer {
    /// Creates a pacer that lets the first frame through without waiting.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_boundary: None,
        }
    }

    /// Returns the delay needed before the next frame may start and records
    /// the resulting frame boundary.
    ///
    /// A `target_fps` of zero disables the cap.
    pub fn delay(&mut self, now: Instant, target_fps: u32) -> Duration {
        let Some(last_boundary) = self.last_boundary else {
            self.last_boundary = Some(now);
            return Duration::ZERO;
        };

        let delay = if target_fps == 0 {
            Duration::ZERO
        } else {
            let budget = Duration::from_secs(1) / target_fps;
            budget.saturating_sub(now.saturating_duration_since(last_boundary))
        };
        self.last_boundary = Some(now + delay);
        delay
    }
}
