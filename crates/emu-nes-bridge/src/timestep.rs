//! Fixed-timestep accumulator.
//!
//! Wall-clock time goes in at whatever cadence the host ticks; whole
//! frames come out. Remainders carry over, so the number of frames stepped
//! over any run of ticks depends only on their total length.

use emu_core::Millis;

use crate::config::FrameTime;

/// Unconsumed wall-clock time since the last whole frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestep {
    frame_time: FrameTime,
    accumulated: i64,
    last_timer: Millis,
}

impl Timestep {
    /// Start empty, measuring from `now`.
    #[must_use]
    pub fn new(frame_time: FrameTime, now: Millis) -> Self {
        Self {
            frame_time,
            accumulated: 0,
            last_timer: now,
        }
    }

    /// Add the time since the previous reading. Returns the interval added.
    ///
    /// A timer that steps backwards contributes nothing; the new reading is
    /// still taken as the reference for the next tick.
    fn advance(&mut self, now: Millis) -> i64 {
        let elapsed = (now - self.last_timer).get();
        self.last_timer = now;
        if elapsed < 0 {
            log::warn!("host timer went backwards by {}ms", -elapsed);
            return 0;
        }
        self.accumulated = self.accumulated.saturating_add(elapsed);
        elapsed
    }

    fn take_frame(&mut self) -> bool {
        let frame = self.frame_time.as_millis();
        if self.accumulated >= frame {
            self.accumulated -= frame;
            true
        } else {
            false
        }
    }

    /// Advance to `now` and drain every whole frame. Returns the count.
    pub fn frames_due(&mut self, now: Millis) -> u32 {
        self.advance(now);
        let mut frames = 0;
        while self.take_frame() {
            frames += 1;
        }
        frames
    }

    #[must_use]
    pub fn accumulated(&self) -> i64 {
        self.accumulated
    }

}
