//! Host wall-clock time.

/// A wall-clock reading or interval in milliseconds.
///
/// Host timers are plain millisecond counters with an arbitrary epoch, so
/// only differences between readings carry meaning. Signed so that a timer
/// stepping backwards shows up as a negative interval instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Millis(pub i64);

impl Millis {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl core::ops::Add for Millis {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl core::ops::AddAssign for Millis {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl core::ops::Sub for Millis {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}
