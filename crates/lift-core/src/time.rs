//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  One
//! tick is a tenth of a simulated second:
//!
//!   seconds = tick / TICKS_PER_SECOND
//!
//! Using an integer tick as the canonical time unit means all travel and
//! dwell arithmetic is exact (no floating-point drift) and two events at the
//! "same" instant really compare equal, which the scheduler's FIFO tie-break
//! depends on.  Durations are plain `u64` tick counts.

use std::fmt;

/// Number of ticks in one simulated second.
pub const TICKS_PER_SECOND: u64 = 10;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp, in tenths of a simulated second.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Tick corresponding to `secs` whole simulated seconds.
    #[inline]
    pub fn from_secs(secs: u64) -> Tick {
        Tick(secs * TICKS_PER_SECOND)
    }

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Simulated seconds represented by this tick.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

/// Formats as `h:mm:ss.d` of simulated time, e.g. `Tick(5235)` → `0:08:43.5`.
impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.0 % TICKS_PER_SECOND;
        let secs = self.0 / TICKS_PER_SECOND;
        let (h, m, s) = (secs / 3_600, (secs % 3_600) / 60, secs % 60);
        write!(f, "{h}:{m:02}:{s:02}.{tenths}")
    }
}
