//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  There is no wall-clock
//! mapping anywhere in the workspace: a tick means whatever the hosting game
//! says it means, and the scheduler only ever compares and adds ticks.  Using
//! an integer as the canonical time unit means all turn arithmetic is exact
//! (no floating-point drift) and comparisons are O(1).
//!
//! `TimeInterval` is the companion duration type.  Action costs are reported
//! to the scheduler as intervals; the scheduler requires them to be strictly
//! positive so that per-actor time can only move forward.  Validity is
//! enforced at the `advance` call site in `tw-queue` rather than in the
//! constructor, so a zero interval is representable (and useful as a fold
//! identity) but never schedulable.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: even at one million turns per second of
/// real play, a u64 lasts far longer than any conceivable campaign.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

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
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Add<TimeInterval> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: TimeInterval) -> Tick {
        Tick(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeInterval ─────────────────────────────────────────────────────────────

/// A discrete duration in ticks — the cost of one completed action.
///
/// The scheduler rejects zero intervals on `advance` (an actor must always
/// make forward progress), so a `TimeInterval` passed across the scheduling
/// boundary is effectively strictly positive.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeInterval(pub u64);

impl TimeInterval {
    /// The additive identity.  Not schedulable: `advance` rejects it.
    pub const ZERO: TimeInterval = TimeInterval(0);

    /// A single tick — the smallest schedulable cost.
    pub const TICK: TimeInterval = TimeInterval(1);

    #[inline]
    pub const fn new(ticks: u64) -> TimeInterval {
        TimeInterval(ticks)
    }

    /// `true` if this interval would be rejected by the scheduler.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::Add for TimeInterval {
    type Output = TimeInterval;
    #[inline]
    fn add(self, rhs: TimeInterval) -> TimeInterval {
        TimeInterval(self.0 + rhs.0)
    }
}

impl std::ops::Mul<u64> for TimeInterval {
    type Output = TimeInterval;
    #[inline]
    fn mul(self, rhs: u64) -> TimeInterval {
        TimeInterval(self.0 * rhs)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}t", self.0)
    }
}
