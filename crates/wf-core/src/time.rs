//! Session time model.
//!
//! # Design
//!
//! Time is a monotonically increasing millisecond [`Timestamp`] counted from
//! the start of a guidance session.  [`SessionClock`] tracks the latest time a
//! session has seen.
//!
//! Sensor samples carry their own timestamps, so a session never reads the
//! system clock.  Tests drive time explicitly ("after 5 simulated seconds")
//! and replays of recorded traces are exact.

use std::fmt;

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// Milliseconds since the start of a session.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    #[inline]
    pub fn from_secs(secs: u64) -> Timestamp {
        Timestamp(secs * 1_000)
    }

    /// Return the timestamp `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed from `earlier` to `self` (0 if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: u64) -> Timestamp {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}s", self.0 / 1_000, self.0 % 1_000)
    }
}

// ── SessionClock ──────────────────────────────────────────────────────────────

/// Tracks the latest time a session has observed.
///
/// The clock never runs backwards: a late-arriving sample stamped before the
/// current time is processed "now".
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionClock {
    /// Latest observed timestamp.
    pub now: Timestamp,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward to `at` and return the effective current time.
    #[inline]
    pub fn advance_to(&mut self, at: Timestamp) -> Timestamp {
        if at > self.now {
            self.now = at;
        }
        self.now
    }

    /// Break elapsed time into (minutes, seconds) for log lines.
    pub fn elapsed_min_sec(&self) -> (u64, u64) {
        let secs = self.now.0 / 1_000;
        (secs / 60, secs % 60)
    }
}

impl fmt::Display for SessionClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_min_sec();
        write!(f, "{} ({:02}:{:02})", self.now, m, s)
    }
}
