use std::fmt::Display;

use chrono::{DateTime, Utc};

/// The remaining request quota and its reset time, as reported by the last
/// profile response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitSnapshot {
    /// The number of requests left in the current window.
    pub(crate) remaining: u32,

    /// The time at which the quota resets.
    pub(crate) resets_at: DateTime<Utc>,
}

impl RateLimitSnapshot {
    /// Creates a new `RateLimitSnapshot` instance.
    pub fn new(remaining: u32, resets_at: DateTime<Utc>) -> Self {
        Self {
            remaining,
            resets_at,
        }
    }

    /// True when the quota is spent and the reset time is still ahead of `now`.
    pub fn is_exhausted(&self, now: DateTime<Utc>) -> bool {
        self.remaining == 0 && now < self.resets_at
    }

    /// Retrieves the number of requests left in the current window.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Retrieves the time at which the quota resets.
    pub fn resets_at(&self) -> DateTime<Utc> {
        self.resets_at
    }

    /// Creates a dummy `RateLimitSnapshot` instance for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy() -> Self {
        Self {
            remaining: 59,
            resets_at: DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }
}

impl Default for RateLimitSnapshot {
    /// The snapshot recorded when a response carries no usable rate headers:
    /// a spent quota whose reset time is already in the past, which never
    /// blocks a later search.
    fn default() -> Self {
        Self {
            remaining: 0,
            resets_at: DateTime::UNIX_EPOCH,
        }
    }
}

impl Display for RateLimitSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RateLimit: remaining={}, reset={}",
            self.remaining, self.resets_at
        )
    }
}

/// Tracks the latest quota snapshot and gates new searches when it is spent.
///
/// Overwritten only after a successful profile fetch; read before every new
/// search. Not persisted across sessions.
#[derive(Debug, Default)]
pub struct RateGate {
    snapshot: RateLimitSnapshot,
}

impl RateGate {
    /// False only when the remaining quota is zero and the reset time has not
    /// passed yet.
    pub fn check_available(&self, now: DateTime<Utc>) -> bool {
        !self.snapshot.is_exhausted(now)
    }

    /// Overwrites the gate unconditionally from the latest response.
    pub fn record(&mut self, snapshot: RateLimitSnapshot) {
        self.snapshot = snapshot;
    }

    /// Retrieves the latest recorded snapshot.
    pub fn snapshot(&self) -> &RateLimitSnapshot {
        &self.snapshot
    }
}
