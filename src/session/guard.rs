//! Inactivity tracking for an unlocked session.
//!
//! The guard is cooperative: nothing fires in the background.  The
//! session asks `is_expired` when the next request arrives and locks
//! itself if the answer is yes.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct SessionGuard {
    ttl: Duration,
    last_activity: Instant,
}

impl SessionGuard {
    /// Start tracking activity from `now`.
    pub fn new(ttl: Duration, now: Instant) -> Self {
        Self {
            ttl,
            last_activity: now,
        }
    }

    /// Record activity at `now`.
    pub fn touch(&mut self, now: Instant) {
        self.last_activity = now;
    }

    /// Returns `true` once more than `ttl` has passed since the last activity.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.idle_for(now) > self.ttl
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
