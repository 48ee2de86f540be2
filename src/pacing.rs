// src/pacing.rs

use std::time::{Duration, Instant};

/// Keeps the "scanning" screen up for at least `minimum`, so a fast service does not
/// make the spinner flash. Purely cosmetic: the lifecycle state is not involved.
#[derive(Debug, Clone, Copy)]
pub struct MinimumDisplay {
    started: Instant,
    minimum: Duration,
}

impl MinimumDisplay {
    pub fn start(started: Instant, minimum: Duration) -> Self {
        Self { started, minimum }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.minimum.saturating_sub(now.saturating_duration_since(self.started))
    }

    pub fn is_satisfied(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}
