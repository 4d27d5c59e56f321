//! Exponential reconnect backoff with jitter.
//!
//! Delays double on every attempt, starting at the configured minimum and
//! capped at the configured maximum; the returned delay is drawn uniformly
//! from `[min, computed]` so that a fleet of nodes losing the same upstream
//! connection does not redial in lockstep.

use rand::Rng;
use std::time::Duration;

/// Stateful backoff sequence for one reconnect loop.
#[derive(Debug)]
pub struct Backoff {
    min: Duration,
    max: Duration,
    attempt: u32,
}

impl Backoff {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max,
            attempt: 0,
        }
    }

    /// Returns the next jittered delay and advances the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let base = base_delay(self.min, self.max, self.attempt);
        self.attempt = self.attempt.saturating_add(1);

        let min_ms = self.min.as_millis() as u64;
        let base_ms = base.as_millis() as u64;
        if base_ms <= min_ms {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=base_ms))
    }
}

/// Jitter-free delay for the `attempt`-th retry (0-based):
/// `min * 2^attempt`, capped at `max`.
pub(crate) fn base_delay(min: Duration, max: Duration, attempt: u32) -> Duration {
    let factor = 2f64.powi(attempt.min(63) as i32);
    let ms = (min.as_millis() as f64 * factor).min(max.as_millis() as f64);
    Duration::from_millis(ms as u64)
}
