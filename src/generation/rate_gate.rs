// Minimum-interval gate for outbound calls

use crate::utils::clock::Clock;
use parking_lot::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Enforces a minimum delay between successive outbound calls.
///
/// All callers share one "time of last call" timestamp. A caller waits
/// until `now >= last_call + min_interval`, then stamps the gate.
/// Last-writer-wins: two tasks racing through the gate may both compute a
/// short wait, which costs at most one extra delay and never corrupts the
/// timestamp. The wait blocks only the calling task.
pub struct RateGate {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wait until the gate permits another call, then record this one.
    pub async fn admit(&self, clock: &dyn Clock) {
        let wait = {
            let last_call = self.last_call.lock();
            match *last_call {
                Some(last) => (last + self.min_interval).saturating_duration_since(clock.now()),
                None => Duration::ZERO,
            }
        };

        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "rate gate waiting");
            clock.sleep(wait).await;
        }

        *self.last_call.lock() = Some(clock.now());
    }
}
