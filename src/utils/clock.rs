//! Time abstraction for the resilience layer.
//!
//! The cache TTL, rate-limit gate and retry backoff all read time through
//! the [`Clock`] trait so tests can advance time instantly instead of
//! sleeping on the wall clock.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Source of monotonic time and sleeps.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current monotonic instant.
    fn now(&self) -> Instant;

    /// Suspend the calling task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Deterministic clock for tests. Sleeping advances simulated time
/// immediately and records the requested duration.
pub struct ManualClock {
    now: Mutex<Instant>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Move simulated time forward without recording a sleep.
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock();
        *now += duration;
    }

    /// Durations passed to `sleep`, in call order.
    pub fn recorded_sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
        let mut now = self.now.lock();
        *now += duration;
    }
}
