// Retry backoff schedule

use backoff::ExponentialBackoff;
use std::time::Duration;

/// Fallback delay if the schedule ever runs dry.
pub const MAX_BACKOFF: Duration = Duration::from_secs(512);

/// Exponential backoff for the generation retry loop.
///
/// The schedule is unjittered and doubles from a 2-second base, so the
/// delay after attempt `k` is exactly `2^k` seconds (2s, 4s, 8s, ...).
/// No elapsed-time cap: the attempt counter alone bounds the loop.
pub fn retry_schedule() -> ExponentialBackoff {
    ExponentialBackoff {
        current_interval: Duration::from_secs(2),
        initial_interval: Duration::from_secs(2),
        randomization_factor: 0.0,
        multiplier: 2.0,
        max_interval: MAX_BACKOFF,
        max_elapsed_time: None,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backoff::backoff::Backoff;

    #[test]
    fn test_schedule_is_exact_powers_of_two() {
        let mut schedule = retry_schedule();
        assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(2)));
        assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(4)));
        assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(8)));
        assert_eq!(schedule.next_backoff(), Some(Duration::from_secs(16)));
    }

    #[test]
    fn test_schedule_caps_at_max_interval() {
        let mut schedule = retry_schedule();
        let mut last = Duration::ZERO;
        for _ in 0..16 {
            let next = schedule.next_backoff().unwrap();
            // Monotonically non-decreasing across attempts
            assert!(next >= last);
            assert!(next <= MAX_BACKOFF);
            last = next;
        }
        assert_eq!(last, MAX_BACKOFF);
    }
}
