use std::time::Duration;

/// Retry policy applied to transient activity failures.
///
/// Delays grow geometrically from `initial_interval` by
/// `backoff_multiplier` per attempt, optionally capped at
/// `max_interval`. Validation failures bypass the policy entirely.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. `1` disables retries.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_interval: Duration,
    /// Growth factor per retry; values below 1.0 are treated as 1.0.
    pub backoff_multiplier: f64,
    /// Upper bound for any single backoff delay.
    pub max_interval: Option<Duration>,
}

impl RetryPolicy {
    /// Backoff before the retry following the given 1-based attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        // the exponent is clamped so a misconfigured attempt count
        // cannot overflow the duration arithmetic
        let exponent = attempt.saturating_sub(1).min(30);
        let factor = self.backoff_multiplier.max(1.0).powi(exponent as i32);
        let delay = self.initial_interval.mul_f64(factor);
        match self.max_interval {
            Some(cap) if delay > cap => cap,
            _ => delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_secs(60),
            backoff_multiplier: 2.0,
            max_interval: Some(Duration::from_secs(600)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 5,
            initial_interval: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            max_interval: Some(Duration::from_secs(25)),
        };
        assert_eq!(policy.delay(1), Duration::from_secs(10));
        assert_eq!(policy.delay(2), Duration::from_secs(20));
        assert_eq!(policy.delay(3), Duration::from_secs(25));
        assert_eq!(policy.delay(4), Duration::from_secs(25));
    }

    #[test]
    fn sub_unit_multiplier_stays_fixed() {
        let policy = RetryPolicy {
            max_attempts: 3,
            initial_interval: Duration::from_secs(5),
            backoff_multiplier: 0.5,
            max_interval: None,
        };
        assert_eq!(policy.delay(1), Duration::from_secs(5));
        assert_eq!(policy.delay(2), Duration::from_secs(5));
    }
}
