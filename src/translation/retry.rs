/*!
 * Retry policy for translation requests.
 */

use std::time::Duration;

/// Bounded retry schedule: total attempts plus the delay slept between them
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    max_attempts: u32,

    /// Delay before the second attempt
    delay: Duration,

    /// Factor applied to the delay for every further attempt
    backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Fixed-delay policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff_multiplier: 1.0,
        }
    }

    /// Grow the delay by `multiplier` after each failed attempt
    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = if multiplier.is_finite() && multiplier >= 1.0 {
            multiplier
        } else {
            1.0
        };
        self
    }

    /// Total attempts
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to sleep after failed attempt number `attempt` (1-based), or
    /// `None` when that was the last attempt
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        if self.delay.is_zero() {
            return Some(Duration::ZERO);
        }
        let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        let seconds = self.delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        // Saturate instead of overflowing on large backoff schedules
        Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(2))
    }
}
