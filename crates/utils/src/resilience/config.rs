//! Backoff configuration for retries.

use amalfi_core::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_JITTER,
    DEFAULT_RETRY_MAX_DELAY_MS,
};
use std::time::Duration;

/// Configuration for retry behavior
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: usize,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Jitter factor for randomization (0.0 to 1.0)
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            jitter_factor: DEFAULT_RETRY_JITTER,
        }
    }
}

impl RetryConfig {
    /// No retries at all: the operation runs exactly once.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Fixed delay between attempts, without growth or jitter.
    pub fn fixed(max_retries: usize, delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay: delay,
            max_delay: delay,
            jitter_factor: 0.0,
        }
    }

    /// Total number of attempts, the first one included.
    pub fn max_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `attempt + 1`: exponential backoff capped
    /// at `max_delay`, then spread by `jitter_factor` in both directions.
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        let factor = 2u32.saturating_pow(u32::try_from(attempt).unwrap_or(u32::MAX));
        let exponential_delay = self.base_delay.saturating_mul(factor);
        let capped_delay = exponential_delay.min(self.max_delay);

        if self.jitter_factor > 0.0 {
            let millis = capped_delay.as_millis() as f64;
            let jitter = (fastrand::f64() * 2.0 - 1.0) * millis * self.jitter_factor;
            Duration::from_millis((millis + jitter).max(0.0) as u64)
        } else {
            capped_delay
        }
    }
}
