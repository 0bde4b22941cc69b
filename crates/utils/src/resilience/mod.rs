//! Retry policies for fallible operations.
//!
//! [`retry`] re-runs an async operation with exponential backoff and jitter,
//! [`retry_step`] wraps a fallible async pipeline step with the same policy
//! and [`retry_sync`] does the same for blocking closures. In every case the
//! last error is returned unchanged once the attempts are used up.

pub mod config;
pub mod retry;

pub use config::RetryConfig;
pub use retry::{retry, retry_if, retry_step, retry_sync};
