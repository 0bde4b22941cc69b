//! Decorators and runtime helpers for amalfi
//!
//! ## Key Components
//!
//! - **`resilience`**: [`retry`] and friends, re-running fallible operations
//!   with exponential backoff and jitter.
//! - **`memo`**: [`Memo`], an explicit LRU cache, and the [`memoize`]
//!   decorator that consults it.
//! - **`config`**: [`Settings`] loaded from defaults, JSON or `AMALFI_*`
//!   environment variables.
//! - **`tracing`**: subscriber initialization.
//! - **`async_runtime`**: running async pipelines from synchronous code.

pub mod async_runtime;
pub mod config;
pub mod memo;
pub mod resilience;
pub mod tracing;

pub use async_runtime::{block_on_pipeline, is_in_async_context, run_blocking, BlockingRuntime};
pub use config::{RetrySettings, Settings};
pub use memo::{amemoize, memoize, Memo, MemoStats};
pub use resilience::{retry, retry_if, retry_step, retry_sync, RetryConfig};
