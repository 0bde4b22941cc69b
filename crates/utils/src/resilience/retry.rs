//! Retry loops for async operations, pipeline steps and blocking closures.

use super::config::RetryConfig;
use amalfi_core::AsyncStep;
use futures::future::{BoxFuture, FutureExt};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Execute an operation, retrying every failure up to `config.max_retries`
/// times. The last error is returned unchanged.
pub async fn retry<F, Fut, T, E>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry_if(config, operation, |_: &E| true).await
}

/// Like [`retry`], but only errors accepted by `should_retry` are retried;
/// any other error is returned immediately.
pub async fn retry_if<F, Fut, T, E, P>(
    config: &RetryConfig,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(retries = attempt, "operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(error) if attempt < config.max_retries && should_retry(&error) => {
                let delay = config.calculate_delay(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "operation failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Wrap a fallible async step so that each invocation is retried with
/// `config`. Every attempt receives a clone of the step input.
pub fn retry_step<I, T, E, S>(
    config: RetryConfig,
    step: S,
) -> impl Fn(I) -> BoxFuture<'static, Result<T, E>>
where
    I: Clone + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
    S: AsyncStep<I, Output = Result<T, E>>,
{
    let step = Arc::new(step);
    let config = Arc::new(config);
    move |input: I| {
        let step = Arc::clone(&step);
        let config = Arc::clone(&config);
        async move { retry(&config, move || step.invoke(input.clone())).await }.boxed()
    }
}

/// Blocking [`retry`]: waits between attempts with `std::thread::sleep`.
///
/// Do not call this from inside an async runtime.
pub fn retry_sync<F, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    let mut attempt = 0;
    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(error) if attempt < config.max_retries => {
                let delay = config.calculate_delay(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "operation failed, retrying"
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::apipe;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn quick(max_retries: usize) -> RetryConfig {
        RetryConfig::fixed(max_retries, Duration::from_millis(10))
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failures() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result = retry(&quick(3), move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(format!("attempt {n} failed"))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_with_last_error() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), String> = retry(&quick(2), move || async move {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Err(format!("failure {n}"))
        })
        .await;

        // max_retries + 1 attempts in total
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result, Err("failure 2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_waits_between_attempts() {
        let started = tokio::time::Instant::now();
        let config = RetryConfig {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            jitter_factor: 0.0,
        };
        let _: Result<(), &str> = retry(&config, || async { Err("nope") }).await;

        // 100 + 200 + 400
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(700));
        assert!(elapsed < Duration::from_millis(710));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_returns_immediately() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), String> = retry_if(
            &quick(5),
            move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err("fatal".to_string())
            },
            |e: &String| e != "fatal",
        )
        .await;

        assert_eq!(result, Err("fatal".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_step_in_pipeline() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let flaky = move |x: i32| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(format!("cold start for {x}"))
                } else {
                    Ok(x * 10)
                }
            }
        };

        let pipeline = apipe(4).step(retry_step(quick(1), flaky));
        assert_eq!(pipeline.run().await, Ok(40));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_retry_sync() {
        let mut calls = 0;
        let result = retry_sync(&RetryConfig::fixed(3, Duration::ZERO), || {
            calls += 1;
            if calls < 3 {
                Err("not yet")
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result, Ok(3));

        let mut attempts = 0;
        let failed: Result<(), &str> = retry_sync(&RetryConfig::none(), || {
            attempts += 1;
            Err("always")
        });
        assert_eq!(failed, Err("always"));
        assert_eq!(attempts, 1);
    }
}
