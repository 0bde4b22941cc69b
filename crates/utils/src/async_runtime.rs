use amalfi_core::{AsyncPipeline, Error, Result};
use std::future::Future;
use tokio::runtime::{Builder, Runtime};

/// Lazily created current-thread runtime for driving async pipelines from
/// synchronous code
pub struct BlockingRuntime {
    runtime: Option<Runtime>,
}

impl BlockingRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self { runtime: None }
    }

    fn get_or_create_runtime(&mut self) -> Result<&Runtime> {
        if self.runtime.is_none() {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| Error::runtime(format!("failed to create tokio runtime: {e}")))?;
            self.runtime = Some(runtime);
        }

        self.runtime
            .as_ref()
            .ok_or_else(|| Error::runtime("runtime unexpectedly missing after initialization"))
    }

    /// Drive `future` to completion on this runtime.
    ///
    /// Fails instead of panicking when called from inside another runtime.
    pub fn block_on<F: Future>(&mut self, future: F) -> Result<F::Output> {
        if is_in_async_context() {
            return Err(Error::runtime(
                "cannot use block_on from within an async runtime",
            ));
        }
        let runtime = self.get_or_create_runtime()?;
        Ok(runtime.block_on(future))
    }
}

impl Default for BlockingRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if we're already in an async context
#[must_use]
pub fn is_in_async_context() -> bool {
    tokio::runtime::Handle::try_current().is_ok()
}

/// Run `future` to completion on a fresh runtime
pub fn run_blocking<F: Future>(future: F) -> Result<F::Output> {
    BlockingRuntime::new().block_on(future)
}

/// Run an async pipeline on its bound input from synchronous code
pub fn block_on_pipeline<I, O>(pipeline: &AsyncPipeline<I, O>) -> Result<O>
where
    I: Clone + 'static,
    O: Send + 'static,
{
    run_blocking(pipeline.run())
}
