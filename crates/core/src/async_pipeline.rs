//! Async pipelines: an input value bound to a chain of suspending steps.
//!
//! Steps are [`AsyncStep`]s. A closure returning a future is one already;
//! a plain function goes through [`as_async`](crate::as_async) or
//! [`AsyncPipeline::step_sync`]. Steps run strictly one after the other since
//! each consumes the output of the previous one.
//!
//! Dropping the future returned by [`AsyncPipeline::run`] cancels the run at
//! its current suspension point. Steps that already completed are not undone.

use crate::chain::AsyncChain;
use crate::pipeline::Pipeline;
use crate::step::{as_async, AsyncStep};
use futures::future::BoxFuture;
use std::fmt;
use std::ops::{Add, BitOr};
use tracing::{debug_span, Instrument};

/// A chain of async steps bound to an input value.
pub struct AsyncPipeline<I, O> {
    input: I,
    chain: AsyncChain<I, O>,
}

impl<I: Send + 'static> AsyncPipeline<I, I> {
    /// Create an async pipeline bound to `input` with no steps.
    pub fn pipe(input: I) -> Self {
        Self {
            input,
            chain: AsyncChain::new(),
        }
    }
}

impl<I: 'static, O: Send + 'static> AsyncPipeline<I, O> {
    /// Bind an existing chain to an input.
    pub fn from_chain(input: I, chain: AsyncChain<I, O>) -> Self {
        Self { input, chain }
    }

    /// Convert a synchronous pipeline, keeping its bound input.
    pub fn from_sync(pipeline: Pipeline<I, O>) -> Self {
        let (input, chain) = pipeline.into_parts();
        Self {
            input,
            chain: chain.to_async(),
        }
    }

    /// Append a step that may suspend. The step is not executed.
    pub fn step<S>(self, step: S) -> AsyncPipeline<I, S::Output>
    where
        S: AsyncStep<O>,
    {
        AsyncPipeline {
            chain: self.chain.then(step),
            input: self.input,
        }
    }

    /// Alias for [`AsyncPipeline::step`].
    pub fn then<S>(self, step: S) -> AsyncPipeline<I, S::Output>
    where
        S: AsyncStep<O>,
    {
        self.step(step)
    }

    /// Append a plain function, adapted with [`as_async`].
    pub fn step_sync<U, F>(self, step: F) -> AsyncPipeline<I, U>
    where
        F: Fn(O) -> U + Send + Sync + 'static,
        U: Send + 'static,
    {
        self.step(as_async(step))
    }

    /// Execute every step on a clone of the bound input.
    pub fn run(&self) -> impl std::future::Future<Output = O> + Send + 'static
    where
        I: Clone,
    {
        let span = debug_span!("async_pipeline.run", steps = self.chain.len());
        self.chain.call(self.input.clone()).instrument(span)
    }

    /// Execute the pipeline, consuming it.
    pub fn run_once(self) -> impl std::future::Future<Output = O> + Send + 'static {
        let span = debug_span!("async_pipeline.run", steps = self.chain.len());
        self.chain.call(self.input).instrument(span)
    }

    /// Execute the steps on `input` instead of the bound value.
    pub fn apply(&self, input: I) -> BoxFuture<'static, O> {
        self.chain.call(input)
    }

    /// A pipeline with the same steps bound to `input`.
    pub fn with_input(&self, input: I) -> Self {
        Self {
            input,
            chain: self.chain.clone(),
        }
    }

    /// Feed the output of this pipeline into the steps of `other`.
    ///
    /// The input bound to `other` is ignored.
    pub fn concat<U: Send + 'static>(self, other: AsyncPipeline<O, U>) -> AsyncPipeline<I, U> {
        AsyncPipeline {
            chain: self.chain.concat(&other.chain),
            input: self.input,
        }
    }

    /// The bound input value.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The composed steps, without the input.
    pub fn chain(&self) -> &AsyncChain<I, O> {
        &self.chain
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl<I: 'static, T: Send + 'static, E: Send + 'static> AsyncPipeline<I, Result<T, E>> {
    /// Append a fallible step that only runs while every earlier step
    /// succeeded. The first error is returned unchanged.
    pub fn try_step<U, S>(self, step: S) -> AsyncPipeline<I, Result<U, E>>
    where
        S: AsyncStep<T, Output = Result<U, E>>,
        U: Send + 'static,
    {
        let step = std::sync::Arc::new(step);
        self.step(move |previous: Result<T, E>| {
            let step = std::sync::Arc::clone(&step);
            async move {
                match previous {
                    Ok(value) => step.invoke(value).await,
                    Err(error) => Err(error),
                }
            }
        })
    }
}

impl<I: Clone, O> Clone for AsyncPipeline<I, O> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            chain: self.chain.clone(),
        }
    }
}

impl<I: fmt::Debug, O> fmt::Debug for AsyncPipeline<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPipeline")
            .field("input", &self.input)
            .field("steps", &self.chain.len())
            .finish()
    }
}

impl<I, O, S> BitOr<S> for AsyncPipeline<I, O>
where
    I: 'static,
    O: Send + 'static,
    S: AsyncStep<O>,
{
    type Output = AsyncPipeline<I, S::Output>;

    fn bitor(self, step: S) -> Self::Output {
        self.step(step)
    }
}

impl<I, O, U> Add<AsyncPipeline<O, U>> for AsyncPipeline<I, O>
where
    I: 'static,
    O: Send + 'static,
    U: Send + 'static,
{
    type Output = AsyncPipeline<I, U>;

    fn add(self, other: AsyncPipeline<O, U>) -> Self::Output {
        self.concat(other)
    }
}

/// Create an async pipeline bound to `input`.
pub fn apipe<I: Send + 'static>(input: I) -> AsyncPipeline<I, I> {
    AsyncPipeline::pipe(input)
}
