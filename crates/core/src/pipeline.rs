//! Synchronous pipelines: an input value bound to a chain of steps.
//!
//! ```rust
//! use amalfi_core::pipe;
//!
//! let pipeline = pipe(3) | (|x: i32| x + 1) | (|x: i32| x * 2);
//! assert_eq!(pipeline.run(), 8);
//! ```
//!
//! Building a pipeline never runs a step. `run` evaluates every step from the
//! bound input on each call, so side effects inside steps repeat per run.

use crate::async_pipeline::AsyncPipeline;
use crate::chain::Chain;
use std::fmt;
use std::ops::{Add, BitOr};
use tracing::debug_span;

/// A chain of synchronous steps bound to an input value.
pub struct Pipeline<I, O> {
    input: I,
    chain: Chain<I, O>,
}

impl<I: 'static> Pipeline<I, I> {
    /// Create a pipeline bound to `input` with no steps.
    pub fn pipe(input: I) -> Self {
        Self {
            input,
            chain: Chain::new(),
        }
    }

    /// Create an async pipeline bound to `input` with no steps.
    pub fn apipe(input: I) -> AsyncPipeline<I, I>
    where
        I: Send,
    {
        AsyncPipeline::pipe(input)
    }
}

impl<I: 'static, O: 'static> Pipeline<I, O> {
    /// Bind an existing chain to an input.
    pub fn from_chain(input: I, chain: Chain<I, O>) -> Self {
        Self { input, chain }
    }

    /// Append a step. The step is not executed.
    pub fn step<U, F>(self, step: F) -> Pipeline<I, U>
    where
        F: Fn(O) -> U + Send + Sync + 'static,
    {
        Pipeline {
            chain: self.chain.then(step),
            input: self.input,
        }
    }

    /// Alias for [`Pipeline::step`].
    pub fn then<U, F>(self, step: F) -> Pipeline<I, U>
    where
        F: Fn(O) -> U + Send + Sync + 'static,
    {
        self.step(step)
    }

    /// Execute every step on the bound input.
    ///
    /// Each call starts over from the bound input; results are not cached.
    pub fn run(&self) -> O
    where
        I: Clone,
    {
        let _span = debug_span!("pipeline.run", steps = self.chain.len()).entered();
        self.chain.call(self.input.clone())
    }

    /// Execute the pipeline, consuming it. Does not require `I: Clone`.
    pub fn run_once(self) -> O {
        let _span = debug_span!("pipeline.run", steps = self.chain.len()).entered();
        self.chain.call(self.input)
    }

    /// Execute the steps on `input` instead of the bound value.
    pub fn apply(&self, input: I) -> O {
        self.chain.call(input)
    }

    /// Turn the pipeline into a closure; calling it is the same as `run`.
    pub fn into_fn(self) -> impl Fn() -> O
    where
        I: Clone,
    {
        move || self.run()
    }

    /// A pipeline with the same steps bound to `input`.
    ///
    /// `self` is left untouched; both pipelines share their steps.
    pub fn with_input(&self, input: I) -> Self {
        Self {
            input,
            chain: self.chain.clone(),
        }
    }

    /// Feed the output of this pipeline into the steps of `other`.
    ///
    /// The input bound to `other` is ignored.
    pub fn concat<U: 'static>(self, other: Pipeline<O, U>) -> Pipeline<I, U> {
        Pipeline {
            chain: self.chain.concat(&other.chain),
            input: self.input,
        }
    }

    /// Convert into an async pipeline bound to the same input.
    pub fn to_async(self) -> AsyncPipeline<I, O>
    where
        O: Send,
    {
        AsyncPipeline::from_sync(self)
    }

    /// The bound input value.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The composed steps, without the input.
    pub fn chain(&self) -> &Chain<I, O> {
        &self.chain
    }

    /// Split into input and chain.
    pub fn into_parts(self) -> (I, Chain<I, O>) {
        (self.input, self.chain)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl<I: 'static, T: 'static, E: 'static> Pipeline<I, Result<T, E>> {
    /// Append a fallible step that only runs while every earlier step
    /// succeeded. The first error is returned unchanged.
    pub fn try_step<U, F>(self, step: F) -> Pipeline<I, Result<U, E>>
    where
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        self.step(move |previous: Result<T, E>| previous.and_then(&step))
    }
}

impl<I: Clone, O> Clone for Pipeline<I, O> {
    fn clone(&self) -> Self {
        Self {
            input: self.input.clone(),
            chain: self.chain.clone(),
        }
    }
}

impl<I: fmt::Debug, O> fmt::Debug for Pipeline<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("input", &self.input)
            .field("steps", &self.chain.len())
            .finish()
    }
}

impl<I, O, U, F> BitOr<F> for Pipeline<I, O>
where
    I: 'static,
    O: 'static,
    F: Fn(O) -> U + Send + Sync + 'static,
{
    type Output = Pipeline<I, U>;

    fn bitor(self, step: F) -> Self::Output {
        self.step(step)
    }
}

impl<I: 'static, O: 'static, U: 'static> Add<Pipeline<O, U>> for Pipeline<I, O> {
    type Output = Pipeline<I, U>;

    fn add(self, other: Pipeline<O, U>) -> Self::Output {
        self.concat(other)
    }
}

/// Create a pipeline bound to `input`.
pub fn pipe<I: 'static>(input: I) -> Pipeline<I, I> {
    Pipeline::pipe(input)
}
