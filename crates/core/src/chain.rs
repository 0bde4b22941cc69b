//! Unbound step compositions.
//!
//! A [`Chain`] is a composed function `I -> O` built one step at a time; an
//! [`AsyncChain`] is its suspending counterpart. Pipelines bind a chain to an
//! input value. Composition never executes anything and never copies a step:
//! every step lives behind an `Arc` that is shared by all chains built from it.

use crate::step::AsyncStep;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type SyncFn<I, O> = Arc<dyn Fn(I) -> O + Send + Sync>;
type AsyncFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, O> + Send + Sync>;

/// An ordered composition of synchronous steps.
pub struct Chain<I, O> {
    func: SyncFn<I, O>,
    len: usize,
}

impl<I: 'static> Chain<I, I> {
    /// Create an empty chain (the identity function).
    pub fn new() -> Self {
        Self {
            func: Arc::new(|value| value),
            len: 0,
        }
    }
}

impl<I: 'static> Default for Chain<I, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: 'static, O: 'static> Chain<I, O> {
    /// Append a step, returning a longer chain.
    pub fn then<U, F>(&self, step: F) -> Chain<I, U>
    where
        F: Fn(O) -> U + Send + Sync + 'static,
    {
        let prev = Arc::clone(&self.func);
        let index = self.len;
        Chain {
            func: Arc::new(move |input| {
                let value = prev(input);
                trace!(step = index, "pipeline step");
                step(value)
            }),
            len: self.len + 1,
        }
    }

    /// Feed the output of this chain into `other`.
    pub fn concat<U: 'static>(&self, other: &Chain<O, U>) -> Chain<I, U> {
        let first = Arc::clone(&self.func);
        let second = Arc::clone(&other.func);
        Chain {
            func: Arc::new(move |input| second(first(input))),
            len: self.len + other.len,
        }
    }

    /// Run every step on `input`, in order.
    pub fn call(&self, input: I) -> O {
        (self.func)(input)
    }

    /// Lift this chain into the async calling convention.
    pub fn to_async(&self) -> AsyncChain<I, O>
    where
        O: Send,
    {
        let func = Arc::clone(&self.func);
        AsyncChain {
            func: Arc::new(move |input| futures::future::ready(func(input)).boxed()),
            len: self.len,
        }
    }
}

impl<I, O> Chain<I, O> {
    /// Number of composed steps.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<I, O> Clone for Chain<I, O> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            len: self.len,
        }
    }
}

impl<I, O> fmt::Debug for Chain<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("steps", &self.len).finish()
    }
}

/// An ordered composition of steps that may suspend.
///
/// Step *i + 1* is only invoked once the future of step *i* has resolved.
pub struct AsyncChain<I, O> {
    func: AsyncFn<I, O>,
    len: usize,
}

impl<I: Send + 'static> AsyncChain<I, I> {
    /// Create an empty chain resolving to its input.
    pub fn new() -> Self {
        Self {
            func: Arc::new(|value| futures::future::ready(value).boxed()),
            len: 0,
        }
    }
}

impl<I: Send + 'static> Default for AsyncChain<I, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: 'static, O: Send + 'static> AsyncChain<I, O> {
    /// Append a step, returning a longer chain.
    pub fn then<S>(&self, step: S) -> AsyncChain<I, S::Output>
    where
        S: AsyncStep<O>,
    {
        let prev = Arc::clone(&self.func);
        let step = Arc::new(step);
        let index = self.len;
        AsyncChain {
            func: Arc::new(move |input| {
                let pending = prev(input);
                let step = Arc::clone(&step);
                async move {
                    let value = pending.await;
                    trace!(step = index, "async pipeline step");
                    step.invoke(value).await
                }
                .boxed()
            }),
            len: self.len + 1,
        }
    }

    /// Feed the output of this chain into `other`.
    pub fn concat<U: Send + 'static>(&self, other: &AsyncChain<O, U>) -> AsyncChain<I, U> {
        let first = Arc::clone(&self.func);
        let second = Arc::clone(&other.func);
        AsyncChain {
            func: Arc::new(move |input| {
                let pending = first(input);
                let second = Arc::clone(&second);
                async move { second(pending.await).await }.boxed()
            }),
            len: self.len + other.len,
        }
    }

    /// Start every step on `input`, in order.
    pub fn call(&self, input: I) -> BoxFuture<'static, O> {
        (self.func)(input)
    }
}

impl<I, O> AsyncChain<I, O> {
    /// Number of composed steps.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<I, O> Clone for AsyncChain<I, O> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            len: self.len,
        }
    }
}

impl<I, O> fmt::Debug for AsyncChain<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncChain").field("steps", &self.len).finish()
    }
}

/// Create an empty synchronous chain over `I`.
pub fn chain<I: 'static>() -> Chain<I, I> {
    Chain::new()
}
