//! The uniform step calling convention shared by async pipelines and streams.
//!
//! Any closure `Fn(I) -> impl Future` is an [`AsyncStep`]. Plain functions are
//! brought into the same convention with [`as_async`], which wraps their result
//! in an already-resolved future.

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

/// A single-input step that may suspend before producing its output.
pub trait AsyncStep<I>: Send + Sync + 'static {
    type Output: Send + 'static;

    /// Start the step on `input`.
    ///
    /// Nothing observable happens until the returned future is polled for
    /// closures; for [`Immediate`] steps the wrapped function runs eagerly.
    fn invoke(&self, input: I) -> BoxFuture<'static, Self::Output>;
}

impl<F, I, Fut> AsyncStep<I> for F
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    type Output = Fut::Output;

    fn invoke(&self, input: I) -> BoxFuture<'static, Self::Output> {
        (self)(input).boxed()
    }
}

/// A synchronous function adapted to the async step convention.
///
/// Created by [`as_async`].
#[derive(Clone, Copy)]
pub struct Immediate<F> {
    func: F,
}

impl<F> Immediate<F> {
    /// Return the wrapped function.
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F> fmt::Debug for Immediate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Immediate").finish_non_exhaustive()
    }
}

impl<F, I, O> AsyncStep<I> for Immediate<F>
where
    F: Fn(I) -> O + Send + Sync + 'static,
    O: Send + 'static,
{
    type Output = O;

    fn invoke(&self, input: I) -> BoxFuture<'static, O> {
        future::ready((self.func)(input)).boxed()
    }
}

/// Adapt a synchronous function so it can be used wherever an [`AsyncStep`]
/// is expected.
///
/// ```rust
/// use amalfi_core::{apipe, as_async};
///
/// # futures::executor::block_on(async {
/// let pipeline = apipe(3).step(as_async(|x: i32| x + 1));
/// assert_eq!(pipeline.run().await, 4);
/// # });
/// ```
pub fn as_async<F>(func: F) -> Immediate<F> {
    Immediate { func }
}

/// Identity function. Returns the input value unchanged.
pub fn identity<T>(value: T) -> T {
    value
}
