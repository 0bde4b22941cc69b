//! Asynchronous lazy streams

use amalfi_core::{as_async, AsyncPipeline, AsyncStep, Pipeline};
use amalfi_ops::tap;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A lazy sequence of items transformed by async steps.
///
/// Items are processed one at a time: the step for the next item is not
/// invoked until the current one has resolved.
pub struct AsyncStream<T> {
    inner: BoxStream<'static, T>,
}

impl<T: Send + 'static> AsyncStream<T> {
    pub fn new<S>(source: S) -> Self
    where
        S: futures::Stream<Item = T> + Send + 'static,
    {
        Self {
            inner: source.boxed(),
        }
    }

    /// Wrap a synchronous iterable.
    pub fn from_iterable<It>(input: It) -> Self
    where
        It: IntoIterator<Item = T>,
        It::IntoIter: Send + 'static,
    {
        Self::new(stream::iter(input))
    }

    /// Map every item through an async step.
    pub fn map<S>(self, step: S) -> AsyncStream<S::Output>
    where
        S: AsyncStep<T>,
    {
        AsyncStream::new(self.inner.then(move |item| step.invoke(item)))
    }

    /// Keep the items for which the async `predicate` resolves to `true`.
    ///
    /// The predicate receives a clone of each item.
    pub fn filter<P>(self, predicate: P) -> AsyncStream<T>
    where
        T: Clone,
        P: AsyncStep<T, Output = bool>,
    {
        AsyncStream::new(
            self.inner
                .filter(move |item: &T| predicate.invoke(item.clone())),
        )
    }

    /// At most the first `n` items.
    pub fn take(self, n: usize) -> AsyncStream<T> {
        AsyncStream::new(self.inner.take(n))
    }

    /// Items up to, not including, the first one failing `predicate`.
    pub fn take_while<P>(self, predicate: P) -> AsyncStream<T>
    where
        T: Clone,
        P: AsyncStep<T, Output = bool>,
    {
        AsyncStream::new(
            self.inner
                .take_while(move |item: &T| predicate.invoke(item.clone())),
        )
    }

    /// Emit `value` if, and only if, the stream turns out to be empty.
    pub fn default(self, value: T) -> AsyncStream<T> {
        let state = (self.inner.fuse(), Some(value));
        AsyncStream::new(stream::unfold(state, |(mut inner, mut fallback)| async move {
            match inner.next().await {
                Some(item) => Some((item, (inner, None))),
                None => fallback.take().map(|value| (value, (inner, None))),
            }
        }))
    }

    /// Run a synchronous side effect on every item as it passes.
    pub fn tap<F>(self, effect: F) -> AsyncStream<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.map(as_async(tap(effect)))
    }

    /// Drain the stream into a `Vec`.
    pub async fn collect(self) -> Vec<T> {
        self.inner.collect().await
    }

    /// Drain the stream, then hand the items to a custom collector.
    pub async fn collect_into<R, F>(self, into: F) -> R
    where
        F: FnOnce(Vec<T>) -> R,
    {
        into(self.collect().await)
    }

    /// Drain the stream and bind the items as the input of an async pipeline.
    pub async fn to_apipe(self) -> AsyncPipeline<Vec<T>, Vec<T>> {
        AsyncPipeline::pipe(self.collect().await)
    }

    /// Drain the stream and bind the items as the input of a pipeline.
    pub async fn to_pipe(self) -> Pipeline<Vec<T>, Vec<T>> {
        Pipeline::pipe(self.collect().await)
    }
}

impl<T: Send + 'static> AsyncStream<Option<T>> {
    /// Drop `None` items and unwrap the rest.
    pub fn compact(self) -> AsyncStream<T> {
        AsyncStream::new(self.inner.filter_map(future::ready))
    }
}

impl<T> futures::Stream for AsyncStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.inner.poll_next_unpin(cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        futures::Stream::size_hint(&self.inner)
    }
}

impl<T> fmt::Debug for AsyncStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncStream").finish_non_exhaustive()
    }
}

/// Alias for [`AsyncStream::new`].
pub fn astream<T, S>(source: S) -> AsyncStream<T>
where
    T: Send + 'static,
    S: futures::Stream<Item = T> + Send + 'static,
{
    AsyncStream::new(source)
}
