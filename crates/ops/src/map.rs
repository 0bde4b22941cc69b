//! Element-wise mapping

use futures::future::{join_all, try_join_all, BoxFuture, FutureExt};
use futures::stream::{self, StreamExt};
use std::future::Future;
use tracing::trace;

/// Apply `f` to every element, preserving order.
pub fn map_<I, O, It, F>(f: F) -> impl Fn(It) -> Vec<O>
where
    It: IntoIterator<Item = I>,
    F: Fn(I) -> O,
{
    move |items| items.into_iter().map(&f).collect()
}

/// Apply an async `f` to every element concurrently.
///
/// All per-item futures are started together and joined; the output keeps
/// input order regardless of completion order. Fallible futures keep every
/// outcome, so one failure does not discard the other results.
pub fn amap<I, O, It, F, Fut>(f: F) -> impl Fn(It) -> BoxFuture<'static, Vec<O>>
where
    It: IntoIterator<Item = I>,
    F: Fn(I) -> Fut,
    Fut: Future<Output = O> + Send + 'static,
    O: Send + 'static,
{
    move |items| {
        let pending: Vec<Fut> = items.into_iter().map(&f).collect();
        trace!(items = pending.len(), "amap fan-out");
        join_all(pending).boxed()
    }
}

/// Like [`amap`] for fallible futures, but fail fast.
///
/// The first error is returned as is and the remaining futures are dropped.
pub fn try_amap<I, O, E, It, F, Fut>(f: F) -> impl Fn(It) -> BoxFuture<'static, Result<Vec<O>, E>>
where
    It: IntoIterator<Item = I>,
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
    O: Send + 'static,
    E: Send + 'static,
{
    move |items| {
        let pending: Vec<Fut> = items.into_iter().map(&f).collect();
        trace!(items = pending.len(), "try_amap fan-out");
        try_join_all(pending).boxed()
    }
}

/// Like [`amap`] with at most `limit` futures in flight. Order is preserved.
pub fn amap_buffered<I, O, It, F, Fut>(
    limit: usize,
    f: F,
) -> impl Fn(It) -> BoxFuture<'static, Vec<O>>
where
    It: IntoIterator<Item = I>,
    F: Fn(I) -> Fut,
    Fut: Future<Output = O> + Send + 'static,
    O: Send + 'static,
{
    let limit = limit.max(1);
    move |items| {
        let pending: Vec<Fut> = items.into_iter().map(&f).collect();
        trace!(items = pending.len(), limit, "amap_buffered fan-out");
        stream::iter(pending).buffered(limit).collect::<Vec<O>>().boxed()
    }
}
