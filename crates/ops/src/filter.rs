//! Order-preserving filtering

use futures::future::{join_all, BoxFuture, FutureExt};
use std::future::Future;
use tracing::trace;

/// Keep the elements for which `predicate` returns `true`, in their original
/// relative order.
pub fn filter_<T, It, P>(predicate: P) -> impl Fn(It) -> Vec<T>
where
    It: IntoIterator<Item = T>,
    P: Fn(&T) -> bool,
{
    move |items| items.into_iter().filter(|item| predicate(item)).collect()
}

/// Keep the payload of every `Some` element, dropping the `None`s.
pub fn compact<T, It>() -> impl Fn(It) -> Vec<T>
where
    It: IntoIterator<Item = Option<T>>,
{
    |items| items.into_iter().flatten().collect()
}

/// Async [`filter_`].
///
/// The predicate receives a clone of each element, all predicate futures run
/// concurrently, and the kept elements stay in input order.
pub fn afilter<T, It, P, Fut>(predicate: P) -> impl Fn(It) -> BoxFuture<'static, Vec<T>>
where
    It: IntoIterator<Item = T>,
    T: Clone + Send + 'static,
    P: Fn(T) -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    move |items| {
        let items: Vec<T> = items.into_iter().collect();
        let checks = join_all(items.iter().cloned().map(&predicate));
        trace!(items = items.len(), "afilter fan-out");
        async move {
            let keep = checks.await;
            items
                .into_iter()
                .zip(keep)
                .filter_map(|(item, keep)| keep.then_some(item))
                .collect()
        }
        .boxed()
    }
}
