//! Synchronous lazy streams

use crate::astream::AsyncStream;
use amalfi_core::{AsyncPipeline, Pipeline};
use amalfi_ops::tap;
use std::fmt;

type BoxIter<T> = Box<dyn Iterator<Item = T> + Send>;

/// A lazy sequence of items transformed by synchronous functions.
pub struct Stream<T> {
    iter: BoxIter<T>,
}

impl<T: Send + 'static> Stream<T> {
    /// Wrap an iterable. Nothing is pulled from it yet.
    pub fn new<It>(input: It) -> Self
    where
        It: IntoIterator<Item = T>,
        It::IntoIter: Send + 'static,
    {
        Self {
            iter: Box::new(input.into_iter()),
        }
    }

    /// Map every item through `f`.
    pub fn map<O, F>(self, f: F) -> Stream<O>
    where
        O: Send + 'static,
        F: Fn(T) -> O + Send + 'static,
    {
        Stream::new(self.iter.map(f))
    }

    /// Keep the items for which `predicate` holds.
    pub fn filter<P>(self, predicate: P) -> Stream<T>
    where
        P: Fn(&T) -> bool + Send + 'static,
    {
        Stream::new(self.iter.filter(move |item| predicate(item)))
    }

    /// At most the first `n` items.
    pub fn take(self, n: usize) -> Stream<T> {
        Stream::new(self.iter.take(n))
    }

    /// Items up to, not including, the first one failing `predicate`.
    pub fn take_while<P>(self, predicate: P) -> Stream<T>
    where
        P: Fn(&T) -> bool + Send + 'static,
    {
        Stream::new(self.iter.take_while(move |item| predicate(item)))
    }

    /// Emit `value` if, and only if, the stream turns out to be empty.
    pub fn default(self, value: T) -> Stream<T> {
        let mut iter = self.iter;
        let mut fallback = Some(value);
        Stream::new(std::iter::from_fn(move || match iter.next() {
            Some(item) => {
                fallback = None;
                Some(item)
            }
            None => fallback.take(),
        }))
    }

    /// Run a side effect on every item as it passes.
    pub fn tap<F>(self, effect: F) -> Stream<T>
    where
        F: Fn(&T) + Send + 'static,
    {
        self.map(tap(effect))
    }

    /// Consume the stream into a `Vec`.
    ///
    /// Never returns for an infinite stream.
    pub fn collect(self) -> Vec<T> {
        self.iter.collect()
    }

    /// Consume the stream with a custom collector.
    pub fn collect_into<R, F>(self, into: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        into(self)
    }

    /// Collect the items and bind them as the input of a new pipeline.
    pub fn to_pipe(self) -> Pipeline<Vec<T>, Vec<T>> {
        Pipeline::pipe(self.collect())
    }

    /// Collect the items and bind them as the input of a new async pipeline.
    pub fn to_apipe(self) -> AsyncPipeline<Vec<T>, Vec<T>> {
        AsyncPipeline::pipe(self.collect())
    }

    /// Continue as an async stream.
    pub fn to_async(self) -> AsyncStream<T> {
        AsyncStream::new(futures::stream::iter(self.iter))
    }
}

impl<T: Send + 'static> Stream<Option<T>> {
    /// Drop `None` items and unwrap the rest.
    pub fn compact(self) -> Stream<T> {
        Stream::new(self.iter.flatten())
    }
}

impl<T> IntoIterator for Stream<T> {
    type Item = T;
    type IntoIter = BoxIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

/// Alias for [`Stream::new`].
pub fn stream<T, It>(input: It) -> Stream<T>
where
    T: Send + 'static,
    It: IntoIterator<Item = T>,
    It::IntoIter: Send + 'static,
{
    Stream::new(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn add_one(x: i32) -> i32 {
        x + 1
    }

    #[test]
    fn test_map_filter_take() {
        let result = stream(vec![1, 2, 3, 4, 5])
            .map(add_one)
            .filter(|x| x % 2 == 0)
            .take(2)
            .collect();
        assert_eq!(result, vec![2, 4]);
    }

    #[test]
    fn test_is_lazy_until_collected() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulled);
        let lazy = stream(1..).map(move |x: u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * 2
        });
        assert_eq!(pulled.load(Ordering::SeqCst), 0);

        // take keeps an infinite stream finite
        assert_eq!(lazy.take(3).collect(), vec![2, 4, 6]);
        assert_eq!(pulled.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_take_while() {
        let result = stream(vec![1, 2, 3, 1]).take_while(|x| *x < 3).collect();
        assert_eq!(result, vec![1, 2]);
    }

    #[rstest]
    #[case(vec![1, 2, 3], vec![1, 2, 3])]
    #[case(vec![], vec![0])]
    fn test_default_only_for_empty(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
        assert_eq!(stream(input).default(0).collect(), expected);
    }

    #[test]
    fn test_compact() {
        let result = stream(vec![Some(1), None, Some(3)]).compact().collect();
        assert_eq!(result, vec![1, 3]);
    }

    #[test]
    fn test_tap_sees_every_item() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let result = stream(vec![1, 2, 3])
            .tap(move |x| sink.lock().unwrap().push(*x))
            .collect();
        assert_eq!(result, vec![1, 2, 3]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_collect_into_custom_collector() {
        let unique = stream(vec![3, 1, 3, 2]).collect_into(|s| s.into_iter().collect::<BTreeSet<_>>());
        assert_eq!(unique.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_to_pipe() {
        let pipeline = stream(vec![1, 2, 3])
            .map(add_one)
            .to_pipe()
            .step(|v: Vec<i32>| v.into_iter().sum::<i32>());
        assert_eq!(pipeline.run(), 9);
    }

    #[tokio::test]
    async fn test_to_async_and_to_apipe() {
        let doubled = stream(vec![1, 2, 3])
            .to_async()
            .map(|x: i32| async move { x * 2 })
            .collect()
            .await;
        assert_eq!(doubled, vec![2, 4, 6]);

        let total = stream(vec![1, 2])
            .to_apipe()
            .step_sync(|v: Vec<i32>| v.len())
            .run()
            .await;
        assert_eq!(total, 2);
    }
}
