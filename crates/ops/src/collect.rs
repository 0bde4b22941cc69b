//! Eager collection of produced items

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{Stream, StreamExt};

/// Run an item-producing function and gather everything it yields into a
/// `Vec`, in production order.
///
/// Handy for turning a lazy iterator into a concrete sequence inside a
/// pipeline.
pub fn collect_<I, O, G, It>(produce: G) -> impl Fn(I) -> Vec<O>
where
    G: Fn(I) -> It,
    It: IntoIterator<Item = O>,
{
    move |input| produce(input).into_iter().collect()
}

/// Async [`collect_`]: gather every item of the stream returned by `produce`,
/// awaiting each one in order.
pub fn acollect<I, O, G, S>(produce: G) -> impl Fn(I) -> BoxFuture<'static, Vec<O>>
where
    G: Fn(I) -> S,
    S: Stream<Item = O> + Send + 'static,
    O: Send + 'static,
{
    move |input| produce(input).collect::<Vec<O>>().boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::{apipe, pipe};
    use futures::stream;
    use std::time::Duration;

    fn yield_items(items: Vec<i32>) -> impl Iterator<Item = i32> {
        items.into_iter()
    }

    fn wait_and_yield(items: Vec<i32>) -> impl Stream<Item = i32> + Send {
        stream::iter(items).then(|item| async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            item
        })
    }

    #[test]
    fn test_collect() {
        assert_eq!(collect_(yield_items)(vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn test_collect_in_pipeline() {
        let pipeline = pipe(vec![1, 2, 3])
            .step(collect_(yield_items))
            .step(|v: Vec<i32>| v.into_iter().sum::<i32>());
        assert_eq!(pipeline.run(), 6);
    }

    #[test]
    fn test_collect_from_generator() {
        let countdown = collect_(|from: u8| (0..=from).rev());
        assert_eq!(countdown(3), vec![3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_acollect() {
        assert_eq!(acollect(wait_and_yield)(vec![1, 2, 3]).await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_acollect_in_pipeline() {
        let pipeline = apipe(vec![1, 2, 3])
            .step(acollect(wait_and_yield))
            .step_sync(|v: Vec<i32>| v.into_iter().sum::<i32>());
        assert_eq!(pipeline.run().await, 6);
    }
}
