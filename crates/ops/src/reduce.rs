//! Left folds
//!
//! `reduce_`/`areduce` use the first element as the starting accumulator and
//! therefore fail on empty input; `fold_`/`afold` take an explicit seed.

use amalfi_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;

/// Fold left to right starting from the first element.
///
/// For `k` elements `combine` runs exactly `k - 1` times. An empty input
/// yields [`Error::EmptyReduce`].
pub fn reduce_<T, It, F>(combine: F) -> impl Fn(It) -> Result<T>
where
    It: IntoIterator<Item = T>,
    F: Fn(T, T) -> T,
{
    move |items| {
        items
            .into_iter()
            .reduce(&combine)
            .ok_or_else(|| Error::empty_reduce("reduce_"))
    }
}

/// Fold left to right starting from `initial`.
pub fn fold_<T, A, It, F>(combine: F, initial: A) -> impl Fn(It) -> A
where
    It: IntoIterator<Item = T>,
    A: Clone,
    F: Fn(A, T) -> A,
{
    move |items| items.into_iter().fold(initial.clone(), &combine)
}

/// Async [`reduce_`]. Each combination is awaited before the next one starts.
pub fn areduce<T, It, F, Fut>(combine: F) -> impl Fn(It) -> BoxFuture<'static, Result<T>>
where
    It: IntoIterator<Item = T>,
    T: Send + 'static,
    F: Fn(T, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let combine = Arc::new(combine);
    move |items| {
        let items: Vec<T> = items.into_iter().collect();
        let combine = Arc::clone(&combine);
        async move {
            let mut rest = items.into_iter();
            let mut acc = rest.next().ok_or_else(|| Error::empty_reduce("areduce"))?;
            for item in rest {
                acc = combine(acc, item).await;
            }
            Ok(acc)
        }
        .boxed()
    }
}

/// Async [`fold_`]. Each combination is awaited before the next one starts.
pub fn afold<T, A, It, F, Fut>(combine: F, initial: A) -> impl Fn(It) -> BoxFuture<'static, A>
where
    It: IntoIterator<Item = T>,
    T: Send + 'static,
    A: Clone + Send + 'static,
    F: Fn(A, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = A> + Send + 'static,
{
    let combine = Arc::new(combine);
    move |items| {
        let items: Vec<T> = items.into_iter().collect();
        let combine = Arc::clone(&combine);
        let mut acc = initial.clone();
        async move {
            for item in items {
                acc = combine(acc, item).await;
            }
            acc
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::{apipe, pipe};
    use std::sync::Mutex;
    use std::time::Duration;

    fn add(x: i32, y: i32) -> i32 {
        x + y
    }

    async fn wait_and_add(x: i32, y: i32) -> i32 {
        tokio::time::sleep(Duration::from_millis(1)).await;
        x + y
    }

    #[test]
    fn test_fold_with_seed() {
        let sum = fold_(add, 0);
        assert_eq!(sum(vec![1, 2, 3, 4]), 10);
        assert_eq!(sum(Vec::new()), 0);
    }

    #[test]
    fn test_fold_in_pipeline() {
        let pipeline = pipe(vec![1, 2, 3, 4]).step(fold_(add, 0));
        assert_eq!(pipeline.run(), 10);
    }

    #[test]
    fn test_reduce_empty_input_is_an_error() {
        let err = reduce_(add)(Vec::<i32>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyReduce { .. }));
    }

    #[test]
    fn test_reduce_combines_left_to_right_k_minus_one_times() {
        let calls = Mutex::new(Vec::new());
        let concat = reduce_(|a: String, b: String| {
            calls.lock().unwrap().push((a.clone(), b.clone()));
            a + &b
        });

        assert_eq!(
            concat(vec!["a".to_string(), "b".to_string(), "c".to_string()]).unwrap(),
            "abc"
        );
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                ("a".to_string(), "b".to_string()),
                ("ab".to_string(), "c".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_afold_in_async_pipeline() {
        let pipeline = apipe(vec![1, 2, 3, 4]).step(afold(wait_and_add, 0));
        assert_eq!(pipeline.run().await, 10);
    }

    #[tokio::test]
    async fn test_areduce() {
        assert_eq!(areduce(wait_and_add)(vec![5, 6, 7]).await.unwrap(), 18);
        assert!(areduce(wait_and_add)(Vec::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_areduce_is_sequential() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&log);
        let subtract = move |a: i32, b: i32| {
            seen.lock().unwrap().push(a);
            async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                a - b
            }
        };

        assert_eq!(areduce(subtract)(vec![10, 1, 2, 3]).await.unwrap(), 4);
        // each call sees the accumulator produced by the previous one
        assert_eq!(*log.lock().unwrap(), vec![10, 9, 7]);
    }
}
