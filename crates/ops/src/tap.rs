//! Side effects that leave the data untouched
//!
//! The side-effect function must not change the value in a way that is
//! visible downstream. Shared references make that the default; interior
//! mutability is the caller's responsibility.

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;

/// Run `effect` on the value and pass the value on unchanged.
pub fn tap<T, F>(effect: F) -> impl Fn(T) -> T
where
    F: Fn(&T),
{
    move |value| {
        effect(&value);
        value
    }
}

/// Run `effect` on every element of an iterable and pass the elements on.
pub fn tap_each<T, It, F>(effect: F) -> impl Fn(It) -> Vec<T>
where
    It: IntoIterator<Item = T>,
    F: Fn(&T),
{
    move |items| {
        items
            .into_iter()
            .inspect(|item| effect(item))
            .collect()
    }
}

/// Async [`tap`]: await `effect` on a clone of the value, then pass the
/// original value on.
pub fn atap<T, F, Fut>(effect: F) -> impl Fn(T) -> BoxFuture<'static, T>
where
    T: Clone + Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future + Send + 'static,
{
    move |value| {
        let pending = effect(value.clone());
        async move {
            pending.await;
            value
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::{apipe, pipe};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn add_one(x: i32) -> i32 {
        x + 1
    }

    #[test]
    fn test_tap() {
        let numbers = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&numbers);

        let pipeline = pipe(1)
            .then(tap(move |y: &i32| sink.lock().unwrap().push(*y)))
            .then(add_one);

        assert_eq!(pipeline.run(), 2);
        assert_eq!(*numbers.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_tap_each() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let pipeline = pipe(vec!["a", "b"]).step(tap_each(move |s: &&str| {
            sink.lock().unwrap().push(s.to_uppercase());
        }));

        assert_eq!(pipeline.run(), vec!["a", "b"]);
        assert_eq!(*seen.lock().unwrap(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_atap() {
        let numbers = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&numbers);

        let side_effect = move |y: i32| {
            let sink = Arc::clone(&sink);
            async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                sink.lock().unwrap().push(y);
            }
        };

        let pipeline = apipe(1).then(atap(side_effect)).step_sync(add_one);
        assert_eq!(pipeline.run().await, 2);
        assert_eq!(*numbers.lock().unwrap(), vec![1]);
    }
}
