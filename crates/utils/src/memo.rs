//! Explicit memoization caches
//!
//! A [`Memo`] is an ordinary value owned by the caller: there is no hidden
//! process-wide cache. Share one between decorated functions with an `Arc`.

use crate::config::Settings;
use amalfi_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use lru::LruCache;
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Hit and miss counters of a [`Memo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

impl MemoStats {
    /// Fraction of lookups answered from the cache, `0.0` before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A bounded cache of computed values, evicting the least recently used
/// entry once `capacity` is reached.
pub struct Memo<K: Hash + Eq, V> {
    entries: Mutex<LruCache<K, V>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> Memo<K, V> {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| Error::configuration("memo capacity must be greater than zero"))?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Create a cache sized by [`Settings::memo_capacity`].
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.memo_capacity)
    }

    /// Look up `key`, counting a hit or a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let found = self.entries.lock().get(key).cloned();
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.lock().put(key, value);
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs without the lock held, so it may itself consult this
    /// cache. Two concurrent misses on the same key may both compute; the
    /// later insert wins.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute(&key);
        self.insert(key, value.clone());
        value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.lock().contains(key)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    pub fn stats(&self) -> MemoStats {
        let entries = self.entries.lock();
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            len: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

impl<K: Hash + Eq, V> fmt::Debug for Memo<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Decorate `f` so that results are looked up in `memo` by argument first.
///
/// `f` is called at most once per key for as long as the key stays cached.
pub fn memoize<K, V, F>(memo: Arc<Memo<K, V>>, f: F) -> impl Fn(K) -> V
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: Fn(K) -> V,
{
    move |key| {
        memo.get_or_insert_with(key, |key| {
            trace!("memo miss");
            f(key.clone())
        })
    }
}

/// Async [`memoize`]: the future returned by `f` is only created and awaited
/// on a miss. Usable as an async pipeline step.
pub fn amemoize<K, V, F, Fut>(memo: Arc<Memo<K, V>>, f: F) -> impl Fn(K) -> BoxFuture<'static, V>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    F: Fn(K) -> Fut,
    Fut: Future<Output = V> + Send + 'static,
{
    move |key| match memo.get(&key) {
        Some(value) => futures::future::ready(value).boxed(),
        None => {
            trace!("memo miss");
            let pending = f(key.clone());
            let memo = Arc::clone(&memo);
            async move {
                let value = pending.await;
                memo.insert(key, value.clone());
                value
            }
            .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amalfi_core::constants::DEFAULT_MEMO_CAPACITY;
    use amalfi_core::{apipe, pipe};
    use amalfi_ops::map_;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert!(matches!(
            Memo::<u32, u32>::new(0),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_capacity_from_settings() {
        let settings = Settings::from_json(r#"{"memo_capacity": 3}"#).unwrap();
        let memo = Memo::<u32, u32>::from_settings(&settings).unwrap();
        assert_eq!(memo.capacity(), 3);

        let defaults = Memo::<u32, u32>::from_settings(&Settings::default()).unwrap();
        assert_eq!(defaults.capacity(), DEFAULT_MEMO_CAPACITY);
    }

    #[test]
    fn test_calls_once_per_distinct_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let memo = Arc::new(Memo::new(16).unwrap());
        let square = memoize(Arc::clone(&memo), move |x: u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * x
        });

        assert_eq!(square(3), 9);
        assert_eq!(square(3), 9);
        assert_eq!(square(4), 16);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let stats = memo.stats();
        assert_eq!((stats.hits, stats.misses, stats.len), (1, 2, 2));
        assert!((stats.hit_rate() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_least_recently_used_entry_is_evicted() {
        let memo = Memo::new(2).unwrap();
        memo.insert("a", 1);
        memo.insert("b", 2);
        assert_eq!(memo.get(&"a"), Some(1));
        memo.insert("c", 3);

        assert!(!memo.contains(&"b"));
        assert!(memo.contains(&"a"));
        assert_eq!(memo.len(), memo.capacity());

        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn test_memoized_step_in_pipeline() {
        let memo = Arc::new(Memo::new(8).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let slow_len = memoize(memo, move |s: String| {
            counter.fetch_add(1, Ordering::SeqCst);
            s.len()
        });

        let words = vec!["ab", "cde", "ab", "ab"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        let pipeline = pipe(words).step(map_(slow_len));
        assert_eq!(pipeline.run(), vec![2, 3, 2, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_amemoize() {
        let memo = Arc::new(Memo::new(8).unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let fetch = amemoize(Arc::clone(&memo), move |id: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { format!("user-{id}") }
        });

        let pipeline = apipe(7_u32).step(fetch);
        assert_eq!(pipeline.run().await, "user-7");
        assert_eq!(pipeline.run().await, "user-7");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.stats().hits, 1);
    }
}
