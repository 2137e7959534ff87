//! Key-prefix namespacing over any [`Cache`].
//!
//! The caches themselves treat the key space as flat; callers wanting
//! isolated namespaces prefix their keys. `Namespaced` packages that
//! convention so one shared cache instance can back several logical
//! domains without the prefixing leaking into call sites.

use std::time::Duration;

use crate::error::ConfigError;
use crate::traits::Cache;

/// A view over a cache that prefixes every key with `"{prefix}:"`.
///
/// Construction fails with [`ConfigError`] on an empty prefix — a silent
/// empty prefix would alias the underlying key space, which is a
/// programmer error, not a runtime condition.
///
/// [`clear`](Cache::clear) and [`len`](Cache::len) operate on the shared
/// underlying cache, not on the namespace: the key/value contract offers
/// no iteration, so per-prefix variants cannot exist.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use lfukit::{Cache, LfuCache, Namespaced};
///
/// let shared: Arc<LfuCache<u64>> = Arc::new(LfuCache::new(128));
/// let prices = Namespaced::try_new("price", Arc::clone(&shared)).unwrap();
/// let quotes = Namespaced::try_new("quote", shared).unwrap();
///
/// prices.set("BTC", 1, Duration::from_secs(30));
/// quotes.set("BTC", 2, Duration::from_secs(30));
/// assert_eq!(prices.get("BTC"), Some(1));
/// assert_eq!(quotes.get("BTC"), Some(2));
/// ```
#[derive(Debug)]
pub struct Namespaced<C> {
    prefix: String,
    inner: C,
}

impl<C> Namespaced<C> {
    /// Wraps `inner`, prefixing every key with `"{prefix}:"`.
    pub fn try_new(prefix: impl Into<String>, inner: C) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::new("namespace prefix must not be empty"));
        }
        Ok(Self { prefix, inner })
    }

    /// The namespace prefix, without the trailing separator.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn scoped(&self, key: &str) -> String {
        let mut scoped = String::with_capacity(self.prefix.len() + 1 + key.len());
        scoped.push_str(&self.prefix);
        scoped.push(':');
        scoped.push_str(key);
        scoped
    }
}

impl<V, C> Cache<V> for Namespaced<C>
where
    C: Cache<V>,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.get(&self.scoped(key))
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        self.inner.set(&self.scoped(key), value, ttl)
    }

    fn delete(&self, key: &str) {
        self.inner.delete(&self.scoped(key))
    }

    /// Clears the shared underlying cache, including other namespaces.
    fn clear(&self) {
        self.inner.clear()
    }

    /// Length of the shared underlying cache, across all namespaces.
    fn len(&self) -> usize {
        self.inner.len()
    }
}
