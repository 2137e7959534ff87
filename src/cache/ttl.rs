//! Plain TTL-only cache.
//!
//! For call sites that need expiring lookups but no eviction pressure,
//! paying the LFU engine's frequency bookkeeping buys nothing. This type is
//! a flat map with lazy expiration: unbounded, same lock discipline and
//! same [`Cache`] contract as [`LfuCache`](crate::LfuCache).

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::traits::Cache;

#[derive(Debug)]
struct Stored<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> Stored<V> {
    fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }
}

/// Unbounded thread-safe map cache with per-entry TTL and lazy expiration.
///
/// Entries leave only via TTL discovery on `get`, `delete`, or `clear`;
/// there is no eviction and no frequency tracking.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lfukit::{Cache, TtlCache};
///
/// let cache: TtlCache<u32> = TtlCache::new();
/// cache.set("answer", 42, Duration::from_secs(60));
/// assert_eq!(cache.get("answer"), Some(42));
/// ```
#[derive(Debug, Default)]
pub struct TtlCache<V> {
    inner: Mutex<FxHashMap<String, Stored<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FxHashMap::default()),
        }
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        let mut map = self.inner.lock();
        let expired = map.get(key)?.is_expired(now);
        if expired {
            map.remove(key);
            return None;
        }
        map.get(key).map(|stored| stored.value.clone())
    }
}

impl<V: Clone> Cache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        let now = Instant::now();
        self.inner.lock().insert(
            key.to_owned(),
            Stored {
                value,
                expires_at: now.checked_add(ttl),
            },
        );
    }

    fn delete(&self, key: &str) {
        self.inner.lock().remove(key);
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}
