//! LFU cache with per-entry TTL.
//!
//! Two layers: [`LfuCore`] is the unsynchronized engine, driven with an
//! explicit `now` so expiration logic is testable without sleeping;
//! [`LfuCache`] wraps it in a single `parking_lot::Mutex` and is the public
//! type. Every public operation holds the lock for its entire body, so no
//! caller can observe a torn invariant from another in-flight operation.
//!
//! ## Policy
//!
//! ```text
//!   set(new key) at capacity
//!        │
//!        ▼
//!   victim = tail of the min-frequency bucket
//!            (least frequently used; least recently touched among ties)
//! ```
//!
//! Frequency starts at 1 on insert and increments on every hit *and* every
//! overwrite — a write counts as a use. Expiration is lazy: an entry past
//! its deadline is purged only when the next `get` discovers it. `len()`
//! therefore counts stale-but-unaccessed entries; sweeping eagerly would
//! break the O(1)-per-operation cost model and is deliberately not done.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::ds::FreqBuckets;
use crate::error::InvariantError;
use crate::traits::Cache;

#[derive(Debug)]
struct Stored<V> {
    value: V,
    /// `None` means the deadline overflowed `Instant` range: never expires.
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

/// Unsynchronized LFU+TTL engine. All time-dependent operations take an
/// explicit `now`; [`LfuCache`] supplies `Instant::now()`.
#[derive(Debug)]
pub(crate) struct LfuCore<V> {
    store: FxHashMap<String, Stored<V>>,
    freq: FreqBuckets<String>,
    max_size: usize,
}

impl<V> LfuCore<V> {
    fn new(max_size: usize) -> Self {
        Self {
            store: FxHashMap::default(),
            freq: FreqBuckets::new(),
            max_size,
        }
    }

    fn get_at(&mut self, key: &str, now: Instant) -> Option<&V> {
        let expired = self.store.get(key)?.is_expired(now);
        if expired {
            // Lazy expiration: discovered on access, purged, reported as
            // a miss indistinguishable from "never set".
            self.store.remove(key);
            self.freq.remove(key);
            return None;
        }
        self.freq.touch(key);
        self.store.get(key).map(|stored| &stored.value)
    }

    fn set_at(&mut self, key: &str, value: V, ttl: Duration, now: Instant) {
        let expires_at = now.checked_add(ttl);
        if let Some(stored) = self.store.get_mut(key) {
            // Overwrite counts as a use; the set size is unchanged so no
            // capacity check is needed.
            stored.value = value;
            stored.expires_at = expires_at;
            self.freq.touch(key);
            return;
        }

        if self.max_size > 0 && self.store.len() >= self.max_size {
            if let Some((victim, _freq)) = self.freq.pop_min() {
                self.store.remove(&victim);
            }
        }

        self.freq.insert(key.to_owned());
        self.store.insert(
            key.to_owned(),
            Stored { value, expires_at },
        );
    }

    fn delete(&mut self, key: &str) {
        self.store.remove(key);
        self.freq.remove(key);
    }

    fn clear(&mut self) {
        self.store.clear();
        self.freq.clear();
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        self.freq.check_invariants()?;
        if self.store.len() != self.freq.len() {
            return Err(InvariantError::new(format!(
                "store holds {} values but {} keys are tracked",
                self.store.len(),
                self.freq.len()
            )));
        }
        for key in self.store.keys() {
            if !self.freq.contains(key.as_str()) {
                return Err(InvariantError::new(format!(
                    "stored key {key:?} is missing from frequency tracking"
                )));
            }
        }
        if self.max_size > 0 && self.store.len() > self.max_size {
            return Err(InvariantError::new(format!(
                "{} entries exceed max_size {}",
                self.store.len(),
                self.max_size
            )));
        }
        Ok(())
    }
}

/// Thread-safe LFU cache with per-entry TTL.
///
/// Eviction prefers the least frequently used entry, breaking ties by
/// evicting the least recently touched entry within the lowest frequency
/// tier. Get, set, delete and clear are O(1) amortized; the only non-O(1)
/// step is a rescan over distinct frequency levels when the minimum tier
/// empties.
///
/// `get` returns a clone of the value. For payloads that are expensive to
/// clone, store an `Arc<T>` as the value type.
///
/// This is a passive, coarsely locked structure, not a sharded or lock-free
/// cache: every operation takes one exclusive lock for its whole body in
/// exchange for invariant simplicity.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use lfukit::{Cache, LfuCache};
///
/// let cache: LfuCache<String> = LfuCache::new(2);
/// cache.set("a", "alpha".to_string(), Duration::from_secs(60));
/// cache.set("b", "beta".to_string(), Duration::from_secs(60));
/// cache.get("a"); // "a" now at frequency 2
///
/// cache.set("c", "gamma".to_string(), Duration::from_secs(60));
/// assert_eq!(cache.get("b"), None); // lowest frequency, evicted
/// assert_eq!(cache.get("a").as_deref(), Some("alpha"));
/// ```
#[derive(Debug)]
pub struct LfuCache<V> {
    inner: Mutex<LfuCore<V>>,
}

impl<V: Clone> LfuCache<V> {
    /// Creates a cache bounded to `max_size` entries. `max_size == 0`
    /// selects unbounded mode: eviction never triggers and entries leave
    /// only via TTL, `delete`, or `clear`.
    pub fn new(max_size: usize) -> Self {
        Self {
            inner: Mutex::new(LfuCore::new(max_size)),
        }
    }

    /// Equivalent to `new(0)`.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Capacity bound, `0` for unbounded.
    pub fn max_size(&self) -> usize {
        self.inner.lock().max_size
    }

    /// Current access frequency of `key`, if live. Mostly useful in tests
    /// and diagnostics; does not count as a use.
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.inner.lock().freq.frequency(key)
    }

    #[cfg(test)]
    pub(crate) fn with_core<R>(&self, f: impl FnOnce(&mut LfuCore<V>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<V: Clone> Cache<V> for LfuCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get_at(key, Instant::now()).cloned()
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        self.inner.lock().set_at(key, value, ttl, Instant::now());
    }

    fn delete(&self, key: &str) {
        self.inner.lock().delete(key);
    }

    fn clear(&self) {
        self.inner.lock().clear();
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }
}
