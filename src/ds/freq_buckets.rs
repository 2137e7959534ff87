//! Frequency buckets: the ordering layer behind LFU eviction.
//!
//! Tracks one entry per key, grouped into buckets by access frequency.
//! Within a bucket, entries form a doubly-linked list ordered by recency of
//! last touch: head is the most recently touched, tail is the eviction
//! candidate for that tier.
//!
//! ```text
//!   index: key -> SlotId          entries: SlotArena<Entry<K>>
//!
//!   buckets: freq -> Bucket
//!
//!   min_freq = 1
//!        │
//!        ▼
//!   freq=1: head ──► [c] ◄──► [b] ◄── tail   (tail evicted first)
//!   freq=3: head ──► [a] ◄── tail
//! ```
//!
//! | Operation  | Time  | Notes                                        |
//! |------------|-------|----------------------------------------------|
//! | `insert`   | O(1)  | New key starts at freq=1, `min_freq` reset   |
//! | `touch`    | O(1)* | Migrate to next bucket, push to front        |
//! | `remove`   | O(1)* | Prune emptied bucket                         |
//! | `pop_min`  | O(1)* | Tail of the `min_freq` bucket                |
//!
//! (*) plus an O(distinct frequency levels) rescan of `min_freq` whenever
//! the bucket that defined it is pruned. The rescan is deliberate: patching
//! `min_freq` incrementally across the migration/removal/eviction paths is
//! where LFU implementations historically rot, and the number of distinct
//! levels is bounded by the access count of the hottest key.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Link pointers come first: they are touched on every migration, the key
/// only on eviction.
#[derive(Debug)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

/// Frequency-bucketed key tracker with recency tie-breaking.
///
/// Pure bookkeeping: values and TTLs live in the cache layer above. The
/// tracker guarantees that [`pop_min`](Self::pop_min) always returns the
/// key that is least frequently used, and least recently touched among
/// ties at that frequency.
///
/// # Example
///
/// ```
/// use lfukit::ds::FreqBuckets;
///
/// let mut freq = FreqBuckets::new();
/// freq.insert("a".to_string());
/// freq.insert("b".to_string());
/// freq.touch("a"); // "a" now at freq=2
///
/// assert_eq!(freq.min_freq(), 1);
/// assert_eq!(freq.pop_min(), Some(("b".to_string(), 1)));
/// assert_eq!(freq.min_freq(), 2);
/// ```
#[derive(Debug)]
pub struct FreqBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    min_freq: u64,
}

impl<K> Default for FreqBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FreqBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            entries: SlotArena::new(),
            index: FxHashMap::default(),
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Creates an empty tracker with reserved capacity for entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(capacity);
        Self {
            entries: SlotArena::with_capacity(capacity),
            index,
            buckets: FxHashMap::default(),
            min_freq: 0,
        }
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Smallest frequency level with a non-empty bucket, `0` when empty.
    pub fn min_freq(&self) -> u64 {
        self.min_freq
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Current frequency for `key`, or `None` if untracked.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Tracks a new key at frequency 1. Returns `false` if already present.
    ///
    /// A fresh entry always defines the lowest tier, so `min_freq` is reset
    /// to 1 unconditionally.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);
        self.push_front(1, id);
        self.min_freq = 1;
        true
    }

    /// Increments the frequency of `key` and moves it to the front of its
    /// new bucket. Returns the new frequency, or `None` if untracked.
    pub fn touch<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = *self.index.get(key)?;
        let old_freq = self.entries.get(id)?.freq;
        let new_freq = old_freq.saturating_add(1);
        if new_freq == old_freq {
            // Saturated at u64::MAX: refresh recency only.
            self.unlink(old_freq, id);
            self.push_front(old_freq, id);
            return Some(old_freq);
        }

        self.unlink(old_freq, id);
        self.prune_if_empty(old_freq);

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = new_freq;
        }
        self.push_front(new_freq, id);
        Some(new_freq)
    }

    /// Stops tracking `key` and returns its last frequency.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.remove(key)?;
        let freq = self.entries.get(id)?.freq;
        self.unlink(freq, id);
        self.prune_if_empty(freq);
        self.entries.remove(id).map(|entry| entry.freq)
    }

    /// Removes and returns the eviction candidate `(key, freq)`.
    ///
    /// The candidate is the tail of the `min_freq` bucket: least frequently
    /// used, least recently touched among ties. This two-level tie-break is
    /// the defining policy and is relied on by the cache layer.
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        if self.min_freq == 0 {
            return None;
        }
        let id = self.buckets.get(&self.min_freq)?.tail?;
        let freq = self.entries.get(id)?.freq;
        self.unlink(freq, id);
        self.prune_if_empty(freq);
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.freq))
    }

    /// Eviction candidate without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let id = self.buckets.get(&self.min_freq)?.tail?;
        let entry = self.entries.get(id)?;
        Some((&entry.key, entry.freq))
    }

    /// Drops all tracked keys and buckets.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    fn push_front(&mut self, freq: u64, id: SlotId) {
        let bucket = self.buckets.entry(freq).or_default();
        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(head_id) = old_head {
            if let Some(head) = self.entries.get_mut(head_id) {
                head.prev = Some(id);
            }
        } else {
            bucket.tail = Some(id);
        }
        bucket.head = Some(id);
        bucket.len += 1;
        if self.min_freq == 0 || freq < self.min_freq {
            self.min_freq = freq;
        }
    }

    fn unlink(&mut self, freq: u64, id: SlotId) {
        let (prev, next) = match self.entries.get_mut(id) {
            Some(entry) => {
                let links = (entry.prev, entry.next);
                entry.prev = None;
                entry.next = None;
                links
            }
            None => return,
        };
        if let Some(prev_id) = prev {
            if let Some(entry) = self.entries.get_mut(prev_id) {
                entry.next = next;
            }
        }
        if let Some(next_id) = next {
            if let Some(entry) = self.entries.get_mut(next_id) {
                entry.prev = prev;
            }
        }
        if let Some(bucket) = self.buckets.get_mut(&freq) {
            if bucket.head == Some(id) {
                bucket.head = next;
            }
            if bucket.tail == Some(id) {
                bucket.tail = prev;
            }
            bucket.len = bucket.len.saturating_sub(1);
        }
    }

    /// Removes `freq`'s bucket if it emptied and rescans `min_freq` when
    /// that bucket defined it. The rescan walks distinct frequency levels
    /// only, never entries.
    fn prune_if_empty(&mut self, freq: u64) {
        let empty = self
            .buckets
            .get(&freq)
            .map(|bucket| bucket.len == 0)
            .unwrap_or(false);
        if !empty {
            return;
        }
        self.buckets.remove(&freq);
        if self.min_freq == freq {
            self.min_freq = self.buckets.keys().copied().min().unwrap_or(0);
        }
    }

    /// Walks every bucket list and cross-checks the index, bucket lengths,
    /// and `min_freq`. Test-facing.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut linked = 0usize;
        for (&freq, bucket) in &self.buckets {
            if bucket.len == 0 {
                return Err(InvariantError::new(format!(
                    "bucket {freq} is empty but still indexed"
                )));
            }
            let mut current = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(id) = current {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| InvariantError::new(format!("dangling slot in bucket {freq}")))?;
                if entry.freq != freq {
                    return Err(InvariantError::new(format!(
                        "entry at freq {} linked into bucket {freq}",
                        entry.freq
                    )));
                }
                if entry.prev != last {
                    return Err(InvariantError::new(format!(
                        "broken prev link in bucket {freq}"
                    )));
                }
                if self.index.get(&entry.key) != Some(&id) {
                    return Err(InvariantError::new(format!(
                        "index disagrees with bucket {freq} membership"
                    )));
                }
                last = Some(id);
                current = entry.next;
                count += 1;
            }
            if bucket.tail != last {
                return Err(InvariantError::new(format!(
                    "bucket {freq} tail does not terminate its list"
                )));
            }
            if bucket.len != count {
                return Err(InvariantError::new(format!(
                    "bucket {freq} len {} but {count} linked entries",
                    bucket.len
                )));
            }
            linked += count;
        }
        if linked != self.index.len() {
            return Err(InvariantError::new(format!(
                "{linked} linked entries but {} indexed keys",
                self.index.len()
            )));
        }
        let expected_min = self.buckets.keys().copied().min().unwrap_or(0);
        if self.min_freq != expected_min {
            return Err(InvariantError::new(format!(
                "min_freq {} but smallest live bucket is {expected_min}",
                self.min_freq
            )));
        }
        Ok(())
    }
}
