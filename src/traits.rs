//! The key/value contract shared by every cache type in this crate.
//!
//! Collaborators (price services, repositories, metadata resolvers) consume
//! caches through this one narrow seam, so the LFU engine, the plain TTL
//! cache, and the namespacing wrapper stay interchangeable at call sites.

use std::sync::Arc;
use std::time::Duration;

/// A lock-protected in-memory cache with per-entry TTL.
///
/// All methods take `&self`: implementations serialize internally and are
/// safe to share across threads behind an [`Arc`].
///
/// A read has exactly two observable outcomes, hit or miss. A miss covers
/// "never set", "deleted", and "expired" uniformly; callers cannot (and
/// must not) distinguish the three from the return value.
pub trait Cache<V> {
    /// Looks up `key`, counting a hit as a use. Expired entries are purged
    /// on discovery and reported as a miss.
    fn get(&self, key: &str) -> Option<V>;

    /// Inserts or replaces `key`, resetting its deadline to now + `ttl`.
    /// A write on an existing key counts as a use. A zero `ttl` yields an
    /// entry that expires immediately; that is a valid state, not an error.
    fn set(&self, key: &str, value: V, ttl: Duration);

    /// Removes `key` if present. Idempotent.
    fn delete(&self, key: &str);

    /// Drops every entry.
    fn clear(&self);

    /// Number of live entries. Entries past their deadline but not yet
    /// accessed still count; lazy expiration only purges on access.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V, C> Cache<V> for Arc<C>
where
    C: Cache<V> + ?Sized,
{
    fn get(&self, key: &str) -> Option<V> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: V, ttl: Duration) {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) {
        (**self).delete(key)
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
