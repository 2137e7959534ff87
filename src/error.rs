//! Error types for the lfukit library.
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. an empty namespace prefix). This is the programmer-error class;
//!   the caches themselves have no runtime failure mode — a read is either
//!   a hit or a miss.
//! - [`InvariantError`]: Returned by the test-facing `check_invariants`
//!   methods when internal bookkeeping is inconsistent.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`Namespaced::try_new`](crate::cache::namespace::Namespaced::try_new).
/// Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use lfukit::{LfuCache, Namespaced};
///
/// let cache: LfuCache<u64> = LfuCache::new(16);
/// let err = Namespaced::try_new("", cache).unwrap_err();
/// assert!(err.to_string().contains("prefix"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by the `check_invariants` methods on
/// [`FreqBuckets`](crate::ds::FreqBuckets) and the LFU engine. These
/// checks walk the
/// bucket lists and are intended for tests, not for hot paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
