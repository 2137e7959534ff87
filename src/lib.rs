//! lfukit: an in-process LFU cache with per-entry TTL.
//!
//! The core engine evicts by frequency first and recency second, expires
//! entries lazily on access, and serializes every operation behind a single
//! lock. A plain TTL-only cache and a key-prefix wrapper round out the
//! surface; all three implement the [`Cache`](traits::Cache) trait.

pub mod cache;
pub mod ds;
pub mod error;
pub mod prelude;
pub mod traits;

pub use cache::lfu::LfuCache;
pub use cache::namespace::Namespaced;
pub use cache::ttl::TtlCache;
pub use traits::Cache;
