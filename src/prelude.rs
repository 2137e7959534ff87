//! Convenience re-exports for typical consumers.
//!
//! ```
//! use lfukit::prelude::*;
//! use std::time::Duration;
//!
//! let cache: LfuCache<u64> = LfuCache::new(100);
//! cache.set("k", 1, Duration::from_secs(30));
//! assert_eq!(cache.get("k"), Some(1));
//! ```

pub use crate::cache::lfu::LfuCache;
pub use crate::cache::namespace::Namespaced;
pub use crate::cache::ttl::TtlCache;
pub use crate::error::{ConfigError, InvariantError};
pub use crate::traits::Cache;
