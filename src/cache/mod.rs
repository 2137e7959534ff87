pub mod lfu;
pub mod namespace;
pub mod ttl;

pub use lfu::LfuCache;
pub use namespace::Namespaced;
pub use ttl::TtlCache;
