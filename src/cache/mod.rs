//! Cache Module
//!
//! Dual-tier (in-memory + durable) caching with TTL expiry.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TieredCache;

// == Public Constants ==
/// Namespace prefix for cache keys in the shared durable store.
///
/// Keeps cache entries apart from unrelated persisted state (the cart,
/// UI flags) that lives in the same store.
pub const CACHE_PREFIX: &str = "cache.";

/// Schema version stamped into every entry; entries written under a
/// different version read as misses.
pub const CACHE_SCHEMA_VERSION: &str = "1.0.0";
