//! Cache Statistics Module
//!
//! Read-only usage snapshot across both cache tiers.

use serde::Serialize;

// == Cache Stats ==
/// Aggregate view of the cache at a point in time.
///
/// Built by scanning both tiers without mutating either; malformed durable
/// entries are skipped rather than counted or evicted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Entries currently held in the volatile tier
    pub memory_count: usize,
    /// Parseable entries currently held in the durable tier
    pub durable_count: usize,
    /// Total serialized size of durable entries in bytes
    pub total_size_bytes: usize,
    /// Key of the entry with the oldest creation timestamp
    pub oldest_key: Option<String>,
    /// Key of the entry with the newest creation timestamp
    pub newest_key: Option<String>,
}

impl CacheStats {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new_is_empty() {
        let stats = CacheStats::new();
        assert_eq!(stats.memory_count, 0);
        assert_eq!(stats.durable_count, 0);
        assert_eq!(stats.total_size_bytes, 0);
        assert!(stats.oldest_key.is_none());
        assert!(stats.newest_key.is_none());
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats {
            memory_count: 2,
            durable_count: 3,
            total_size_bytes: 128,
            oldest_key: Some("a".to_string()),
            newest_key: Some("b".to_string()),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("memory_count"));
        assert!(json.contains("total_size_bytes"));
        assert!(json.contains("oldest_key"));
    }
}
