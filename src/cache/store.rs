//! Cache Store Module
//!
//! Main cache engine funneling reads and writes through two tiers: a private
//! in-memory map and a namespaced slice of the shared durable store.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, CACHE_PREFIX};
use crate::storage::DiskStore;

// == Tiered Cache ==
/// TTL cache backed by a volatile map and a durable key/value store.
///
/// All reads go through one funnel (volatile, then durable with promotion,
/// then miss) and all writes through another (both tiers), so the tiers
/// cannot drift. Storage failures degrade to misses; no operation on this
/// type returns an error.
#[derive(Debug)]
pub struct TieredCache {
    /// Volatile tier, private to this instance
    memory: HashMap<String, CacheEntry>,
    /// Durable tier, shared with other persisted state via key prefix
    disk: DiskStore,
}

impl TieredCache {
    // == Constructor ==
    /// Creates a cache over the given durable store.
    ///
    /// The volatile tier starts empty; durable entries from a previous
    /// process are picked up lazily on first read.
    pub fn new(disk: DiskStore) -> Self {
        Self {
            memory: HashMap::new(),
            disk,
        }
    }

    /// Returns the durable-store key for a logical cache key.
    fn disk_key(&self, key: &str) -> String {
        format!("{}{}", CACHE_PREFIX, key)
    }

    // == Set ==
    /// Stores a value under `key` with the given TTL, writing both tiers.
    ///
    /// A serialization or durable-write failure is logged and swallowed;
    /// the volatile write still lands, so a set never fails.
    pub fn set<T: Serialize>(&mut self, key: &str, data: &T, max_age: Duration) {
        let payload = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache write for '{}' skipped, payload not serializable: {}", key, e);
                return;
            }
        };

        let entry = CacheEntry::new(payload, max_age.as_millis() as u64);

        match serde_json::to_string(&entry) {
            Ok(json) => {
                if let Err(e) = self.disk.write(&self.disk_key(key), &json) {
                    warn!("Durable cache write for '{}' failed: {}", key, e);
                }
            }
            Err(e) => warn!("Durable cache write for '{}' failed to serialize: {}", key, e),
        }

        self.memory.insert(key.to_string(), entry);
    }

    // == Get ==
    /// Retrieves the value stored under `key`, or None on miss or expiry.
    ///
    /// Volatile tier first: a valid hit is returned directly, an expired
    /// entry is evicted and the lookup falls through. Durable tier next:
    /// a valid hit is promoted into the volatile tier before returning, an
    /// expired or unparseable entry is evicted. Other keys are never touched.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        if let Some(entry) = self.memory.get(key) {
            if entry.is_valid() {
                match serde_json::from_value(entry.data.clone()) {
                    Ok(value) => return Some(value),
                    Err(e) => {
                        warn!("Cache entry '{}' has unexpected shape, dropping: {}", key, e);
                        self.memory.remove(key);
                        self.disk.remove(&self.disk_key(key));
                        return None;
                    }
                }
            }
            debug!("Cache entry '{}' expired in memory", key);
            self.memory.remove(key);
        }

        let disk_key = self.disk_key(key);
        let raw = self.disk.read(&disk_key)?;

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Corrupt durable cache entry '{}', dropping: {}", key, e);
                self.disk.remove(&disk_key);
                return None;
            }
        };

        if !entry.is_valid() {
            debug!("Cache entry '{}' expired on disk", key);
            self.disk.remove(&disk_key);
            return None;
        }

        match serde_json::from_value(entry.data.clone()) {
            Ok(value) => {
                // Promote the durable hit so the next read stays in memory.
                self.memory.insert(key.to_string(), entry);
                Some(value)
            }
            Err(e) => {
                warn!("Cache entry '{}' has unexpected shape, dropping: {}", key, e);
                self.disk.remove(&disk_key);
                None
            }
        }
    }

    // == Remove ==
    /// Deletes `key` from both tiers. Idempotent.
    pub fn remove(&mut self, key: &str) {
        self.memory.remove(key);
        self.disk.remove(&self.disk_key(key));
    }

    // == Purge Expired ==
    /// Evicts every stale entry from both tiers.
    ///
    /// Returns the number of distinct keys evicted; a key stale in both
    /// tiers counts once. Durable entries that fail to parse are evicted
    /// too. Only keys under the cache prefix are touched on disk.
    pub fn purge_expired(&mut self) -> usize {
        let mut evicted: HashSet<String> = HashSet::new();

        let stale_memory: Vec<String> = self
            .memory
            .iter()
            .filter(|(_, entry)| !entry.is_valid())
            .map(|(key, _)| key.clone())
            .collect();

        for key in stale_memory {
            self.memory.remove(&key);
            evicted.insert(key);
        }

        for disk_key in self.disk.keys() {
            let Some(key) = disk_key.strip_prefix(CACHE_PREFIX) else {
                continue;
            };

            let stale = match self.disk.read(&disk_key) {
                Some(raw) => match serde_json::from_str::<CacheEntry>(&raw) {
                    Ok(entry) => !entry.is_valid(),
                    Err(_) => true,
                },
                None => false,
            };

            if stale {
                self.disk.remove(&disk_key);
                evicted.insert(key.to_string());
            }
        }

        evicted.len()
    }

    // == Clear ==
    /// Evicts everything from both tiers, leaving other durable keys alone.
    pub fn clear(&mut self) {
        self.memory.clear();
        for disk_key in self.disk.keys() {
            if disk_key.starts_with(CACHE_PREFIX) {
                self.disk.remove(&disk_key);
            }
        }
    }

    // == Stats ==
    /// Builds a read-only snapshot of both tiers.
    ///
    /// Malformed durable entries are skipped. Nothing is mutated or evicted,
    /// so stale entries still show up in the counts until purged.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::new();
        stats.memory_count = self.memory.len();

        let mut oldest: Option<(u64, String)> = None;
        let mut newest: Option<(u64, String)> = None;

        let mut track = |cached_at: u64, key: &str| {
            if oldest.as_ref().map_or(true, |(at, _)| cached_at < *at) {
                oldest = Some((cached_at, key.to_string()));
            }
            if newest.as_ref().map_or(true, |(at, _)| cached_at > *at) {
                newest = Some((cached_at, key.to_string()));
            }
        };

        for (key, entry) in &self.memory {
            track(entry.cached_at, key);
        }

        for disk_key in self.disk.keys() {
            let Some(key) = disk_key.strip_prefix(CACHE_PREFIX) else {
                continue;
            };
            let Some(raw) = self.disk.read(&disk_key) else {
                continue;
            };
            stats.total_size_bytes += raw.len();
            if let Ok(entry) = serde_json::from_str::<CacheEntry>(&raw) {
                stats.durable_count += 1;
                track(entry.cached_at, key);
            }
        }

        stats.oldest_key = oldest.map(|(_, key)| key);
        stats.newest_key = newest.map(|(_, key)| key);
        stats
    }

    // == Length ==
    /// Returns the number of entries in the volatile tier.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the volatile tier is empty.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_cache() -> (TieredCache, DiskStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let disk = DiskStore::new(temp_dir.path().to_path_buf());
        (TieredCache::new(disk.clone()), disk, temp_dir)
    }

    #[test]
    fn test_set_and_get_before_ttl() {
        let (mut cache, _disk, _dir) = create_test_cache();

        cache.set("greeting", &"hello".to_string(), Duration::from_secs(60));

        let value: Option<String> = cache.get("greeting");
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[test]
    fn test_get_missing_key() {
        let (mut cache, _disk, _dir) = create_test_cache();
        let value: Option<String> = cache.get("nonexistent");
        assert!(value.is_none());
    }

    #[test]
    fn test_expired_entry_is_evicted_from_both_tiers() {
        let (mut cache, disk, _dir) = create_test_cache();

        cache.set("stale", &1_u32, Duration::from_millis(0));

        let value: Option<u32> = cache.get("stale");
        assert!(value.is_none());
        assert!(cache.is_empty());
        assert!(disk.read("cache.stale").is_none());
    }

    #[test]
    fn test_write_lands_in_both_tiers() {
        let (mut cache, disk, _dir) = create_test_cache();

        cache.set("both", &42_u32, Duration::from_secs(60));

        assert_eq!(cache.len(), 1);
        assert!(disk.read("cache.both").is_some());
    }

    #[test]
    fn test_durable_hit_promotes_into_memory() {
        let temp_dir = TempDir::new().unwrap();
        let disk = DiskStore::new(temp_dir.path().to_path_buf());

        // First instance writes, second instance starts with a cold memory tier.
        let mut first = TieredCache::new(disk.clone());
        first.set("promoted", &"value".to_string(), Duration::from_secs(60));

        let mut second = TieredCache::new(disk);
        assert!(second.is_empty());

        let value: Option<String> = second.get("promoted");
        assert_eq!(value.as_deref(), Some("value"));
        assert_eq!(second.len(), 1, "Durable hit should be promoted");
    }

    #[test]
    fn test_corrupt_durable_entry_is_a_miss() {
        let (mut cache, disk, _dir) = create_test_cache();

        disk.write("cache.broken", "{not json").unwrap();
        disk.write("cache.fine", "ignored").unwrap();
        cache.set("fine", &"ok".to_string(), Duration::from_secs(60));

        let value: Option<String> = cache.get("broken");
        assert!(value.is_none());
        assert!(disk.read("cache.broken").is_none(), "Corrupt entry dropped");

        // Other keys are untouched by the miss.
        let fine: Option<String> = cache.get("fine");
        assert_eq!(fine.as_deref(), Some("ok"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut cache, disk, _dir) = create_test_cache();

        cache.set("key", &1_u32, Duration::from_secs(60));
        cache.remove("key");
        cache.remove("key");

        let value: Option<u32> = cache.get("key");
        assert!(value.is_none());
        assert!(disk.read("cache.key").is_none());
    }

    #[test]
    fn test_purge_expired_counts_and_preserves() {
        let (mut cache, _disk, _dir) = create_test_cache();

        cache.set("stale_a", &1_u32, Duration::from_millis(0));
        cache.set("stale_b", &2_u32, Duration::from_millis(0));
        cache.set("fresh", &3_u32, Duration::from_secs(60));

        let removed = cache.purge_expired();
        assert_eq!(removed, 2);

        let fresh: Option<u32> = cache.get("fresh");
        assert_eq!(fresh, Some(3));
        let stale: Option<u32> = cache.get("stale_a");
        assert!(stale.is_none());
    }

    #[test]
    fn test_purge_counts_key_once_across_tiers() {
        let (mut cache, _disk, _dir) = create_test_cache();

        // Entry is stale in memory and on disk; one key, one eviction.
        cache.set("stale", &1_u32, Duration::from_millis(0));

        assert_eq!(cache.purge_expired(), 1);
    }

    #[test]
    fn test_purge_evicts_unparseable_durable_entries() {
        let (mut cache, disk, _dir) = create_test_cache();

        disk.write("cache.garbage", "][").unwrap();

        assert_eq!(cache.purge_expired(), 1);
        assert!(disk.read("cache.garbage").is_none());
    }

    #[test]
    fn test_clear_leaves_foreign_keys_alone() {
        let (mut cache, disk, _dir) = create_test_cache();

        cache.set("a", &1_u32, Duration::from_secs(60));
        cache.set("b", &2_u32, Duration::from_secs(60));
        disk.write("cart", "[]").unwrap();

        cache.clear();

        assert!(cache.is_empty());
        assert!(disk.read("cache.a").is_none());
        assert!(disk.read("cache.b").is_none());
        assert_eq!(disk.read("cart").as_deref(), Some("[]"));
    }

    #[test]
    fn test_purge_leaves_foreign_keys_alone() {
        let (mut cache, disk, _dir) = create_test_cache();

        // Unparseable as a cache entry, but outside the cache namespace.
        disk.write("cart", "][").unwrap();

        assert_eq!(cache.purge_expired(), 0);
        assert!(disk.read("cart").is_some());
    }

    #[test]
    fn test_stats_snapshot() {
        let (mut cache, disk, _dir) = create_test_cache();

        cache.set("first", &1_u32, Duration::from_secs(60));
        std::thread::sleep(Duration::from_millis(5));
        cache.set("second", &2_u32, Duration::from_secs(60));
        disk.write("cache.malformed", "oops").unwrap();

        let stats = cache.stats();
        assert_eq!(stats.memory_count, 2);
        assert_eq!(stats.durable_count, 2, "Malformed entry skipped");
        assert!(stats.total_size_bytes > 0);
        assert_eq!(stats.oldest_key.as_deref(), Some("first"));
        assert_eq!(stats.newest_key.as_deref(), Some("second"));
    }

    #[test]
    fn test_stats_does_not_mutate() {
        let (mut cache, disk, _dir) = create_test_cache();

        cache.set("stale", &1_u32, Duration::from_millis(0));
        let _ = cache.stats();

        // Stale entry still present until a read or purge evicts it.
        assert_eq!(cache.len(), 1);
        assert!(disk.read("cache.stale").is_some());
    }

    #[test]
    fn test_overwrite_resets_ttl_payload() {
        let (mut cache, _disk, _dir) = create_test_cache();

        cache.set("key", &"v1".to_string(), Duration::from_secs(60));
        cache.set("key", &"v2".to_string(), Duration::from_secs(60));

        let value: Option<String> = cache.get("key");
        assert_eq!(value.as_deref(), Some("v2"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_wrong_type_reads_as_miss() {
        let (mut cache, _disk, _dir) = create_test_cache();

        cache.set("typed", &"string".to_string(), Duration::from_secs(60));

        let value: Option<u64> = cache.get("typed");
        assert!(value.is_none());
    }
}
