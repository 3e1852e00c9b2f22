//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::CACHE_SCHEMA_VERSION;

// == Cache Entry ==
/// Represents a single cache entry with its payload and expiry metadata.
///
/// Entries are stored as-is in the volatile tier and JSON-serialized into
/// the durable tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload (type-erased JSON)
    pub data: Value,
    /// Creation timestamp (Unix milliseconds)
    pub cached_at: u64,
    /// Maximum age in milliseconds before the entry is stale
    pub max_age: u64,
    /// Schema version the entry was written under
    pub version: String,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time and schema version.
    ///
    /// # Arguments
    /// * `data` - The payload to store
    /// * `max_age_ms` - TTL in milliseconds
    pub fn new(data: Value, max_age_ms: u64) -> Self {
        Self {
            data,
            cached_at: current_timestamp_ms(),
            max_age: max_age_ms,
            version: CACHE_SCHEMA_VERSION.to_string(),
        }
    }

    // == Is Valid ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry is stale once its full max-age has
    /// elapsed, i.e. valid iff `now - cached_at < max_age`. An entry written
    /// under a different schema version is never valid, so a version bump
    /// flushes old payloads lazily on read.
    pub fn is_valid(&self) -> bool {
        self.version == CACHE_SCHEMA_VERSION && self.age_ms() < self.max_age
    }

    /// Returns the entry's age in milliseconds.
    ///
    /// Saturates at zero if the clock moved backwards since creation.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.cached_at)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
