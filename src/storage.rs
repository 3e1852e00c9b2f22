//! Durable Key/Value Store
//!
//! String-keyed, string-valued persistence backing both cache tiers and the
//! cart. Each key maps to one JSON file under the data directory; keys are
//! percent-encoded so arbitrary strings are filesystem-safe.

use std::fs;
use std::io;
use std::path::PathBuf;

// == Disk Store ==
/// Durable string-to-string store, one file per key.
///
/// Cloning is cheap (shares the directory path); the cache and the cart
/// each hold a clone of the same store and avoid collisions by key
/// convention (the cache prefixes its keys, the cart uses a fixed key).
#[derive(Debug, Clone)]
pub struct DiskStore {
    /// Directory where entry files are stored
    dir: PathBuf,
}

impl DiskStore {
    // == Constructor ==
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first write, not here.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the file path backing a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }

    /// Ensures the data directory exists.
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    // == Read ==
    /// Reads the value stored under `key`.
    ///
    /// A missing or unreadable file is a miss, never an error.
    pub fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.entry_path(key)).ok()
    }

    // == Write ==
    /// Writes `value` under `key`, creating the data directory if needed.
    pub fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.ensure_dir()?;
        fs::write(self.entry_path(key), value)
    }

    // == Remove ==
    /// Deletes the entry for `key`. Idempotent: removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.entry_path(key));
    }

    // == Keys ==
    /// Lists every key currently stored, decoded back to its original form.
    ///
    /// Files that are not `.json` entries or whose names fail to decode are
    /// skipped.
    pub fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| {
                let name = entry.ok()?.file_name().into_string().ok()?;
                let encoded = name.strip_suffix(".json")?;
                decode_key(encoded)
            })
            .collect()
    }
}

// == Key Encoding ==
/// Percent-encodes every byte outside `[A-Za-z0-9._-]`.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Reverses `encode_key`. Returns None for malformed escapes.
fn decode_key(encoded: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(encoded.len());
    let mut chars = encoded.bytes();
    while let Some(byte) = chars.next() {
        if byte == b'%' {
            let hi = chars.next()?;
            let lo = chars.next()?;
            let hex = [hi, lo];
            let hex = std::str::from_utf8(&hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}
