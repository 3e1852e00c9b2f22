//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the durable store's entry files
    pub data_dir: PathBuf,
    /// Base URL of the product catalog API
    pub catalog_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// TTL in seconds for cached product payloads
    pub product_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STOREFRONT_DATA_DIR` - Durable store directory (default: platform data dir)
    /// - `CATALOG_BASE_URL` - Catalog API base URL (default: http://localhost:4000/api)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Expired-entry sweep frequency in seconds (default: 60)
    /// - `PRODUCT_TTL` - Cached product TTL in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("STOREFRONT_DATA_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or_else(default_data_dir),
            catalog_base_url: env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/api".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            product_ttl: env::var("PRODUCT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_base_url: "http://localhost:4000/api".to_string(),
            server_port: 3000,
            sweep_interval: 60,
            product_ttl: 300,
        }
    }
}

/// Platform data directory for the service, with a relative fallback for
/// environments without a home directory.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "storefront")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./storefront-data"))
}
