//! Response DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cart::{CartLine, CartStore};
use crate::catalog::ProductDetails;

/// Response body for all cart endpoints
///
/// Carries the full line list so a consumer can see which lines are still
/// unpriced; `total_price` is best-effort until every line is hydrated.
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    /// Current cart lines in insertion order
    pub lines: Vec<CartLine>,
    /// Total units across all lines
    pub total_items: u32,
    /// Total price; unhydrated lines contribute zero
    pub total_price: f64,
}

impl CartResponse {
    /// Snapshots the given cart store.
    pub fn from_store(cart: &CartStore) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

/// Response body for the product endpoint (GET /products/:id)
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    /// The requested product id
    pub product_id: String,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Primary image URL, if any
    pub image: Option<String>,
}

impl ProductResponse {
    /// Creates a ProductResponse from fetched or cached details.
    pub fn new(product_id: impl Into<String>, details: ProductDetails) -> Self {
        Self {
            product_id: product_id.into(),
            name: details.name,
            price: details.price,
            image: details.image,
        }
    }
}

/// Response body for the manual sweep endpoint (DELETE /cache/expired)
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResponse {
    /// Number of distinct keys evicted
    pub removed: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    #[allow(dead_code)]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
