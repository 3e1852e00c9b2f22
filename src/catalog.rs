//! Catalog Client Module
//!
//! Thin wrapper around the external product API, used for cart hydration
//! and cache-backed product loads.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// == Product Details ==
/// Display fields for one product, as consumed by the cart and the
/// product endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// Primary image URL, if the product has any images
    pub image: Option<String>,
}

/// Response envelope returned by the backend: `{ "product": { ... } }`.
#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: ProductPayload,
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    name: String,
    price: f64,
    #[serde(default)]
    images: Vec<String>,
}

// == Catalog Error ==
/// Errors returned by the catalog backend.
///
/// Callers treat these as opaque beyond success/failure; the message is
/// logged, never parsed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection, timeout, or body decode)
    #[error("Catalog request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Catalog returned status {0} for product '{1}'")]
    UpstreamStatus(u16, String),
}

// == Catalog Client ==
/// Client for the product catalog REST API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Creates a client against the given API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client with a caller-supplied HTTP client.
    #[allow(dead_code)]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    // == Fetch Product ==
    /// Fetches display details for one product by id.
    ///
    /// Maps the backend's `{ product: { name, price, images } }` envelope
    /// down to [`ProductDetails`], keeping only the first image.
    pub async fn fetch_product(&self, product_id: &str) -> Result<ProductDetails, CatalogError> {
        let url = format!("{}/products/{}", self.base_url, product_id);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UpstreamStatus(
                status.as_u16(),
                product_id.to_string(),
            ));
        }

        let envelope: ProductEnvelope = response.json().await?;
        Ok(ProductDetails {
            name: envelope.product.name,
            price: envelope.product.price,
            image: envelope.product.images.into_iter().next(),
        })
    }
}
