//! API Handlers
//!
//! HTTP request handlers for each storefront endpoint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{CacheStats, TieredCache};
use crate::cart::{load_cart_details, CartStore};
use crate::catalog::{CatalogClient, ProductDetails};
use crate::error::{Result, StoreError};
use crate::models::{
    AddItemRequest, CartResponse, HealthResponse, ProductResponse, PurgeResponse,
    UpdateQuantityRequest,
};
use crate::storage::DiskStore;

/// Application state shared across all handlers.
///
/// Everything is constructed explicitly by the composition root and shared
/// behind Arc<RwLock<>>; there are no process-wide globals, so tests build
/// a fresh state per case.
#[derive(Clone)]
pub struct AppState {
    /// Tiered TTL cache for catalog payloads
    pub cache: Arc<RwLock<TieredCache>>,
    /// The cart
    pub cart: Arc<RwLock<CartStore>>,
    /// Catalog backend client
    pub catalog: CatalogClient,
    /// TTL applied to cached product payloads
    pub product_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState from its explicitly constructed parts.
    pub fn new(
        cache: TieredCache,
        cart: CartStore,
        catalog: CatalogClient,
        product_ttl: Duration,
    ) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            cart: Arc::new(RwLock::new(cart)),
            catalog,
            product_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache and the cart share one durable store under the configured
    /// data directory, kept apart by key convention.
    pub fn from_config(config: &crate::config::Config) -> Self {
        let disk = DiskStore::new(config.data_dir.clone());
        let cache = TieredCache::new(disk.clone());
        let cart = CartStore::open(disk);
        let catalog = CatalogClient::new(config.catalog_base_url.clone());
        Self::new(cache, cart, catalog, Duration::from_secs(config.product_ttl))
    }
}

/// Returns the cache key for a product payload.
fn product_cache_key(product_id: &str) -> String {
    format!("product:{}", product_id)
}

// == Cart Handlers ==

/// Handler for GET /cart
pub async fn get_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.read().await;
    Json(CartResponse::from_store(&cart))
}

/// Handler for POST /cart/items
///
/// Adds units of a product; an existing line is merged by incrementing
/// its quantity.
pub async fn add_item_handler(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(StoreError::InvalidRequest(error_msg));
    }

    let mut cart = state.cart.write().await;
    cart.add_item(&req.product_id, req.quantity);

    Ok(Json(CartResponse::from_store(&cart)))
}

/// Handler for PUT /cart/items/:product_id
///
/// Sets a line's quantity directly; 0 removes the line. Idempotent over
/// absent products.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Json<CartResponse> {
    let mut cart = state.cart.write().await;
    cart.update_quantity(&product_id, req.quantity);

    Json(CartResponse::from_store(&cart))
}

/// Handler for DELETE /cart/items/:product_id
pub async fn remove_item_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<CartResponse> {
    let mut cart = state.cart.write().await;
    cart.remove_item(&product_id);

    Json(CartResponse::from_store(&cart))
}

/// Handler for DELETE /cart
pub async fn clear_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let mut cart = state.cart.write().await;
    cart.clear();

    Json(CartResponse::from_store(&cart))
}

/// Handler for POST /cart/hydrate
///
/// Runs a hydration pass and returns the possibly partially hydrated
/// cart; per-line fetch failures do not fail the request.
pub async fn hydrate_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    load_cart_details(&state.cart, &state.catalog).await;

    let cart = state.cart.read().await;
    Json(CartResponse::from_store(&cart))
}

// == Product Handler ==

/// Handler for GET /products/:id
///
/// Serves the product from the cache when possible; on a miss, fetches it
/// from the catalog and caches the payload under the configured TTL.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductResponse>> {
    let key = product_cache_key(&product_id);

    // Write lock even on the read path: a hit may promote or evict.
    {
        let mut cache = state.cache.write().await;
        if let Some(details) = cache.get::<ProductDetails>(&key) {
            return Ok(Json(ProductResponse::new(product_id, details)));
        }
    }

    let details = state.catalog.fetch_product(&product_id).await?;

    let mut cache = state.cache.write().await;
    cache.set(&key, &details, state.product_ttl);

    Ok(Json(ProductResponse::new(product_id, details)))
}

// == Cache Handlers ==

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for DELETE /cache/expired
///
/// Manual sweep; returns the number of evicted keys.
pub async fn purge_expired_handler(State(state): State<AppState>) -> Json<PurgeResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.purge_expired();

    Json(PurgeResponse { removed })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
