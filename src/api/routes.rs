//! API Routes
//!
//! Configures the Axum router with all storefront endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_item_handler, cache_stats_handler, clear_cart_handler, get_cart_handler,
    get_product_handler, health_handler, hydrate_cart_handler, purge_expired_handler,
    remove_item_handler, update_item_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /cart` - Current cart with derived totals
/// - `POST /cart/items` - Add units of a product (merges by product id)
/// - `PUT /cart/items/:product_id` - Set a line's quantity (0 removes)
/// - `DELETE /cart/items/:product_id` - Remove a line
/// - `DELETE /cart` - Clear the cart
/// - `POST /cart/hydrate` - Fetch missing display fields for cart lines
/// - `GET /products/:id` - Cache-backed product lookup
/// - `GET /cache/stats` - Cache usage snapshot
/// - `DELETE /cache/expired` - Manual expired-entry sweep
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/cart", get(get_cart_handler).delete(clear_cart_handler))
        .route("/cart/items", post(add_item_handler))
        .route(
            "/cart/items/:product_id",
            put(update_item_handler).delete(remove_item_handler),
        )
        .route("/cart/hydrate", post(hydrate_cart_handler))
        .route("/products/:id", get(get_product_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/expired", delete(purge_expired_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
