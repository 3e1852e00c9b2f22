//! API Module
//!
//! HTTP handlers and routing for the storefront REST API.
//!
//! # Endpoints
//! - `GET /cart` - Current cart with derived totals
//! - `POST /cart/items` - Add units of a product
//! - `PUT /cart/items/:product_id` - Set a line's quantity
//! - `DELETE /cart/items/:product_id` - Remove a line
//! - `DELETE /cart` - Clear the cart
//! - `POST /cart/hydrate` - Fetch missing display fields for cart lines
//! - `GET /products/:id` - Cache-backed product lookup
//! - `GET /cache/stats` - Cache usage snapshot
//! - `DELETE /cache/expired` - Manual expired-entry sweep
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
