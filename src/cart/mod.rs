//! Cart Module
//!
//! Ordered line items with derived totals, durable persistence, and lazy
//! hydration of product display fields from the catalog backend.

mod hydrate;
mod line;
mod store;

// Re-export public types
pub use hydrate::load_cart_details;
pub use line::CartLine;
pub use store::CartStore;

// == Public Constants ==
/// Fixed durable-store key holding the serialized line list.
pub const CART_STORAGE_KEY: &str = "cart";
