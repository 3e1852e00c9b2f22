//! Request DTOs for the storefront API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for adding a line to the cart (POST /cart/items)
///
/// # Fields
/// - `product_id`: The product to add
/// - `quantity`: Number of units, must be at least 1
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    /// The product identifier
    pub product_id: String,
    /// Units to add; merged into an existing line for the same product
    pub quantity: u32,
}

impl AddItemRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.product_id.is_empty() {
            return Some("Product id cannot be empty".to_string());
        }
        if self.quantity == 0 {
            return Some("Quantity must be at least 1".to_string());
        }
        None
    }
}

/// Request body for setting a line's quantity (PUT /cart/items/:product_id)
///
/// A quantity of 0 removes the line.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuantityRequest {
    /// The new quantity; 0 removes the line
    pub quantity: u32,
}
