//! Cart Line Module
//!
//! One product-id/quantity pair within the cart, optionally enriched with
//! display fields once hydrated from the catalog.

use serde::{Deserialize, Serialize};

// == Cart Line ==
/// A single cart line.
///
/// Lines start unhydrated (id and quantity only); `name`, `price` and
/// `image` are filled in later by hydration and persisted as-is. Hydrated
/// fields are display data and can always be re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier, unique within the cart
    pub product_id: String,
    /// Number of units, always positive once stored
    pub quantity: u32,
    /// Display name, set on hydration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unit price, set on hydration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Primary image URL, set on hydration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartLine {
    /// Creates an unhydrated line.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            name: None,
            price: None,
            image: None,
        }
    }

    /// Returns true once name and price are both present.
    pub fn is_hydrated(&self) -> bool {
        self.name.is_some() && self.price.is_some()
    }

    /// Line subtotal; an unhydrated line contributes zero.
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.price.unwrap_or(0.0)
    }
}
