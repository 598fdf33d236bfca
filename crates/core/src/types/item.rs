//! Cart line-item record.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product entry with an associated quantity in the user's in-progress
/// order.
///
/// `title`, `image_url`, and `price` are display data owned by the catalog;
/// the cart treats them as opaque and refreshes them whenever the product is
/// added again. `quantity` is maintained by the cart store and is always at
/// least 1 while the item is present.
///
/// The serialized form is the snapshot wire format:
/// `{ "id", "title", "image_url", "price", "quantity" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Unique product identifier, stable across the item's lifetime.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Opaque image reference.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Number of units in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Total price for this line (`price × quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}
