//! Integration tests for GoMarketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_operations` - Operation sequences against in-memory storage
//! - `cart_persistence` - Restart round-trips and corruption recovery
//!   against file-backed storage
//!
//! This crate's library only holds shared fixtures; the tests live in
//! `tests/`.

use std::path::PathBuf;

use go_marketplace_cart::CartConfig;
use go_marketplace_core::{CartItem, Price, ProductId};

/// Snapshot key used by every test, distinct from the production default.
pub const TEST_STORAGE_KEY: &str = "@GoMarketplace:testCart";

/// Build a cart configuration pointing at `storage_dir`.
///
/// # Panics
///
/// Panics if the test key fails validation; that is a bug in the fixtures.
#[must_use]
pub fn test_config(storage_dir: impl Into<PathBuf>) -> CartConfig {
    CartConfig::new(TEST_STORAGE_KEY, storage_dir.into()).expect("test storage key is valid")
}

/// Build a catalog item with quantity 1 and a derived image URL.
#[must_use]
pub fn catalog_item(id: &str, title: &str, cents: i64) -> CartItem {
    CartItem {
        id: ProductId::new(id),
        title: title.to_owned(),
        image_url: format!("https://cdn.example.com/{id}.png"),
        price: Price::from_cents(cents),
        quantity: 1,
    }
}
