//! Core types for GoMarketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod item;
pub mod price;

pub use id::{ProductId, ProductIdError};
pub use item::CartItem;
pub use price::Price;
