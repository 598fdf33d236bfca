//! GoMarketplace Core - Shared types library.
//!
//! This crate provides common types used across all GoMarketplace components:
//! - `cart` - Cart state manager and snapshot persistence
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! machinery. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe product IDs and prices, plus
//!   the [`types::CartItem`] line-item record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
