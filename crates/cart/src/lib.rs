//! GoMarketplace Cart - cart state manager with snapshot persistence.
//!
//! This crate owns the authoritative in-memory cart state and mediates all
//! reads and writes to it:
//!
//! - [`CartStore`] holds the ordered list of [`CartItem`]s and exposes the
//!   add/increment/decrement operations
//! - every mutation publishes the new state to subscribers and hands the
//!   exact post-mutation snapshot to a background writer
//! - snapshots are persisted through the [`SnapshotStorage`] key-value
//!   interface so the cart survives restarts
//!
//! Persistence is best-effort: a failed write is logged and the in-memory
//! state stays authoritative for the session. A snapshot that cannot be
//! deserialized on load is discarded and the cart starts empty.
//!
//! [`CartItem`]: go_marketplace_core::CartItem

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError};
pub use store::CartStore;
