//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Snapshot key in the key-value store
//!   (default: `@GoMarketplace:productsCart`)
//! - `CART_STORAGE_DIR` - Directory for file-backed snapshot storage
//!   (default: the OS data directory under `go-marketplace`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Canonical snapshot key.
///
/// Historical builds disagreed on the casing of the namespace prefix; this
/// casing is the canonical one and the other is not read.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:productsCart";

const ENV_STORAGE_KEY: &str = "CART_STORAGE_KEY";
const ENV_STORAGE_DIR: &str = "CART_STORAGE_DIR";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),
}

/// Cart store configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Key under which the cart snapshot is stored.
    pub storage_key: String,
    /// Directory for file-backed snapshot storage.
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            storage_dir: default_storage_dir(),
        }
    }
}

impl CartConfig {
    /// Create a configuration with an explicit storage key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidStorageKey` if the key is empty or
    /// contains whitespace.
    pub fn new(storage_key: impl Into<String>, storage_dir: PathBuf) -> Result<Self, ConfigError> {
        let storage_key = storage_key.into();
        validate_storage_key(&storage_key)?;
        Ok(Self {
            storage_key,
            storage_dir,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults documented in the module
    /// header.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but not valid unicode, or if
    /// the storage key fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_key = match optional_env(ENV_STORAGE_KEY)? {
            Some(key) => key,
            None => DEFAULT_STORAGE_KEY.to_owned(),
        };
        validate_storage_key(&storage_key)?;

        let storage_dir = optional_env(ENV_STORAGE_DIR)?
            .map_or_else(default_storage_dir, PathBuf::from);

        Ok(Self {
            storage_key,
            storage_dir,
        })
    }
}

/// Read an optional environment variable.
fn optional_env(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnvVar(
            name.to_owned(),
            "not valid unicode".to_owned(),
        )),
    }
}

/// Validate a snapshot storage key.
pub(crate) fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidStorageKey(
            "key cannot be empty".to_owned(),
        ));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidStorageKey(
            "key cannot contain whitespace".to_owned(),
        ));
    }
    Ok(())
}

/// Default snapshot directory: the OS data directory, falling back to the
/// temp directory when the platform has none.
fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("go-marketplace")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_canonical_key() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "@GoMarketplace:productsCart");
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = CartConfig::new("", PathBuf::from("/tmp"));
        assert!(matches!(result, Err(ConfigError::InvalidStorageKey(_))));
    }

    #[test]
    fn test_whitespace_key_rejected() {
        let result = CartConfig::new("cart key", PathBuf::from("/tmp"));
        assert!(matches!(result, Err(ConfigError::InvalidStorageKey(_))));
    }

    #[test]
    fn test_explicit_key_accepted() {
        let config =
            CartConfig::new("@GoMarketplace:test", PathBuf::from("/tmp")).expect("valid config");
        assert_eq!(config.storage_key, "@GoMarketplace:test");
    }
}
