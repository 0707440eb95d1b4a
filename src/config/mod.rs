//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional TOML file and from
//! environment variables with the `MTX` prefix; nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use mtx_entitlements::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Retrying marketplace calls {} times", config.marketplace.retry_attempts);
//! ```

mod catalog;
mod error;
mod logging;
mod marketplace;
mod receipts;
mod storage;

pub use catalog::CatalogConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use marketplace::MarketplaceConfig;
pub use receipts::ReceiptsConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the TOML configuration file
pub const CONFIG_FILE_ENV: &str = "MTX_CONFIG_FILE";

/// Configuration file read when `MTX_CONFIG_FILE` is unset
pub const DEFAULT_CONFIG_FILE: &str = "mtx.toml";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// (if catalog-less) configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Retry settings for marketplace calls
    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    /// Receipt idempotency settings
    #[serde(default)]
    pub receipts: ReceiptsConfig,

    /// Known game passes and products
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// File-backed document location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the configured file and the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads the TOML file named by `MTX_CONFIG_FILE` (default `mtx.toml`), if it exists
    /// 3. Overlays environment variables with `MTX` prefix
    /// 4. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `MTX__MARKETPLACE__RETRY_ATTEMPTS=10` -> `marketplace.retry_attempts = 10`
    /// - `MTX__STORAGE__DATA_DIR=/var/lib/mtx` -> `storage.data_dir = /var/lib/mtx`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is malformed or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let path = std::env::var(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path plus the environment
    ///
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("MTX").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Rejects zero retry attempts, a zero history capacity and duplicate
    /// catalog IDs.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.marketplace.validate()?;
        self.receipts.validate()?;
        self.catalog.validate()?;
        Ok(())
    }
}
