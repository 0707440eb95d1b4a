//! Catalog configuration
//!
//! The closed sets of game pass and product IDs the game recognizes.
//! Lists are easiest to provide through the TOML file:
//!
//! ```toml
//! [[catalog.game_passes]]
//! id = 1001
//! name = "VIP"
//!
//! [[catalog.products]]
//! id = 2001
//! name = "100 Coins"
//! currency = 100
//! ```

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::mtx::{Catalog, GamePassDefinition, ProductDefinition};

/// Catalog configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub game_passes: Vec<GamePassDefinition>,

    #[serde(default)]
    pub products: Vec<ProductDefinition>,
}

impl CatalogConfig {
    /// Build the domain catalog, rejecting duplicate IDs
    pub fn to_catalog(&self) -> Result<Catalog, ValidationError> {
        Catalog::new(self.game_passes.clone(), self.products.clone())
            .map_err(|e| ValidationError::InvalidCatalog(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_catalog().map(|_| ())
    }
}
