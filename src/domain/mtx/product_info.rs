//! Marketplace metadata for products and game passes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which kind of asset a metadata lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoType {
    GamePass,
    Product,
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoType::GamePass => write!(f, "GamePass"),
            InfoType::Product => write!(f, "Product"),
        }
    }
}

/// Platform-supplied metadata; treated as immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    pub target_id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price in platform currency; `None` when not for sale.
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub is_for_sale: bool,
    #[serde(default)]
    pub icon_image_asset_id: Option<u64>,
}

impl ProductInfo {
    pub fn new(target_id: u64, name: impl Into<String>) -> Self {
        Self {
            target_id,
            name: name.into(),
            description: None,
            price: None,
            is_for_sale: false,
            icon_image_asset_id: None,
        }
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self.is_for_sale = true;
        self
    }
}
