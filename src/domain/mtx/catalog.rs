//! Catalog of game passes and developer products the game recognizes.
//!
//! Both sets are closed: an ID that is not listed here is never checked
//! against the platform, never stored and never granted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{GamePassId, ProductId};

use super::MtxError;

/// A game pass sold by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePassDefinition {
    pub id: GamePassId,
    pub name: String,
}

/// A developer product sold by the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDefinition {
    pub id: ProductId,
    pub name: String,
    /// In-game currency credited per purchase.
    #[serde(default)]
    pub currency: u64,
}

/// Closed sets of valid game pass and product IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    game_passes: BTreeMap<GamePassId, GamePassDefinition>,
    products: BTreeMap<ProductId, ProductDefinition>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate IDs.
    pub fn new(
        game_passes: impl IntoIterator<Item = GamePassDefinition>,
        products: impl IntoIterator<Item = ProductDefinition>,
    ) -> Result<Self, MtxError> {
        let mut catalog = Self::default();

        for pass in game_passes {
            if catalog.game_passes.contains_key(&pass.id) {
                return Err(MtxError::DuplicateGamePass(pass.id));
            }
            catalog.game_passes.insert(pass.id, pass);
        }

        for product in products {
            if catalog.products.contains_key(&product.id) {
                return Err(MtxError::DuplicateProduct(product.id));
            }
            catalog.products.insert(product.id, product);
        }

        Ok(catalog)
    }

    /// All known game pass IDs, in ascending order.
    pub fn game_pass_ids(&self) -> impl Iterator<Item = GamePassId> + '_ {
        self.game_passes.keys().copied()
    }

    /// All known product IDs, in ascending order.
    pub fn product_ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.products.keys().copied()
    }

    pub fn contains_game_pass(&self, id: GamePassId) -> bool {
        self.game_passes.contains_key(&id)
    }

    pub fn contains_product(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// Looks up a game pass, failing for IDs outside the catalog.
    pub fn game_pass(&self, id: GamePassId) -> Result<&GamePassDefinition, MtxError> {
        self.game_passes
            .get(&id)
            .ok_or(MtxError::UnknownGamePass(id))
    }

    /// Looks up a product, failing for IDs outside the catalog.
    pub fn product(&self, id: ProductId) -> Result<&ProductDefinition, MtxError> {
        self.products.get(&id).ok_or(MtxError::UnknownProduct(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(id: u64, name: &str) -> GamePassDefinition {
        GamePassDefinition {
            id: GamePassId::new(id),
            name: name.to_string(),
        }
    }

    fn product(id: u64, currency: u64) -> ProductDefinition {
        ProductDefinition {
            id: ProductId::new(id),
            name: format!("Coins x{}", currency),
            currency,
        }
    }

    #[test]
    fn lists_game_passes_in_ascending_order() {
        let catalog = Catalog::new(vec![pass(30, "VIP"), pass(10, "Radio")], vec![]).unwrap();

        let ids: Vec<u64> = catalog.game_pass_ids().map(|id| id.as_u64()).collect();
        assert_eq!(ids, vec![10, 30]);
    }

    #[test]
    fn rejects_duplicate_game_pass() {
        let result = Catalog::new(vec![pass(10, "VIP"), pass(10, "VIP again")], vec![]);
        assert_eq!(result, Err(MtxError::DuplicateGamePass(GamePassId::new(10))));
    }

    #[test]
    fn rejects_duplicate_product() {
        let result = Catalog::new(vec![], vec![product(5, 100), product(5, 200)]);
        assert_eq!(result, Err(MtxError::DuplicateProduct(ProductId::new(5))));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let catalog = Catalog::new(vec![pass(10, "VIP")], vec![product(5, 100)]).unwrap();

        assert!(catalog.game_pass(GamePassId::new(11)).is_err());
        assert!(catalog.product(ProductId::new(6)).is_err());
        assert!(!catalog.contains_game_pass(GamePassId::new(11)));
        assert!(!catalog.contains_product(ProductId::new(6)));
    }

    #[test]
    fn known_product_carries_currency_grant() {
        let catalog = Catalog::new(vec![], vec![product(5, 250)]).unwrap();
        assert_eq!(catalog.product(ProductId::new(5)).unwrap().currency, 250);
    }

    #[test]
    fn product_currency_defaults_to_zero() {
        let def: ProductDefinition =
            serde_json::from_str(r#"{"id": 5, "name": "Supporter"}"#).unwrap();
        assert_eq!(def.currency, 0);
    }
}
