//! Persisted per-player document.
//!
//! Documents are immutable values. Every update goes through a `with_*`
//! builder that returns a fresh document, leaving the snapshot other readers
//! hold untouched. The new value is then handed to the document store as a
//! single whole-document replace.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{GamePassId, ProductId, PurchaseId, Timestamp};

use super::{ProductDefinition, ReceiptHistory};

/// Root persisted document for a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    #[serde(default)]
    pub balance: PlayerBalance,
    #[serde(default)]
    pub mtx: PlayerMtx,
}

/// Spendable in-game balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBalance {
    pub currency: u64,
}

/// Monetization state of a player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMtx {
    /// Passes confirmed owned, with their active flag.
    #[serde(default)]
    pub game_passes: BTreeMap<GamePassId, GamePassData>,

    /// Purchase bookkeeping per developer product.
    #[serde(default)]
    pub products: BTreeMap<ProductId, ProductData>,

    /// Purchase IDs already granted, oldest first.
    #[serde(default)]
    pub receipt_history: ReceiptHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePassData {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub purchase_count: u32,
    pub last_purchased_at: Option<Timestamp>,
}

impl PlayerData {
    /// True if the pass has a record at all, active or not.
    pub fn owns_game_pass(&self, id: GamePassId) -> bool {
        self.mtx.game_passes.contains_key(&id)
    }

    /// True only for an owned pass whose active flag is set.
    pub fn is_game_pass_active(&self, id: GamePassId) -> bool {
        self.mtx
            .game_passes
            .get(&id)
            .map(|pass| pass.active)
            .unwrap_or(false)
    }

    pub fn has_processed_receipt(&self, purchase_id: &PurchaseId) -> bool {
        self.mtx.receipt_history.contains(purchase_id)
    }

    /// Returns a copy with the pass marked owned and active.
    pub fn with_game_pass_owned(&self, id: GamePassId) -> Self {
        let mut next = self.clone();
        next.mtx.game_passes.insert(id, GamePassData { active: true });
        next
    }

    /// Returns a copy with one purchase of `product` credited.
    pub fn with_product_granted(&self, product: &ProductDefinition, at: Timestamp) -> Self {
        let mut next = self.clone();
        next.balance.currency = next.balance.currency.saturating_add(product.currency);

        let record = next
            .mtx
            .products
            .entry(product.id)
            .or_insert(ProductData {
                purchase_count: 0,
                last_purchased_at: None,
            });
        record.purchase_count = record.purchase_count.saturating_add(1);
        record.last_purchased_at = Some(at);

        next
    }

    /// Returns a copy with `purchase_id` appended to the bounded receipt history.
    pub fn with_receipt_recorded(&self, purchase_id: PurchaseId, capacity: usize) -> Self {
        let mut next = self.clone();
        next.mtx.receipt_history.push_bounded(purchase_id, capacity);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mtx::DEFAULT_RECEIPT_HISTORY_CAPACITY;

    fn coins(currency: u64) -> ProductDefinition {
        ProductDefinition {
            id: ProductId::new(500),
            name: "Coins".to_string(),
            currency,
        }
    }

    #[test]
    fn unknown_pass_is_inactive() {
        let data = PlayerData::default();
        assert!(!data.owns_game_pass(GamePassId::new(1)));
        assert!(!data.is_game_pass_active(GamePassId::new(1)));
    }

    #[test]
    fn owned_pass_can_be_inactive() {
        let mut data = PlayerData::default();
        data.mtx
            .game_passes
            .insert(GamePassId::new(1), GamePassData { active: false });

        assert!(data.owns_game_pass(GamePassId::new(1)));
        assert!(!data.is_game_pass_active(GamePassId::new(1)));
    }

    #[test]
    fn with_game_pass_owned_leaves_original_untouched() {
        let original = PlayerData::default();
        let updated = original.with_game_pass_owned(GamePassId::new(7));

        assert!(updated.is_game_pass_active(GamePassId::new(7)));
        assert!(!original.owns_game_pass(GamePassId::new(7)));
    }

    #[test]
    fn with_product_granted_credits_currency_and_counts() {
        let at = Timestamp::now();
        let data = PlayerData::default()
            .with_product_granted(&coins(100), at)
            .with_product_granted(&coins(100), at);

        assert_eq!(data.balance.currency, 200);
        let record = data.mtx.products.get(&ProductId::new(500)).unwrap();
        assert_eq!(record.purchase_count, 2);
        assert_eq!(record.last_purchased_at, Some(at));
    }

    #[test]
    fn with_receipt_recorded_is_copy_on_write() {
        let purchase = PurchaseId::new("p-1").unwrap();
        let original = PlayerData::default();
        let updated =
            original.with_receipt_recorded(purchase.clone(), DEFAULT_RECEIPT_HISTORY_CAPACITY);

        assert!(updated.has_processed_receipt(&purchase));
        assert!(!original.has_processed_receipt(&purchase));
    }

    #[test]
    fn deserializes_document_with_missing_sections() {
        let data: PlayerData = serde_json::from_str(r#"{"balance": {"currency": 3}}"#).unwrap();
        assert_eq!(data.balance.currency, 3);
        assert!(data.mtx.game_passes.is_empty());
        assert!(data.mtx.receipt_history.is_empty());
    }

    #[test]
    fn document_round_trips_through_json() {
        let data = PlayerData::default()
            .with_game_pass_owned(GamePassId::new(42))
            .with_product_granted(&coins(10), Timestamp::now())
            .with_receipt_recorded(PurchaseId::new("p-9").unwrap(), 50);

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"receiptHistory\":[\"p-9\"]"));
        let back: PlayerData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }
}
