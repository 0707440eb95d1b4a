//! Purchase receipts and the decision returned to the platform.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PlayerId, ProductId, PurchaseId};

/// Platform-issued record of a one-time purchase.
///
/// The platform redelivers the same receipt (same `purchase_id`) until it
/// is acknowledged with `PurchaseDecision::PurchaseGranted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub purchase_id: PurchaseId,
    pub player_id: PlayerId,
    pub product_id: ProductId,
    /// Place the purchase was made in; informational only.
    #[serde(default)]
    pub place_id_where_purchased: Option<u64>,
    /// Amount the player paid; informational only.
    #[serde(default)]
    pub currency_spent: Option<u64>,
}

impl Receipt {
    pub fn new(purchase_id: PurchaseId, player_id: PlayerId, product_id: ProductId) -> Self {
        Self {
            purchase_id,
            player_id,
            product_id,
            place_id_where_purchased: None,
            currency_spent: None,
        }
    }
}

/// Decision returned for a receipt.
///
/// `NotProcessedYet` is never terminal: the platform redelivers later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseDecision {
    PurchaseGranted,
    NotProcessedYet,
}

impl PurchaseDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, PurchaseDecision::PurchaseGranted)
    }
}

impl fmt::Display for PurchaseDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseDecision::PurchaseGranted => write!(f, "PurchaseGranted"),
            PurchaseDecision::NotProcessedYet => write!(f, "NotProcessedYet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_platform_receipt() {
        let receipt: Receipt = serde_json::from_str(
            r#"{
                "purchaseId": "a1b2",
                "playerId": 1001,
                "productId": 500,
                "currencySpent": 25
            }"#,
        )
        .unwrap();

        assert_eq!(receipt.purchase_id.as_str(), "a1b2");
        assert_eq!(receipt.player_id, PlayerId::new(1001));
        assert_eq!(receipt.product_id, ProductId::new(500));
        assert_eq!(receipt.currency_spent, Some(25));
        assert_eq!(receipt.place_id_where_purchased, None);
    }

    #[test]
    fn blank_purchase_id_is_rejected_on_deserialize() {
        let receipt: Result<Receipt, _> = serde_json::from_str(
            r#"{"purchaseId": "", "playerId": 1, "productId": 2}"#,
        );
        assert!(receipt.is_err());
    }

    #[test]
    fn decision_reports_granted() {
        assert!(PurchaseDecision::PurchaseGranted.is_granted());
        assert!(!PurchaseDecision::NotProcessedYet.is_granted());
        assert_eq!(PurchaseDecision::NotProcessedYet.to_string(), "NotProcessedYet");
    }
}
