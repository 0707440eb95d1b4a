//! Bounded log of purchase IDs that have already been granted.
//!
//! Oldest entries sit at the front. Inserting into a full log evicts from
//! the front until there is room, so the log never exceeds its capacity.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::domain::foundation::PurchaseId;

/// Default number of purchase IDs retained per player.
pub const DEFAULT_RECEIPT_HISTORY_CAPACITY: usize = 50;

/// FIFO log of granted purchase IDs.
///
/// Serialized as a plain array, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptHistory(VecDeque<PurchaseId>);

impl ReceiptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the purchase has already been recorded.
    pub fn contains(&self, purchase_id: &PurchaseId) -> bool {
        self.0.contains(purchase_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PurchaseId> {
        self.0.iter()
    }

    /// Appends a purchase ID, evicting the oldest entries beyond `capacity`.
    ///
    /// Callers check `contains` first; this does not deduplicate.
    pub fn push_bounded(&mut self, purchase_id: PurchaseId, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while self.0.len() >= capacity {
            self.0.pop_front();
        }
        self.0.push_back(purchase_id);
    }
}

impl FromIterator<PurchaseId> for ReceiptHistory {
    fn from_iter<I: IntoIterator<Item = PurchaseId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
