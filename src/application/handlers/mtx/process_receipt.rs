//! ProcessReceiptHandler - Idempotent grant of developer product receipts.
//!
//! The platform redelivers a receipt until it is answered with
//! `PurchaseGranted`, so the same purchase ID can arrive many times, even
//! concurrently. A purchase ID enters the receipt history in the same
//! document write as its grant, and `PurchaseGranted` is only returned once
//! that write has been saved.

use std::sync::Arc;

use crate::application::PlayerLocks;
use crate::domain::foundation::Timestamp;
use crate::domain::mtx::{Catalog, MtxEvent, PurchaseDecision, Receipt};
use crate::ports::{EventPublisher, PlayerDocument, PlayerSessions};

/// Command to process a receipt.
#[derive(Debug, Clone)]
pub struct ProcessReceiptCommand {
    pub receipt: Receipt,
}

/// Handler for developer product receipts.
pub struct ProcessReceiptHandler {
    sessions: Arc<dyn PlayerSessions>,
    catalog: Arc<Catalog>,
    locks: Arc<PlayerLocks>,
    publisher: Arc<dyn EventPublisher>,
    history_capacity: usize,
}

impl ProcessReceiptHandler {
    pub fn new(
        sessions: Arc<dyn PlayerSessions>,
        catalog: Arc<Catalog>,
        locks: Arc<PlayerLocks>,
        publisher: Arc<dyn EventPublisher>,
        history_capacity: usize,
    ) -> Self {
        Self {
            sessions,
            catalog,
            locks,
            publisher,
            history_capacity,
        }
    }

    pub async fn handle(&self, cmd: ProcessReceiptCommand) -> PurchaseDecision {
        let receipt = cmd.receipt;
        tracing::info!(
            purchase_id = %receipt.purchase_id,
            player_id = %receipt.player_id,
            product_id = %receipt.product_id,
            place_id = ?receipt.place_id_where_purchased,
            currency_spent = ?receipt.currency_spent,
            "processing receipt"
        );

        // 1. Resolve the session
        let Some(session) = self.sessions.resolve(receipt.player_id).await else {
            tracing::info!(player_id = %receipt.player_id, "player not in session, deferring receipt");
            return PurchaseDecision::NotProcessedYet;
        };

        // 2. Serialize with every other write for this player
        let _guard = self.locks.lock(receipt.player_id).await;

        let Some(data) = session.document.read() else {
            tracing::error!(
                player_id = %receipt.player_id,
                name = %session.name,
                "document not loaded, cannot process receipt"
            );
            return PurchaseDecision::NotProcessedYet;
        };

        // 3. Already granted: make sure it is durable, then acknowledge
        if data.has_processed_receipt(&receipt.purchase_id) {
            tracing::info!(purchase_id = %receipt.purchase_id, "receipt already granted");
            return self.save(&session.document, &receipt).await;
        }

        // 4. Grant
        match self.catalog.product(receipt.product_id) {
            Ok(product) => {
                let updated = data
                    .with_product_granted(product, Timestamp::now())
                    .with_receipt_recorded(receipt.purchase_id.clone(), self.history_capacity);

                // 5. Single whole-document replace
                session.document.write(updated);

                tracing::info!(
                    player_id = %receipt.player_id,
                    name = %session.name,
                    product_id = %product.id,
                    currency = product.currency,
                    "granted developer product"
                );
                self.publisher.publish(&MtxEvent::product_purchased(
                    receipt.player_id,
                    receipt.product_id,
                    receipt.purchase_id.clone(),
                ));
            }
            Err(err) => {
                tracing::warn!(
                    player_id = %receipt.player_id,
                    name = %session.name,
                    error = %err,
                    "attempted to purchase invalid product"
                );
            }
        }

        // 6. Acknowledge only after a durable save
        self.save(&session.document, &receipt).await
    }

    async fn save(
        &self,
        document: &Arc<dyn PlayerDocument>,
        receipt: &Receipt,
    ) -> PurchaseDecision {
        match document.save().await {
            Ok(()) => PurchaseDecision::PurchaseGranted,
            Err(err) => {
                tracing::warn!(
                    purchase_id = %receipt.purchase_id,
                    player_id = %receipt.player_id,
                    error = %err,
                    "save failed, receipt will be redelivered"
                );
                PurchaseDecision::NotProcessedYet
            }
        }
    }
}
