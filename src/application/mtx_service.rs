//! MtxService - Inbound surface of the entitlement core.
//!
//! Wires the catalog, player locks, product info cache and handlers
//! together, and exposes the callbacks the game server invokes.
//!
//! ```ignore
//! let service = Arc::new(MtxService::new(settings, sessions, marketplace, bus));
//!
//! service.subscribe(Arc::new(FnHandler::new("vip-perks", |event| {
//!     if let MtxEvent::GamePassStatusChanged { game_pass_id, is_active: true, .. } = event {
//!         // Apply perks for the pass
//!     }
//! })));
//!
//! let decision = service.process_receipt(receipt).await;
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::{AppConfig, ValidationError};
use crate::domain::foundation::{GamePassId, PlayerId};
use crate::domain::mtx::{Catalog, InfoType, MtxError, ProductInfo, PurchaseDecision, Receipt};
use crate::ports::{
    EventBus, EventHandler, EventPublisher, EventSubscriber, Marketplace, PlayerSession,
    PlayerSessions, SubscriptionId,
};

use super::handlers::{
    is_game_pass_active, CompleteGamePassPurchaseCommand, CompleteGamePassPurchaseHandler,
    GamePassPurchaseOutcome, ProcessReceiptCommand, ProcessReceiptHandler,
    ReconcileGamePassesCommand, ReconcileGamePassesHandler, ReconcileReport,
};
use super::{PlayerLocks, ProductInfoCache, RetryPolicy};

/// Settings the service is built from.
#[derive(Debug, Clone)]
pub struct MtxSettings {
    pub catalog: Catalog,
    pub retry: RetryPolicy,
    pub history_capacity: usize,
}

impl MtxSettings {
    /// Derive settings from a loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            catalog: config.catalog.to_catalog()?,
            retry: RetryPolicy::from_config(&config.marketplace),
            history_capacity: config.receipts.history_capacity,
        })
    }
}

/// Facade over the entitlement handlers.
pub struct MtxService {
    subscriber: Arc<dyn EventSubscriber>,
    product_info: ProductInfoCache,
    receipts: ProcessReceiptHandler,
    reconciler: ReconcileGamePassesHandler,
    game_pass_purchases: CompleteGamePassPurchaseHandler,
}

impl MtxService {
    pub fn new<B>(
        settings: MtxSettings,
        sessions: Arc<dyn PlayerSessions>,
        marketplace: Arc<dyn Marketplace>,
        bus: Arc<B>,
    ) -> Self
    where
        B: EventBus + 'static,
    {
        let catalog = Arc::new(settings.catalog);
        let locks = Arc::new(PlayerLocks::new());
        let publisher: Arc<dyn EventPublisher> = bus.clone();
        let subscriber: Arc<dyn EventSubscriber> = bus;

        Self {
            product_info: ProductInfoCache::new(marketplace.clone(), settings.retry),
            receipts: ProcessReceiptHandler::new(
                sessions.clone(),
                catalog.clone(),
                locks.clone(),
                publisher.clone(),
                settings.history_capacity,
            ),
            reconciler: ReconcileGamePassesHandler::new(
                marketplace,
                catalog.clone(),
                locks.clone(),
                publisher.clone(),
            ),
            game_pass_purchases: CompleteGamePassPurchaseHandler::new(
                sessions,
                catalog,
                locks,
                publisher,
            ),
            subscriber,
        }
    }

    /// Platform receipt callback.
    pub async fn process_receipt(&self, receipt: Receipt) -> PurchaseDecision {
        let purchase_id = receipt.purchase_id.clone();
        let decision = self
            .receipts
            .handle(ProcessReceiptCommand { receipt })
            .await;
        tracing::info!(purchase_id = %purchase_id, result = %decision, "process receipt result");
        decision
    }

    /// Reconcile a joining player's game passes.
    pub async fn on_player_join(&self, session: PlayerSession) -> ReconcileReport {
        self.reconciler
            .handle(ReconcileGamePassesCommand { session })
            .await
    }

    /// Run join reconciliation in the background.
    pub fn spawn_player_join(self: &Arc<Self>, session: PlayerSession) -> JoinHandle<ReconcileReport> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.on_player_join(session).await })
    }

    /// Game pass purchase-finished callback.
    pub async fn on_game_pass_purchase_finished(
        &self,
        player_id: PlayerId,
        game_pass_id: GamePassId,
        was_purchased: bool,
    ) -> Result<GamePassPurchaseOutcome, MtxError> {
        let result = self
            .game_pass_purchases
            .handle(CompleteGamePassPurchaseCommand {
                player_id,
                game_pass_id,
                was_purchased,
            })
            .await;

        if let Err(err) = &result {
            tracing::warn!(
                player_id = %player_id,
                game_pass_id = %game_pass_id,
                error = %err,
                "game pass purchase not recorded"
            );
        }
        result
    }

    /// Cached marketplace metadata; `None` when the marketplace is unreachable.
    pub async fn get_product_info(&self, info_type: InfoType, id: u64) -> Option<ProductInfo> {
        self.product_info.get(info_type, id).await
    }

    pub fn is_game_pass_active(&self, session: &PlayerSession, game_pass_id: GamePassId) -> bool {
        is_game_pass_active(session, game_pass_id)
    }

    pub fn subscribe(&self, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        self.subscriber.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscriber.unsubscribe(id)
    }
}
