//! Entitlement domain events.
//!
//! Named in past tense: they describe grants and state changes that have
//! already been applied to the player's document.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainEvent, EventId, GamePassId, PlayerId, ProductId, PurchaseId, Timestamp,
};

/// Events published on the entitlement event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MtxEvent {
    /// A developer product was granted for the first time for this purchase.
    ///
    /// Fired exactly once per purchase ID that reaches a first-time grant.
    DeveloperProductPurchased {
        event_id: EventId,
        player_id: PlayerId,
        product_id: ProductId,
        purchase_id: PurchaseId,
        occurred_at: Timestamp,
    },

    /// A game pass's active state was (re)announced.
    ///
    /// Fired for every known pass on join, for passes newly confirmed owned
    /// during reconciliation, and on pass purchase completion.
    GamePassStatusChanged {
        event_id: EventId,
        player_id: PlayerId,
        game_pass_id: GamePassId,
        is_active: bool,
        occurred_at: Timestamp,
    },
}

impl MtxEvent {
    pub fn product_purchased(
        player_id: PlayerId,
        product_id: ProductId,
        purchase_id: PurchaseId,
    ) -> Self {
        MtxEvent::DeveloperProductPurchased {
            event_id: EventId::new(),
            player_id,
            product_id,
            purchase_id,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn game_pass_status(player_id: PlayerId, game_pass_id: GamePassId, is_active: bool) -> Self {
        MtxEvent::GamePassStatusChanged {
            event_id: EventId::new(),
            player_id,
            game_pass_id,
            is_active,
            occurred_at: Timestamp::now(),
        }
    }

    /// Player the event concerns.
    pub fn player_id(&self) -> PlayerId {
        match self {
            MtxEvent::DeveloperProductPurchased { player_id, .. }
            | MtxEvent::GamePassStatusChanged { player_id, .. } => *player_id,
        }
    }
}

impl DomainEvent for MtxEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MtxEvent::DeveloperProductPurchased { .. } => "mtx.product_purchased.v1",
            MtxEvent::GamePassStatusChanged { .. } => "mtx.game_pass_status_changed.v1",
        }
    }

    fn aggregate_id(&self) -> String {
        self.player_id().to_string()
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            MtxEvent::DeveloperProductPurchased { occurred_at, .. }
            | MtxEvent::GamePassStatusChanged { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            MtxEvent::DeveloperProductPurchased { event_id, .. }
            | MtxEvent::GamePassStatusChanged { event_id, .. } => event_id.clone(),
        }
    }
}
