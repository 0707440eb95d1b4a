//! CompleteGamePassPurchaseHandler - Records a finished game pass purchase.
//!
//! The platform stays authoritative for pass ownership, so a failed save is
//! logged and the next join's reconciliation repairs the document.

use std::sync::Arc;

use crate::application::PlayerLocks;
use crate::domain::foundation::{GamePassId, PlayerId};
use crate::domain::mtx::{Catalog, MtxError, MtxEvent};
use crate::ports::{EventPublisher, PlayerSessions};

/// Command from the purchase-finished callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteGamePassPurchaseCommand {
    pub player_id: PlayerId,
    pub game_pass_id: GamePassId,
    pub was_purchased: bool,
}

/// What the handler did with a purchase-finished notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePassPurchaseOutcome {
    /// The prompt was dismissed without buying.
    Ignored,
    /// The pass is marked owned; `saved` is false when persisting failed.
    Granted { saved: bool },
}

/// Handler for game pass purchases.
pub struct CompleteGamePassPurchaseHandler {
    sessions: Arc<dyn PlayerSessions>,
    catalog: Arc<Catalog>,
    locks: Arc<PlayerLocks>,
    publisher: Arc<dyn EventPublisher>,
}

impl CompleteGamePassPurchaseHandler {
    pub fn new(
        sessions: Arc<dyn PlayerSessions>,
        catalog: Arc<Catalog>,
        locks: Arc<PlayerLocks>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            sessions,
            catalog,
            locks,
            publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteGamePassPurchaseCommand,
    ) -> Result<GamePassPurchaseOutcome, MtxError> {
        if !cmd.was_purchased {
            return Ok(GamePassPurchaseOutcome::Ignored);
        }

        let pass = self.catalog.game_pass(cmd.game_pass_id).map_err(|err| {
            tracing::warn!(
                player_id = %cmd.player_id,
                game_pass_id = %cmd.game_pass_id,
                "attempted to purchase invalid game pass"
            );
            err
        })?;

        let session = self
            .sessions
            .resolve(cmd.player_id)
            .await
            .ok_or(MtxError::PlayerOffline(cmd.player_id))?;

        let _guard = self.locks.lock(cmd.player_id).await;

        let data = session
            .document
            .read()
            .ok_or(MtxError::DocumentNotLoaded(cmd.player_id))?;

        tracing::info!(
            player_id = %cmd.player_id,
            name = %session.name,
            game_pass_id = %pass.id,
            pass_name = %pass.name,
            "purchased game pass"
        );

        session
            .document
            .write(data.with_game_pass_owned(cmd.game_pass_id));

        let saved = match session.document.save().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    player_id = %cmd.player_id,
                    game_pass_id = %cmd.game_pass_id,
                    error = %err,
                    "failed to save purchased game pass"
                );
                false
            }
        };

        self.publisher
            .publish(&MtxEvent::game_pass_status(cmd.player_id, cmd.game_pass_id, true));

        Ok(GamePassPurchaseOutcome::Granted { saved })
    }
}
