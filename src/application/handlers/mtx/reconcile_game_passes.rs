//! ReconcileGamePassesHandler - Join-time game pass ownership check.
//!
//! Passes missing from the player's document are checked against the
//! platform concurrently. Each candidate's outcome is independent: one
//! failed check never prevents another pass from being confirmed.

use std::sync::Arc;

use futures::future::join_all;

use crate::application::PlayerLocks;
use crate::domain::foundation::GamePassId;
use crate::domain::mtx::{Catalog, MtxError, MtxEvent};
use crate::ports::{EventPublisher, Marketplace, PlayerSession};

/// Command to reconcile a joining player's game passes.
#[derive(Debug, Clone)]
pub struct ReconcileGamePassesCommand {
    pub session: PlayerSession,
}

/// What a reconciliation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The document was not loaded; nothing was checked or announced.
    pub skipped: bool,
    /// Passes already in the document, announced with their stored flag.
    pub notified: Vec<(GamePassId, bool)>,
    /// Passes the platform confirmed and that are now marked owned.
    pub newly_owned: Vec<GamePassId>,
    /// Passes whose ownership check failed.
    pub failed: Vec<GamePassId>,
}

impl ReconcileReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }
}

enum CheckOutcome {
    Owned(GamePassId),
    Unchanged,
    Failed(GamePassId),
}

/// Handler for join-time reconciliation.
pub struct ReconcileGamePassesHandler {
    marketplace: Arc<dyn Marketplace>,
    catalog: Arc<Catalog>,
    locks: Arc<PlayerLocks>,
    publisher: Arc<dyn EventPublisher>,
}

impl ReconcileGamePassesHandler {
    pub fn new(
        marketplace: Arc<dyn Marketplace>,
        catalog: Arc<Catalog>,
        locks: Arc<PlayerLocks>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            marketplace,
            catalog,
            locks,
            publisher,
        }
    }

    pub async fn handle(&self, cmd: ReconcileGamePassesCommand) -> ReconcileReport {
        let session = cmd.session;
        let player_id = session.player_id;

        let Some(data) = session.document.read() else {
            tracing::debug!(player_id = %player_id, "document not loaded, skipping reconciliation");
            return ReconcileReport::skipped();
        };

        let known = data.mtx.game_passes.clone();
        let mut report = ReconcileReport::default();

        // Announce what the document already says
        for (&game_pass_id, pass) in &known {
            self.publisher
                .publish(&MtxEvent::game_pass_status(player_id, game_pass_id, pass.active));
            report.notified.push((game_pass_id, pass.active));
        }

        let candidates: Vec<GamePassId> = self
            .catalog
            .game_pass_ids()
            .filter(|id| !known.contains_key(id))
            .collect();

        if candidates.is_empty() {
            return report;
        }

        tracing::debug!(
            player_id = %player_id,
            candidates = candidates.len(),
            "checking unowned game passes"
        );

        let checks = candidates
            .into_iter()
            .map(|game_pass_id| self.check_candidate(&session, game_pass_id));

        for outcome in join_all(checks).await {
            match outcome {
                CheckOutcome::Owned(id) => report.newly_owned.push(id),
                CheckOutcome::Unchanged => {}
                CheckOutcome::Failed(id) => report.failed.push(id),
            }
        }

        report
    }

    async fn check_candidate(
        &self,
        session: &PlayerSession,
        game_pass_id: GamePassId,
    ) -> CheckOutcome {
        match self.owns(session, game_pass_id).await {
            Ok(true) => {
                if self.mark_owned(session, game_pass_id).await {
                    CheckOutcome::Owned(game_pass_id)
                } else {
                    CheckOutcome::Unchanged
                }
            }
            Ok(false) => CheckOutcome::Unchanged,
            Err(err) => {
                tracing::warn!(
                    player_id = %session.player_id,
                    game_pass_id = %game_pass_id,
                    error = %err,
                    "error checking game pass"
                );
                CheckOutcome::Failed(game_pass_id)
            }
        }
    }

    /// Local state first, then the platform.
    async fn owns(
        &self,
        session: &PlayerSession,
        game_pass_id: GamePassId,
    ) -> Result<bool, MtxError> {
        self.catalog.game_pass(game_pass_id)?;

        let owned_locally = session
            .document
            .read()
            .map(|data| data.owns_game_pass(game_pass_id))
            .unwrap_or(false);
        if owned_locally {
            return Ok(true);
        }

        Ok(self
            .marketplace
            .user_owns_game_pass(session.player_id, game_pass_id)
            .await?)
    }

    /// Returns false when the document already recorded the pass or was released.
    async fn mark_owned(&self, session: &PlayerSession, game_pass_id: GamePassId) -> bool {
        let player_id = session.player_id;
        let _guard = self.locks.lock(player_id).await;

        let Some(data) = session.document.read() else {
            tracing::warn!(
                player_id = %player_id,
                game_pass_id = %game_pass_id,
                "document released before game pass could be recorded"
            );
            return false;
        };

        // Recorded since the join snapshot, by a purchase or an earlier check
        if data.owns_game_pass(game_pass_id) {
            tracing::debug!(player_id = %player_id, game_pass_id = %game_pass_id, "game pass already recorded");
            return false;
        }
        session.document.write(data.with_game_pass_owned(game_pass_id));

        if let Err(err) = session.document.save().await {
            tracing::warn!(
                player_id = %player_id,
                game_pass_id = %game_pass_id,
                error = %err,
                "failed to save reconciled game pass"
            );
        }

        tracing::info!(player_id = %player_id, game_pass_id = %game_pass_id, "game pass ownership confirmed");
        self.publisher
            .publish(&MtxEvent::game_pass_status(player_id, game_pass_id, true));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::{InMemoryEventBus, RecordingHandler};
    use crate::adapters::marketplace::MockMarketplace;
    use crate::adapters::storage::InMemoryPlayerDocument;
    use crate::domain::foundation::PlayerId;
    use crate::domain::mtx::{GamePassData, GamePassDefinition, PlayerData};
    use crate::ports::{EventSubscriber, PlayerDocument};
    use std::time::Duration;

    const PLAYER: u64 = 1001;

    fn catalog(passes: &[u64]) -> Arc<Catalog> {
        let passes = passes.iter().map(|&id| GamePassDefinition {
            id: GamePassId::new(id),
            name: format!("pass-{}", id),
        });
        Arc::new(Catalog::new(passes, vec![]).unwrap())
    }

    struct Fixture {
        handler: ReconcileGamePassesHandler,
        recorder: Arc<RecordingHandler>,
    }

    fn fixture(marketplace: Arc<MockMarketplace>, passes: &[u64]) -> Fixture {
        let bus = Arc::new(InMemoryEventBus::new());
        let recorder = Arc::new(RecordingHandler::new());
        bus.subscribe(recorder.clone());

        Fixture {
            handler: ReconcileGamePassesHandler::new(
                marketplace,
                catalog(passes),
                Arc::new(PlayerLocks::new()),
                bus,
            ),
            recorder,
        }
    }

    fn session(document: Arc<InMemoryPlayerDocument>) -> ReconcileGamePassesCommand {
        ReconcileGamePassesCommand {
            session: PlayerSession::new(PlayerId::new(PLAYER), "builderman", document),
        }
    }

    #[tokio::test]
    async fn marks_only_platform_owned_passes() {
        let marketplace = Arc::new(
            MockMarketplace::new().with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(1)),
        );
        let f = fixture(marketplace, &[1, 2, 3]);
        let document = Arc::new(InMemoryPlayerDocument::new(PlayerData::default()));

        let report = f.handler.handle(session(document.clone())).await;

        assert_eq!(report.newly_owned, vec![GamePassId::new(1)]);
        assert!(report.failed.is_empty());
        let saved = document.saved().unwrap();
        assert!(saved.is_game_pass_active(GamePassId::new(1)));
        assert!(!saved.owns_game_pass(GamePassId::new(2)));
        assert!(!saved.owns_game_pass(GamePassId::new(3)));
        assert_eq!(
            f.recorder.game_pass_statuses(),
            vec![(PlayerId::new(PLAYER), GamePassId::new(1), true)]
        );
    }

    #[tokio::test]
    async fn known_passes_are_announced_and_not_rechecked() {
        let marketplace = Arc::new(MockMarketplace::new());
        let f = fixture(marketplace.clone(), &[1, 2]);
        let mut data = PlayerData::default().with_game_pass_owned(GamePassId::new(1));
        data.mtx
            .game_passes
            .insert(GamePassId::new(2), GamePassData { active: false });
        let document = Arc::new(InMemoryPlayerDocument::new(data));

        let report = f.handler.handle(session(document)).await;

        assert_eq!(
            report.notified,
            vec![(GamePassId::new(1), true), (GamePassId::new(2), false)]
        );
        assert!(marketplace.ownership_checks().is_empty());
        assert_eq!(f.recorder.game_pass_statuses().len(), 2);
    }

    #[tokio::test]
    async fn unloaded_document_skips_everything() {
        let marketplace = Arc::new(MockMarketplace::new());
        let f = fixture(marketplace.clone(), &[1]);
        let document = Arc::new(InMemoryPlayerDocument::unloaded());

        let report = f.handler.handle(session(document)).await;

        assert!(report.skipped);
        assert!(marketplace.ownership_checks().is_empty());
        assert_eq!(f.recorder.count(), 0);
    }

    #[tokio::test]
    async fn one_failed_check_does_not_block_others() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(2))
                .with_failing_game_pass(GamePassId::new(1)),
        );
        let f = fixture(marketplace, &[1, 2]);
        let document = Arc::new(InMemoryPlayerDocument::new(PlayerData::default()));

        let report = f.handler.handle(session(document.clone())).await;

        assert_eq!(report.failed, vec![GamePassId::new(1)]);
        assert_eq!(report.newly_owned, vec![GamePassId::new(2)]);
        assert!(document.read().unwrap().owns_game_pass(GamePassId::new(2)));
    }

    #[tokio::test]
    async fn save_failure_keeps_in_memory_mark() {
        let marketplace = Arc::new(
            MockMarketplace::new().with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(1)),
        );
        let f = fixture(marketplace, &[1]);
        let document = Arc::new(InMemoryPlayerDocument::new(PlayerData::default()));
        document.fail_next_saves(1);

        let report = f.handler.handle(session(document.clone())).await;

        assert_eq!(report.newly_owned, vec![GamePassId::new(1)]);
        assert!(document.read().unwrap().owns_game_pass(GamePassId::new(1)));
        assert!(!document.saved().unwrap().owns_game_pass(GamePassId::new(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn pass_recorded_during_check_is_not_announced_twice() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(1))
                .with_delay(Duration::from_millis(50)),
        );
        let f = fixture(marketplace.clone(), &[1]);
        let document = Arc::new(InMemoryPlayerDocument::new(PlayerData::default()));

        let purchase = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let data = document.read().unwrap();
            document.write(data.with_game_pass_owned(GamePassId::new(1)));
        };
        let (report, ()) = tokio::join!(f.handler.handle(session(document.clone())), purchase);

        assert_eq!(marketplace.ownership_checks().len(), 1);
        assert!(report.newly_owned.is_empty());
        assert!(f.recorder.game_pass_statuses().is_empty());
        assert_eq!(document.save_attempts(), 0);
        assert!(document.read().unwrap().owns_game_pass(GamePassId::new(1)));
    }

    #[tokio::test]
    async fn several_confirmed_passes_all_land_in_the_document() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(1))
                .with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(2))
                .with_owned_game_pass(PlayerId::new(PLAYER), GamePassId::new(3)),
        );
        let f = fixture(marketplace, &[1, 2, 3]);
        let document = Arc::new(InMemoryPlayerDocument::new(PlayerData::default()));

        let report = f.handler.handle(session(document.clone())).await;

        assert_eq!(report.newly_owned.len(), 3);
        let saved = document.saved().unwrap();
        for id in 1..=3 {
            assert!(saved.owns_game_pass(GamePassId::new(id)));
        }
    }
}
