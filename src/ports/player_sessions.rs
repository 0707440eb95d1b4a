//! PlayerSessions port - Resolves a platform user to an in-game session.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::PlayerId;

use super::PlayerDocument;

/// A player currently connected to this server, with their loaded document.
#[derive(Clone)]
pub struct PlayerSession {
    pub player_id: PlayerId,
    pub name: String,
    pub document: Arc<dyn PlayerDocument>,
}

impl PlayerSession {
    pub fn new(
        player_id: PlayerId,
        name: impl Into<String>,
        document: Arc<dyn PlayerDocument>,
    ) -> Self {
        Self {
            player_id,
            name: name.into(),
            document,
        }
    }
}

impl fmt::Debug for PlayerSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerSession")
            .field("player_id", &self.player_id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Port for resolving player sessions.
///
/// Returns `None` when the player is not connected or their session has not
/// finished loading. Receipt processing treats that as "try again later".
#[async_trait]
pub trait PlayerSessions: Send + Sync {
    async fn resolve(&self, player_id: PlayerId) -> Option<PlayerSession>;
}
