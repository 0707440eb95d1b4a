//! In-Memory Player Session Registry
//!
//! Tracks which players are connected to this server and the document
//! each session holds.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::PlayerId;
use crate::ports::{PlayerSession, PlayerSessions};

/// In-memory session registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlayerSessions {
    sessions: Arc<RwLock<HashMap<PlayerId, PlayerSession>>>,
}

impl InMemoryPlayerSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connected player, replacing any previous session.
    pub async fn connect(&self, session: PlayerSession) {
        self.sessions
            .write()
            .await
            .insert(session.player_id, session);
    }

    /// Removes a player's session, returning it if present.
    pub async fn disconnect(&self, player_id: PlayerId) -> Option<PlayerSession> {
        self.sessions.write().await.remove(&player_id)
    }

    /// Number of connected players.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl PlayerSessions for InMemoryPlayerSessions {
    async fn resolve(&self, player_id: PlayerId) -> Option<PlayerSession> {
        self.sessions.read().await.get(&player_id).cloned()
    }
}
