//! Per-player critical sections.
//!
//! Every read-modify-write-save sequence on a player's document runs while
//! holding that player's lock. Different players never contend. The index
//! entry for a player is dropped once no task holds or awaits its lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::PlayerId;

type LockIndex = HashMap<PlayerId, Arc<AsyncMutex<()>>>;

/// Index of per-player async mutexes.
#[derive(Debug, Default)]
pub struct PlayerLocks {
    index: Mutex<LockIndex>,
}

impl PlayerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and acquire `player_id`'s lock.
    pub async fn lock(&self, player_id: PlayerId) -> PlayerLockGuard<'_> {
        let mutex = Arc::clone(self.index().entry(player_id).or_default());
        let guard = mutex.lock_owned().await;

        PlayerLockGuard {
            locks: self,
            player_id,
            guard: Some(guard),
        }
    }

    /// Number of players with a held or awaited lock.
    pub fn tracked_players(&self) -> usize {
        self.index().len()
    }

    fn index(&self) -> MutexGuard<'_, LockIndex> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, player_id: PlayerId) {
        let mut index = self.index();
        let idle = index
            .get(&player_id)
            .map(|mutex| Arc::strong_count(mutex) == 1)
            .unwrap_or(false);
        if idle {
            index.remove(&player_id);
        }
    }
}

/// Held lock for one player. Released on drop.
#[derive(Debug)]
pub struct PlayerLockGuard<'a> {
    locks: &'a PlayerLocks,
    player_id: PlayerId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl PlayerLockGuard<'_> {
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }
}

impl Drop for PlayerLockGuard<'_> {
    fn drop(&mut self) {
        // Unlock first so the index sees only the map's own reference
        // when nobody else is waiting.
        drop(self.guard.take());
        self.locks.release(self.player_id);
    }
}
