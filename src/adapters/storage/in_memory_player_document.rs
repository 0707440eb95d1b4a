//! In-Memory Player Document Adapter
//!
//! Keeps the live document and the last durably saved copy side by side so
//! tests can tell "written" apart from "persisted". Save failures can be
//! injected to exercise the redelivery paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::mtx::PlayerData;
use crate::ports::{DocumentError, PlayerDocument};

/// In-memory document for a single player.
#[derive(Debug, Default)]
pub struct InMemoryPlayerDocument {
    current: RwLock<Option<Arc<PlayerData>>>,
    saved: RwLock<Option<Arc<PlayerData>>>,
    pending_failures: AtomicU32,
    saves: AtomicU32,
}

impl InMemoryPlayerDocument {
    /// Creates a loaded document holding `data`, treated as already persisted.
    pub fn new(data: PlayerData) -> Self {
        let data = Arc::new(data);
        Self {
            current: RwLock::new(Some(Arc::clone(&data))),
            saved: RwLock::new(Some(data)),
            pending_failures: AtomicU32::new(0),
            saves: AtomicU32::new(0),
        }
    }

    /// Creates a document that has not been loaded.
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Makes the next `count` saves fail.
    pub fn fail_next_saves(&self, count: u32) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    /// Last successfully saved snapshot.
    pub fn saved(&self) -> Option<Arc<PlayerData>> {
        self.saved
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of save attempts, failed ones included.
    pub fn save_attempts(&self) -> u32 {
        self.saves.load(Ordering::SeqCst)
    }

    /// Drops the live document, as a session teardown would.
    pub fn release(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl PlayerDocument for InMemoryPlayerDocument {
    fn read(&self) -> Option<Arc<PlayerData>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self, data: PlayerData) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(data));
    }

    async fn save(&self) -> Result<(), DocumentError> {
        self.saves.fetch_add(1, Ordering::SeqCst);

        // Saves are a suspension point in every real store.
        tokio::task::yield_now().await;

        let should_fail = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(DocumentError::SaveFailed("injected save failure".to_string()));
        }

        let current = self.read().ok_or(DocumentError::NotLoaded)?;
        *self.saved.write().unwrap_or_else(PoisonError::into_inner) = Some(current);
        Ok(())
    }
}
