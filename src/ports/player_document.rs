//! PlayerDocument port - Interface to a player's persisted document.
//!
//! The store keeps the current document in memory and flushes it to durable
//! storage on `save`. Writes replace the whole document; readers holding an
//! older snapshot keep seeing that snapshot.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::mtx::PlayerData;

/// Errors that can occur while persisting a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Document is not loaded")]
    NotLoaded,

    #[error("Document save failed: {0}")]
    SaveFailed(String),

    #[error("Failed to serialize document: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize document: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for a single player's persisted document.
#[async_trait]
pub trait PlayerDocument: Send + Sync {
    /// Current snapshot, or `None` if the document is not loaded.
    fn read(&self) -> Option<Arc<PlayerData>>;

    /// Replace the whole document. Not durable until `save` succeeds.
    fn write(&self, data: PlayerData);

    /// Flush the current document to durable storage.
    async fn save(&self) -> Result<(), DocumentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn PlayerDocument) {}

    #[test]
    fn save_failed_displays_reason() {
        let err = DocumentError::SaveFailed("request throttled".into());
        assert_eq!(err.to_string(), "Document save failed: request throttled");
    }
}
