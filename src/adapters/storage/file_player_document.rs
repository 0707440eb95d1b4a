//! File-based Player Document Adapter
//!
//! Stores each player's document as a JSON file named after the player ID.
//! Saves write a temporary sibling file and rename it over the target, so a
//! crash mid-save leaves the previous document intact.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::fs;

use crate::domain::foundation::PlayerId;
use crate::domain::mtx::PlayerData;
use crate::ports::{DocumentError, PlayerDocument};

/// JSON-file backed document for a single player.
#[derive(Debug)]
pub struct FilePlayerDocument {
    path: PathBuf,
    current: RwLock<Option<Arc<PlayerData>>>,
}

impl FilePlayerDocument {
    /// Load the document for `player_id` from `base_path`.
    ///
    /// A missing file yields a fresh default document.
    ///
    /// # Example
    /// ```ignore
    /// let doc = FilePlayerDocument::load("./data/players", PlayerId::new(1001)).await?;
    /// ```
    pub async fn load<P: AsRef<Path>>(
        base_path: P,
        player_id: PlayerId,
    ) -> Result<Self, DocumentError> {
        let path = base_path.as_ref().join(format!("{}.json", player_id));

        let data = match fs::read_to_string(&path).await {
            Ok(json) => serde_json::from_str(&json)
                .map_err(|e| DocumentError::DeserializationFailed(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PlayerData::default(),
            Err(e) => return Err(DocumentError::IoError(e.to_string())),
        };

        Ok(Self {
            path,
            current: RwLock::new(Some(Arc::new(data))),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl PlayerDocument for FilePlayerDocument {
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
        let data = self.read().ok_or(DocumentError::NotLoaded)?;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| DocumentError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(data.as_ref())
            .map_err(|e| DocumentError::SerializationFailed(e.to_string()))?;

        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| DocumentError::IoError(e.to_string()))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| DocumentError::IoError(e.to_string()))?;

        Ok(())
    }
}
