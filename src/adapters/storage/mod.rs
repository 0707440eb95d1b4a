//! Storage Adapters
//!
//! Implementations of the `PlayerDocument` and `PlayerSessions` ports.
//!
//! ## Available Adapters
//!
//! - **FilePlayerDocument** - One JSON file per player on disk
//! - **InMemoryPlayerDocument** - Live and saved copies in memory, with save-failure injection
//! - **InMemoryPlayerSessions** - Registry of connected players
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FilePlayerDocument, InMemoryPlayerSessions};
//!
//! let document = FilePlayerDocument::load("./data/players", player_id).await?;
//! sessions.connect(PlayerSession::new(player_id, "builderman", Arc::new(document))).await;
//! ```

mod file_player_document;
mod in_memory_player_document;
mod in_memory_player_sessions;

pub use file_player_document::FilePlayerDocument;
pub use in_memory_player_document::InMemoryPlayerDocument;
pub use in_memory_player_sessions::InMemoryPlayerSessions;
