//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the entitlement core to the game server:
//! - `events` - In-process event bus and recording handlers
//! - `marketplace` - Marketplace implementations (mock)
//! - `storage` - Player documents (file, in-memory) and the session registry

pub mod events;
pub mod marketplace;
pub mod storage;

pub use events::{FnHandler, InMemoryEventBus, RecordingHandler};
pub use marketplace::MockMarketplace;
pub use storage::{FilePlayerDocument, InMemoryPlayerDocument, InMemoryPlayerSessions};
