//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the entitlement core and the rest of the game server. Adapters implement
//! these ports.
//!
//! ## Platform Ports
//!
//! - `Marketplace` - Product metadata and authoritative game pass ownership
//!
//! ## Player Ports
//!
//! - `PlayerSessions` - Resolves a player ID to a connected session
//! - `PlayerDocument` - Read/write/save of the player's persisted document
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Publishing entitlement events
//! - `EventSubscriber` - Subscribing handlers to entitlement events
//! - `EventHandler` - Handler invoked for each published event

mod event_publisher;
mod event_subscriber;
mod marketplace;
mod player_document;
mod player_sessions;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber, SubscriptionId};
pub use marketplace::{Marketplace, MarketplaceError};
pub use player_document::{DocumentError, PlayerDocument};
pub use player_sessions::{PlayerSession, PlayerSessions};
