//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, event infrastructure and error types
//! that form the vocabulary of the entitlements domain.

mod errors;
mod events;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventId};
pub use ids::{GamePassId, PlayerId, ProductId, PurchaseId};
pub use timestamp::Timestamp;
