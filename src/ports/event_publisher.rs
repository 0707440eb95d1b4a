//! EventPublisher port - Interface for publishing entitlement events.
//!
//! Publishing is synchronous: every current subscriber has been invoked,
//! in registration order, by the time `publish` returns.

use crate::domain::mtx::MtxEvent;

/// Port for publishing entitlement events.
///
/// # Example
///
/// ```ignore
/// let event = MtxEvent::game_pass_status(player_id, pass_id, true);
/// publisher.publish(&event);
/// ```
pub trait EventPublisher: Send + Sync {
    /// Deliver an event to all current subscribers.
    fn publish(&self, event: &MtxEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}
}
