//! EventSubscriber port - Interface for subscribing to entitlement events.

use std::fmt;
use std::sync::Arc;

use crate::domain::mtx::MtxEvent;

/// Handler for entitlement events.
///
/// Implementations should be:
/// - **Quick** - handlers run inline on the publishing task
/// - **Non-blocking** - spawn a task for anything that awaits
///
/// # Example
///
/// ```ignore
/// struct VipDoorUnlocker { /* ... */ }
///
/// impl EventHandler for VipDoorUnlocker {
///     fn handle(&self, event: &MtxEvent) {
///         if let MtxEvent::GamePassStatusChanged { game_pass_id, is_active, .. } = event {
///             // open or close the door...
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "VipDoorUnlocker"
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Process an event.
    fn handle(&self, event: &MtxEvent);

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Port for subscribing to entitlement events.
pub trait EventSubscriber: Send + Sync {
    /// Register a handler for every event. Handlers run in registration order.
    fn subscribe(&self, handler: Arc<dyn EventHandler>) -> SubscriptionId;

    /// Remove a handler. Returns false if the token was unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

// Blanket implementation - any type that implements both traits is an EventBus
impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that traits are object-safe
    #[allow(dead_code)]
    fn assert_handler_object_safe(_: &dyn EventHandler) {}

    #[allow(dead_code)]
    fn assert_subscriber_object_safe(_: &dyn EventSubscriber) {}

    #[test]
    fn subscription_id_displays_with_prefix() {
        assert_eq!(SubscriptionId::new(4).to_string(), "sub-4");
    }
}
