//! In-process event bus.
//!
//! Delivers every published event synchronously to all current subscribers,
//! in registration order. Handlers are snapshotted before dispatch so a
//! handler may subscribe or unsubscribe while an event is in flight without
//! deadlocking; such changes apply from the next `publish`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::domain::foundation::DomainEvent;
use crate::domain::mtx::MtxEvent;
use crate::ports::{EventHandler, EventPublisher, EventSubscriber, SubscriptionId};

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// let token = bus.subscribe(Arc::new(VipDoorUnlocker::new()));
///
/// bus.publish(&MtxEvent::game_pass_status(player_id, pass_id, true));
/// bus.unsubscribe(token);
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<Vec<(SubscriptionId, Arc<dyn EventHandler>)>>,
    next_id: AtomicU64,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns the number of current subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: &MtxEvent) {
        // Clone handlers to release lock before invoking them
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            trace!(
                handler = handler.name(),
                event_type = event.event_type(),
                "Dispatching event"
            );
            handler.handle(event);
        }
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, handler: Arc<dyn EventHandler>) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self
            .handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::RecordingHandler;
    use crate::domain::foundation::{GamePassId, PlayerId};
    use std::sync::Mutex;

    fn status_event() -> MtxEvent {
        MtxEvent::game_pass_status(PlayerId::new(1), GamePassId::new(10), true)
    }

    /// Appends its label to a shared log so ordering can be asserted.
    struct OrderedHandler {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl EventHandler for OrderedHandler {
        fn handle(&self, _: &MtxEvent) {
            self.log.lock().unwrap().push(self.label);
        }

        fn name(&self) -> &'static str {
            self.label
        }
    }

    #[test]
    fn handler_receives_published_event() {
        let bus = InMemoryEventBus::new();
        let recorder = Arc::new(RecordingHandler::new());
        bus.subscribe(recorder.clone());

        let event = status_event();
        bus.publish(&event);

        assert_eq!(recorder.events(), vec![event]);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let bus = InMemoryEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            bus.subscribe(Arc::new(OrderedHandler {
                label,
                log: log.clone(),
            }));
        }
        bus.publish(&status_event());

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribed_handler_stops_receiving() {
        let bus = InMemoryEventBus::new();
        let recorder = Arc::new(RecordingHandler::new());
        let token = bus.subscribe(recorder.clone());

        bus.publish(&status_event());
        assert!(bus.unsubscribe(token));
        bus.publish(&status_event());

        assert_eq!(recorder.count(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn unsubscribing_unknown_token_returns_false() {
        let bus = InMemoryEventBus::new();
        assert!(!bus.unsubscribe(SubscriptionId::new(99)));
    }

    #[test]
    fn tokens_are_unique() {
        let bus = InMemoryEventBus::new();
        let a = bus.subscribe(Arc::new(RecordingHandler::new()));
        let b = bus.subscribe(Arc::new(RecordingHandler::new()));
        assert_ne!(a, b);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let bus = InMemoryEventBus::new();
        bus.publish(&status_event());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn handler_can_unsubscribe_itself_during_dispatch() {
        struct OneShot {
            bus: Arc<InMemoryEventBus>,
            token: Mutex<Option<SubscriptionId>>,
            calls: Mutex<usize>,
        }

        impl EventHandler for OneShot {
            fn handle(&self, _: &MtxEvent) {
                *self.calls.lock().unwrap() += 1;
                if let Some(token) = self.token.lock().unwrap().take() {
                    self.bus.unsubscribe(token);
                }
            }

            fn name(&self) -> &'static str {
                "OneShot"
            }
        }

        let bus = Arc::new(InMemoryEventBus::new());
        let handler = Arc::new(OneShot {
            bus: bus.clone(),
            token: Mutex::new(None),
            calls: Mutex::new(0),
        });
        let token = bus.subscribe(handler.clone());
        *handler.token.lock().unwrap() = Some(token);

        bus.publish(&status_event());
        bus.publish(&status_event());

        assert_eq!(*handler.calls.lock().unwrap(), 1);
    }
}
