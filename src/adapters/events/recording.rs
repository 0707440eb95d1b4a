//! Event handlers that capture or forward events.
//!
//! `RecordingHandler` keeps every event it sees for later inspection (tests,
//! the replay tool). `FnHandler` adapts a closure to `EventHandler`.

use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::{GamePassId, PlayerId, ProductId};
use crate::domain::mtx::MtxEvent;
use crate::ports::EventHandler;

/// Captures every event it handles.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    events: Mutex<Vec<MtxEvent>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured events, oldest first.
    pub fn events(&self) -> Vec<MtxEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Products granted, in grant order.
    pub fn product_purchases(&self) -> Vec<(PlayerId, ProductId)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MtxEvent::DeveloperProductPurchased {
                    player_id,
                    product_id,
                    ..
                } => Some((player_id, product_id)),
                _ => None,
            })
            .collect()
    }

    /// Game pass status announcements, in publish order.
    pub fn game_pass_statuses(&self) -> Vec<(PlayerId, GamePassId, bool)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                MtxEvent::GamePassStatusChanged {
                    player_id,
                    game_pass_id,
                    is_active,
                    ..
                } => Some((player_id, game_pass_id, is_active)),
                _ => None,
            })
            .collect()
    }

    /// Drops all captured events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventHandler for RecordingHandler {
    fn handle(&self, event: &MtxEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }

    fn name(&self) -> &'static str {
        "RecordingHandler"
    }
}

/// Wraps a closure as an `EventHandler`.
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&MtxEvent) + Send + Sync,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&MtxEvent) + Send + Sync,
{
    fn handle(&self, event: &MtxEvent) {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
