//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process publish/subscribe
//! - `RecordingHandler` - Captures events for inspection
//! - `FnHandler` - Closure-backed handler

mod in_memory;
mod recording;

pub use in_memory::InMemoryEventBus;
pub use recording::{FnHandler, RecordingHandler};
