//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, events, errors)
//! - `mtx` - Products, game passes, receipts and the player document

pub mod foundation;
pub mod mtx;
