//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Cross-cutting pieces live beside the handlers:
//!
//! - `retry` - Fixed-delay bounded retry for marketplace calls
//! - `player_locks` - Per-player critical sections
//! - `product_info_cache` - Process-wide marketplace metadata memo
//! - `mtx_service` - Facade the game server calls into

pub mod handlers;
mod mtx_service;
mod player_locks;
mod product_info_cache;
mod retry;

pub use handlers::{
    is_game_pass_active, CompleteGamePassPurchaseCommand, CompleteGamePassPurchaseHandler,
    GamePassPurchaseOutcome, ProcessReceiptCommand, ProcessReceiptHandler,
    ReconcileGamePassesCommand, ReconcileGamePassesHandler, ReconcileReport,
};
pub use mtx_service::{MtxService, MtxSettings};
pub use player_locks::{PlayerLockGuard, PlayerLocks};
pub use product_info_cache::ProductInfoCache;
pub use retry::{RetryExhausted, RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
