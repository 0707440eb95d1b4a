//! Application handlers.
//!
//! Command and query handlers that orchestrate entitlement operations.

pub mod mtx;

pub use mtx::{
    is_game_pass_active, CompleteGamePassPurchaseCommand, CompleteGamePassPurchaseHandler,
    GamePassPurchaseOutcome, ProcessReceiptCommand, ProcessReceiptHandler,
    ReconcileGamePassesCommand, ReconcileGamePassesHandler, ReconcileReport,
};
