//! Entitlement handlers.
//!
//! - `ProcessReceiptHandler` - Idempotent developer product grants
//! - `ReconcileGamePassesHandler` - Join-time ownership reconciliation
//! - `CompleteGamePassPurchaseHandler` - Finished game pass purchases
//! - `is_game_pass_active` - Synchronous pass query

mod check_game_pass;
mod complete_game_pass_purchase;
mod process_receipt;
mod reconcile_game_passes;

pub use check_game_pass::is_game_pass_active;
pub use complete_game_pass_purchase::{
    CompleteGamePassPurchaseCommand, CompleteGamePassPurchaseHandler, GamePassPurchaseOutcome,
};
pub use process_receipt::{ProcessReceiptCommand, ProcessReceiptHandler};
pub use reconcile_game_passes::{
    ReconcileGamePassesCommand, ReconcileGamePassesHandler, ReconcileReport,
};
