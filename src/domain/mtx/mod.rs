//! Monetization (mtx) domain module.
//!
//! Developer products, game passes, receipts and the persisted player
//! document they mutate.
//!
//! # Module Structure
//!
//! - `catalog` - Closed sets of valid game pass and product IDs
//! - `player_data` - Copy-on-write player document
//! - `receipt_history` - Bounded FIFO log of granted purchase IDs
//! - `receipt` - Receipts and purchase decisions
//! - `product_info` - Marketplace metadata
//! - `events` - Events published on the entitlement bus

mod catalog;
mod errors;
mod events;
mod player_data;
mod product_info;
mod receipt;
mod receipt_history;

pub use catalog::{Catalog, GamePassDefinition, ProductDefinition};
pub use errors::MtxError;
pub use events::MtxEvent;
pub use player_data::{GamePassData, PlayerBalance, PlayerData, PlayerMtx, ProductData};
pub use product_info::{InfoType, ProductInfo};
pub use receipt::{PurchaseDecision, Receipt};
pub use receipt_history::{ReceiptHistory, DEFAULT_RECEIPT_HISTORY_CAPACITY};
