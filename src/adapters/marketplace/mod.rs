//! Marketplace adapters.
//!
//! - `MockMarketplace` - In-memory product metadata and ownership tables,
//!   with failure injection and call tracking

mod mock_marketplace;

pub use mock_marketplace::MockMarketplace;
