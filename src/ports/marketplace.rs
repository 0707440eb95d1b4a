//! Marketplace port - Interface to the platform's marketplace service.
//!
//! Both calls go over the network, are rate-limited by the platform and can
//! fail transiently. Callers decide whether to wrap them in a retry policy.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{GamePassId, PlayerId};
use crate::domain::mtx::{InfoType, ProductInfo};

/// Errors returned by marketplace calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    #[error("Marketplace request failed: {0}")]
    Transport(String),

    #[error("Marketplace rate limit reached")]
    RateLimited,

    #[error("Marketplace has no {info_type} with id {id}")]
    NotFound { info_type: InfoType, id: u64 },
}

/// Port for platform marketplace queries.
#[async_trait]
pub trait Marketplace: Send + Sync {
    /// Fetch metadata for a product or game pass.
    async fn get_product_info(
        &self,
        info_type: InfoType,
        id: u64,
    ) -> Result<ProductInfo, MarketplaceError>;

    /// Authoritative ownership check for a game pass.
    async fn user_owns_game_pass(
        &self,
        player_id: PlayerId,
        game_pass_id: GamePassId,
    ) -> Result<bool, MarketplaceError>;
}
