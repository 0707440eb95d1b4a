//! Entitlement-specific error types.
//!
//! None of these escalate to process-level failure. The receipt protocol
//! maps them onto `PurchaseDecision::NotProcessedYet` or a logged no-op.

use thiserror::Error;

use crate::domain::foundation::{
    DomainError, ErrorCode, GamePassId, PlayerId, ProductId,
};
use crate::ports::{DocumentError, MarketplaceError};

/// Errors raised by the entitlement core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MtxError {
    /// Game pass ID outside the configured catalog.
    #[error("Game pass {0} is not in the catalog")]
    UnknownGamePass(GamePassId),

    /// Product ID outside the configured catalog.
    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The same game pass ID was listed twice while building a catalog.
    #[error("Game pass {0} is listed more than once in the catalog")]
    DuplicateGamePass(GamePassId),

    /// The same product ID was listed twice while building a catalog.
    #[error("Product {0} is listed more than once in the catalog")]
    DuplicateProduct(ProductId),

    /// No session could be resolved for the player.
    #[error("Player {0} has no active session")]
    PlayerOffline(PlayerId),

    /// A session exists but its document has not been loaded (or was released).
    #[error("Document for player {0} is not loaded")]
    DocumentNotLoaded(PlayerId),

    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl MtxError {
    /// Returns the uniform error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MtxError::UnknownGamePass(_) => ErrorCode::UnknownGamePass,
            MtxError::UnknownProduct(_) => ErrorCode::UnknownProduct,
            MtxError::DuplicateGamePass(_) | MtxError::DuplicateProduct(_) => {
                ErrorCode::ValidationFailed
            }
            MtxError::PlayerOffline(_) => ErrorCode::PlayerOffline,
            MtxError::DocumentNotLoaded(_) => ErrorCode::DocumentNotLoaded,
            MtxError::Marketplace(MarketplaceError::RateLimited) => ErrorCode::RateLimited,
            MtxError::Marketplace(_) => ErrorCode::MarketplaceUnavailable,
            MtxError::Document(_) => ErrorCode::PersistenceError,
        }
    }
}

impl From<MtxError> for DomainError {
    fn from(err: MtxError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
