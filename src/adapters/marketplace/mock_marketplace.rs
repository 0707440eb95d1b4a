//! Mock Marketplace for testing and local replay.
//!
//! Serves product metadata and game pass ownership from in-memory tables,
//! without touching the platform.
//!
//! # Features
//!
//! - Pre-configured product info per `(InfoType, id)`
//! - Per-player game pass ownership
//! - Error injection for retry and isolation testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let marketplace = MockMarketplace::new()
//!     .with_product_info(InfoType::Product, ProductInfo::new(1, "Coins").with_price(25))
//!     .with_owned_game_pass(PlayerId::new(1001), GamePassId::new(1));
//!
//! assert!(marketplace.user_owns_game_pass(PlayerId::new(1001), GamePassId::new(1)).await?);
//! ```

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::domain::foundation::{GamePassId, PlayerId};
use crate::domain::mtx::{InfoType, ProductInfo};
use crate::ports::{Marketplace, MarketplaceError};

/// In-memory marketplace.
#[derive(Debug, Default)]
pub struct MockMarketplace {
    /// Product metadata keyed by kind and ID.
    infos: Mutex<HashMap<(InfoType, u64), ProductInfo>>,
    /// Game passes each player owns on the platform.
    ownership: Mutex<HashMap<PlayerId, HashSet<GamePassId>>>,
    /// Ownership checks for these passes always fail.
    failing_passes: Mutex<HashSet<GamePassId>>,
    /// Number of upcoming info requests that fail.
    pending_info_failures: AtomicU32,
    /// Every call fails while set.
    unavailable: AtomicBool,
    /// Simulated latency per request.
    delay: Duration,
    info_requests: Mutex<Vec<(InfoType, u64)>>,
    ownership_checks: Mutex<Vec<(PlayerId, GamePassId)>>,
}

impl MockMarketplace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers metadata for a product or game pass.
    pub fn with_product_info(self, info_type: InfoType, info: ProductInfo) -> Self {
        self.set_product_info(info_type, info);
        self
    }

    /// Marks a game pass as owned by a player.
    pub fn with_owned_game_pass(self, player_id: PlayerId, game_pass_id: GamePassId) -> Self {
        self.grant_game_pass(player_id, game_pass_id);
        self
    }

    /// Makes ownership checks for `game_pass_id` fail.
    pub fn with_failing_game_pass(self, game_pass_id: GamePassId) -> Self {
        lock(&self.failing_passes).insert(game_pass_id);
        self
    }

    /// Adds latency to every request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_product_info(&self, info_type: InfoType, info: ProductInfo) {
        lock(&self.infos).insert((info_type, info.target_id), info);
    }

    /// Records a platform-side purchase.
    pub fn grant_game_pass(&self, player_id: PlayerId, game_pass_id: GamePassId) {
        lock(&self.ownership)
            .entry(player_id)
            .or_default()
            .insert(game_pass_id);
    }

    /// Makes the next `count` info requests fail with a transport error.
    pub fn fail_next_info_requests(&self, count: u32) {
        self.pending_info_failures.store(count, Ordering::SeqCst);
    }

    /// Toggles a full outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Info requests received so far, in order.
    pub fn info_requests(&self) -> Vec<(InfoType, u64)> {
        lock(&self.info_requests).clone()
    }

    pub fn info_request_count(&self) -> usize {
        lock(&self.info_requests).len()
    }

    /// Ownership checks received so far, in order.
    pub fn ownership_checks(&self) -> Vec<(PlayerId, GamePassId)> {
        lock(&self.ownership_checks).clone()
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn check_available(&self) -> Result<(), MarketplaceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MarketplaceError::Transport(
                "marketplace unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Marketplace for MockMarketplace {
    async fn get_product_info(
        &self,
        info_type: InfoType,
        id: u64,
    ) -> Result<ProductInfo, MarketplaceError> {
        lock(&self.info_requests).push((info_type, id));
        self.simulate_latency().await;
        self.check_available()?;

        let injected = self
            .pending_info_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(MarketplaceError::Transport(
                "injected info failure".to_string(),
            ));
        }

        lock(&self.infos)
            .get(&(info_type, id))
            .cloned()
            .ok_or(MarketplaceError::NotFound { info_type, id })
    }

    async fn user_owns_game_pass(
        &self,
        player_id: PlayerId,
        game_pass_id: GamePassId,
    ) -> Result<bool, MarketplaceError> {
        lock(&self.ownership_checks).push((player_id, game_pass_id));
        self.simulate_latency().await;
        self.check_available()?;

        if lock(&self.failing_passes).contains(&game_pass_id) {
            return Err(MarketplaceError::Transport(format!(
                "ownership check failed for game pass {}",
                game_pass_id
            )));
        }

        Ok(lock(&self.ownership)
            .get(&player_id)
            .map(|passes| passes.contains(&game_pass_id))
            .unwrap_or(false))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_registered_product_info() {
        let marketplace = MockMarketplace::new()
            .with_product_info(InfoType::Product, ProductInfo::new(3, "Gems").with_price(99));

        let info = marketplace
            .get_product_info(InfoType::Product, 3)
            .await
            .unwrap();
        assert_eq!(info.name, "Gems");
        assert_eq!(info.price, Some(99));
    }

    #[tokio::test]
    async fn info_is_keyed_by_kind() {
        let marketplace = MockMarketplace::new()
            .with_product_info(InfoType::GamePass, ProductInfo::new(3, "VIP"));

        let result = marketplace.get_product_info(InfoType::Product, 3).await;
        assert_eq!(
            result,
            Err(MarketplaceError::NotFound {
                info_type: InfoType::Product,
                id: 3
            })
        );
    }

    #[tokio::test]
    async fn injected_failures_run_out() {
        let marketplace = MockMarketplace::new()
            .with_product_info(InfoType::Product, ProductInfo::new(1, "Coins"));
        marketplace.fail_next_info_requests(1);

        assert!(marketplace.get_product_info(InfoType::Product, 1).await.is_err());
        assert!(marketplace.get_product_info(InfoType::Product, 1).await.is_ok());
        assert_eq!(marketplace.info_request_count(), 2);
    }

    #[tokio::test]
    async fn ownership_is_per_player() {
        let marketplace = MockMarketplace::new()
            .with_owned_game_pass(PlayerId::new(1), GamePassId::new(10));

        assert!(marketplace
            .user_owns_game_pass(PlayerId::new(1), GamePassId::new(10))
            .await
            .unwrap());
        assert!(!marketplace
            .user_owns_game_pass(PlayerId::new(2), GamePassId::new(10))
            .await
            .unwrap());
        assert_eq!(marketplace.ownership_checks().len(), 2);
    }

    #[tokio::test]
    async fn failing_pass_errors_without_affecting_others() {
        let marketplace = MockMarketplace::new()
            .with_owned_game_pass(PlayerId::new(1), GamePassId::new(10))
            .with_failing_game_pass(GamePassId::new(11));

        assert!(marketplace
            .user_owns_game_pass(PlayerId::new(1), GamePassId::new(11))
            .await
            .is_err());
        assert!(marketplace
            .user_owns_game_pass(PlayerId::new(1), GamePassId::new(10))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn outage_fails_every_call() {
        let marketplace = MockMarketplace::new()
            .with_owned_game_pass(PlayerId::new(1), GamePassId::new(10));
        marketplace.set_unavailable(true);

        assert!(marketplace
            .user_owns_game_pass(PlayerId::new(1), GamePassId::new(10))
            .await
            .is_err());

        marketplace.set_unavailable(false);
        assert!(marketplace
            .user_owns_game_pass(PlayerId::new(1), GamePassId::new(10))
            .await
            .is_ok());
    }
}
