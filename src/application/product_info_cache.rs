//! Process-wide memo of marketplace metadata.
//!
//! Entries are immutable and never evicted. Lookups that exhaust their
//! retries are not cached, so the next call starts fresh.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::mtx::{InfoType, ProductInfo};
use crate::ports::Marketplace;

use super::retry::RetryPolicy;

/// Caches `get_product_info` results by kind and ID.
pub struct ProductInfoCache {
    marketplace: Arc<dyn Marketplace>,
    retry: RetryPolicy,
    entries: RwLock<HashMap<(InfoType, u64), ProductInfo>>,
}

impl ProductInfoCache {
    pub fn new(marketplace: Arc<dyn Marketplace>, retry: RetryPolicy) -> Self {
        Self {
            marketplace,
            retry,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached metadata, fetching it through the retry policy on a miss.
    ///
    /// Returns `None` when every attempt failed.
    pub async fn get(&self, info_type: InfoType, id: u64) -> Option<ProductInfo> {
        let key = (info_type, id);

        if let Some(info) = self.entries.read().await.get(&key) {
            return Some(info.clone());
        }

        // The lock is not held across the fetch; racing misses both fetch
        // and the last insert wins.
        let fetched = self
            .retry
            .run("get_product_info", || {
                self.marketplace.get_product_info(info_type, id)
            })
            .await;

        match fetched {
            Ok(info) => {
                self.entries.write().await.insert(key, info.clone());
                Some(info)
            }
            Err(exhausted) => {
                tracing::warn!(
                    info_type = %info_type,
                    id,
                    attempts = exhausted.attempts,
                    error = %exhausted.last_error,
                    "failed to get product info"
                );
                None
            }
        }
    }

    pub async fn contains(&self, info_type: InfoType, id: u64) -> bool {
        self.entries.read().await.contains_key(&(info_type, id))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::marketplace::MockMarketplace;
    use std::time::Duration;

    fn cache_over(marketplace: Arc<MockMarketplace>) -> ProductInfoCache {
        ProductInfoCache::new(marketplace, RetryPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn second_lookup_is_served_from_cache() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_product_info(InfoType::Product, ProductInfo::new(5, "Coins").with_price(10)),
        );
        let cache = cache_over(Arc::clone(&marketplace));

        let first = cache.get(InfoType::Product, 5).await.unwrap();
        let second = cache.get(InfoType::Product, 5).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(marketplace.info_request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn kinds_are_cached_separately() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_product_info(InfoType::Product, ProductInfo::new(5, "Coins"))
                .with_product_info(InfoType::GamePass, ProductInfo::new(5, "VIP")),
        );
        let cache = cache_over(Arc::clone(&marketplace));

        let product = cache.get(InfoType::Product, 5).await.unwrap();
        let pass = cache.get(InfoType::GamePass, 5).await.unwrap();

        assert_eq!(product.name, "Coins");
        assert_eq!(pass.name, "VIP");
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_product_info(InfoType::Product, ProductInfo::new(5, "Coins")),
        );
        marketplace.fail_next_info_requests(3);
        let cache = cache_over(Arc::clone(&marketplace));

        assert!(cache.get(InfoType::Product, 5).await.is_some());
        assert_eq!(marketplace.info_request_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_lookup_is_not_cached() {
        let marketplace = Arc::new(
            MockMarketplace::new()
                .with_product_info(InfoType::Product, ProductInfo::new(5, "Coins")),
        );
        marketplace.set_unavailable(true);
        let cache = cache_over(Arc::clone(&marketplace));

        let started = tokio::time::Instant::now();
        assert!(cache.get(InfoType::Product, 5).await.is_none());
        assert_eq!(started.elapsed(), Duration::from_secs(18));
        assert_eq!(marketplace.info_request_count(), 10);
        assert!(!cache.contains(InfoType::Product, 5).await);

        marketplace.set_unavailable(false);
        assert!(cache.get(InfoType::Product, 5).await.is_some());
        assert_eq!(marketplace.info_request_count(), 11);
    }
}
