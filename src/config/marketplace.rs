//! Marketplace call configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Retry settings for marketplace calls
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MarketplaceConfig {
    /// Total attempts per call, the first one included
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl MarketplaceConfig {
    /// Delay between attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validate marketplace configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retry_attempts == 0 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        Ok(())
    }
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_retry_attempts() -> u32 {
    10
}

fn default_retry_delay_ms() -> u64 {
    2_000
}
