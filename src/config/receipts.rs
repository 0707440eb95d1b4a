//! Receipt processing configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::mtx::DEFAULT_RECEIPT_HISTORY_CAPACITY;

/// Receipt processing configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ReceiptsConfig {
    /// Number of purchase IDs remembered per player
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl ReceiptsConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_capacity == 0 {
            return Err(ValidationError::InvalidHistoryCapacity);
        }
        Ok(())
    }
}

impl Default for ReceiptsConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_history_capacity() -> usize {
    DEFAULT_RECEIPT_HISTORY_CAPACITY
}
