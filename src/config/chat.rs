//! Chat widget configuration

use serde::Deserialize;

use super::error::ValidationError;

pub const MAX_HISTORY_LIMIT: usize = 500;
pub const MAX_TYPING_DELAY_MS: u64 = 10_000;

/// Chat widget configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    /// Simulated typing time before each bot message
    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    /// Messages kept in the conversation history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl ChatConfig {
    /// Validate chat configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::InvalidHistoryLimit {
                got: self.history_limit,
                max: MAX_HISTORY_LIMIT,
            });
        }
        if self.typing_delay_ms > MAX_TYPING_DELAY_MS {
            return Err(ValidationError::TypingDelayTooLong {
                max: MAX_TYPING_DELAY_MS,
            });
        }
        Ok(())
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            typing_delay_ms: default_typing_delay_ms(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_typing_delay_ms() -> u64 {
    600
}

fn default_history_limit() -> usize {
    50
}
