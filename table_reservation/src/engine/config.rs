//! Engine configuration.

use std::{env, time::Duration};

/// Default inbound channel capacity
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Default deadline for a request/response exchange
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Outstanding requests the inbound channel holds before producers wait
    pub channel_capacity: usize,

    /// Deadline for enqueueing a request and receiving its response
    pub response_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `ENGINE_CHANNEL_CAPACITY`: Inbound channel capacity (default: 100)
    /// - `ENGINE_RESPONSE_TIMEOUT_MS`: Response deadline in milliseconds (default: 5000)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let channel_capacity = env::var("ENGINE_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);

        let response_timeout = env::var("ENGINE_RESPONSE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESPONSE_TIMEOUT);

        Self {
            channel_capacity,
            response_timeout,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        // tokio::sync::mpsc::channel panics on a zero capacity
        if self.channel_capacity == 0 {
            return Err("Channel capacity must be greater than 0".to_string());
        }

        if self.response_timeout.is_zero() {
            return Err("Response timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
