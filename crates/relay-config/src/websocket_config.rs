use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Send buffer size constraints
pub const MIN_SEND_BUFFER_SIZE: usize = 1;
pub const MAX_SEND_BUFFER_SIZE: usize = 10000;
pub const DEFAULT_SEND_BUFFER_SIZE: usize = 100;

// Event channel capacity constraints
pub const MIN_EVENT_BUFFER_SIZE: usize = 1;
pub const MAX_EVENT_BUFFER_SIZE: usize = 65536;
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 256;

// Broadcast write timeout constraints (milliseconds)
pub const MIN_WRITE_TIMEOUT_MS: u64 = 100;
pub const MAX_WRITE_TIMEOUT_MS: u64 = 60000;
pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 5000;

/// Buffering and timeout knobs for the relay's channels.
/// Everything is range-checked at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    /// Per-connection outbound buffer size
    pub send_buffer_size: usize,
    /// Shared event channel capacity
    pub event_buffer_size: usize,
    /// Broadcast write timeout in milliseconds
    pub write_timeout_ms: u64,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: DEFAULT_SEND_BUFFER_SIZE,
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
        }
    }
}

impl WebSocketConfig {
    /// Validate all fields are within acceptable ranges.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.send_buffer_size < MIN_SEND_BUFFER_SIZE
            || self.send_buffer_size > MAX_SEND_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "websocket.send_buffer_size must be {}-{}, got {}",
                MIN_SEND_BUFFER_SIZE, MAX_SEND_BUFFER_SIZE, self.send_buffer_size
            )));
        }

        if self.event_buffer_size < MIN_EVENT_BUFFER_SIZE
            || self.event_buffer_size > MAX_EVENT_BUFFER_SIZE
        {
            return Err(ConfigError::config(format!(
                "websocket.event_buffer_size must be {}-{}, got {}",
                MIN_EVENT_BUFFER_SIZE, MAX_EVENT_BUFFER_SIZE, self.event_buffer_size
            )));
        }

        if self.write_timeout_ms < MIN_WRITE_TIMEOUT_MS
            || self.write_timeout_ms > MAX_WRITE_TIMEOUT_MS
        {
            return Err(ConfigError::config(format!(
                "websocket.write_timeout_ms must be {}-{}, got {}",
                MIN_WRITE_TIMEOUT_MS, MAX_WRITE_TIMEOUT_MS, self.write_timeout_ms
            )));
        }

        Ok(())
    }
}
