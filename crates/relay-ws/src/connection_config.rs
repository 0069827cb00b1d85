use std::time::Duration;

/// Configuration for WebSocket connections
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Send buffer size (bounded to handle backpressure)
    pub send_buffer_size: usize,
    /// Capacity of the event channel shared by all listeners
    pub event_buffer_size: usize,
    /// How long a broadcast waits on one recipient before pruning it
    pub write_timeout_ms: u64,
}

impl ConnectionConfig {
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            event_buffer_size: 256,
            write_timeout_ms: 5000,
        }
    }
}
