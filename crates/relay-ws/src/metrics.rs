use metrics::{counter, gauge, histogram};

/// Metrics collector for relay operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "relay_ws" }
    }

    /// Record new connection established
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record event submitted by a listener
    pub fn event_received(&self, action: &str) {
        counter!(format!("{}.events.received", self.prefix)).increment(1);
        counter!(format!("{}.events.received.{}", self.prefix, action)).increment(1);
    }

    /// Record roster broadcast fanout
    pub fn broadcast_published(&self, recipient_count: usize) {
        counter!(format!("{}.broadcast.published", self.prefix)).increment(1);
        gauge!(format!("{}.broadcast.recipients", self.prefix)).set(recipient_count as f64);
    }

    /// Record a recipient dropped during broadcast
    pub fn send_failed(&self, reason: &str) {
        counter!(format!("{}.broadcast.send_failed", self.prefix)).increment(1);
        counter!(format!("{}.broadcast.send_failed.{}", self.prefix, reason)).increment(1);
    }

    /// Record time spent fanning one notification out
    pub fn broadcast_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.broadcast.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
