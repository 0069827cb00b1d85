use crate::{ConnectionConfig, ConnectionRegistry, Event, EventAction, Metrics, Notification};

use std::time::Instant;

use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendTimeoutError;

/// Single consumer of the event channel. Serializes all steady-state
/// registry mutation: names are set, departures removed, and rosters
/// broadcast from exactly one task.
pub struct EventDispatcher {
    registry: ConnectionRegistry,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl EventDispatcher {
    pub fn new(registry: ConnectionRegistry, config: ConnectionConfig, metrics: Metrics) -> Self {
        Self {
            registry,
            config,
            metrics,
        }
    }

    /// Drain the event channel until every producer is gone
    pub async fn run(self, mut events: mpsc::Receiver<Event>) {
        info!("Event dispatcher started");

        while let Some(event) = events.recv().await {
            self.process(event).await;
        }

        info!("Event dispatcher stopped: all event producers dropped");
    }

    pub async fn process(&self, event: Event) {
        match event.action {
            EventAction::Username => {
                self.registry
                    .set_name(event.connection_id, &event.username)
                    .await;
                self.broadcast_roster().await;
            }
            EventAction::ListCurrent => {
                self.broadcast_roster().await;
            }
            EventAction::Left => {
                self.registry.remove(event.connection_id).await;
                self.broadcast_roster().await;
            }
            EventAction::Unknown => {
                debug!(
                    "Ignoring unknown action from connection {}",
                    event.connection_id
                );
            }
        }
    }

    /// Send the current roster to every live connection.
    /// A recipient that is gone or stalls past the write timeout is
    /// removed mid-loop; the remaining recipients still get their copy.
    async fn broadcast_roster(&self) {
        let started = Instant::now();

        let users = self.registry.snapshot().await;
        let notification = Notification::roster(users);
        let message = match notification.to_message() {
            Ok(message) => message,
            Err(e) => {
                warn!("Failed to encode roster notification: {e}");
                return;
            }
        };

        let recipients = self.registry.senders().await;
        let timeout = self.config.write_timeout();
        let mut delivered = 0usize;

        for (connection_id, sender) in recipients {
            match sender.send_timeout(message.clone(), timeout).await {
                Ok(()) => delivered += 1,
                Err(SendTimeoutError::Timeout(_)) => {
                    warn!(
                        "Send to connection {connection_id} timed out after {}ms, removing",
                        self.config.write_timeout_ms
                    );
                    self.registry.remove(connection_id).await;
                    self.metrics.send_failed("timeout");
                }
                Err(SendTimeoutError::Closed(_)) => {
                    info!("Connection {connection_id} gone, removing");
                    self.registry.remove(connection_id).await;
                    self.metrics.send_failed("closed");
                }
            }
        }

        self.metrics.broadcast_published(delivered);
        self.metrics.broadcast_latency(started.elapsed());
        debug!("Roster broadcast delivered to {delivered} connections");
    }
}
