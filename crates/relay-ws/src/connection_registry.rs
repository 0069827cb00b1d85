use crate::{ConnectionId, ConnectionInfo};

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use axum::extract::ws::Message;
use log::{debug, info};
use tokio::sync::{RwLock, mpsc};

/// Registry for tracking active WebSocket connections.
/// All access goes through an explicit lock; the registry is shared
/// between the accept path and the event dispatcher.
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

struct RegistryInner {
    /// All active connections by connection_id
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                connections: HashMap::new(),
            })),
        }
    }

    /// Register a new connection with an empty display name
    pub async fn register(&self, sender: mpsc::Sender<Message>) -> ConnectionId {
        let mut inner = self.inner.write().await;

        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id,
            display_name: String::new(),
            connected_at: chrono::Utc::now(),
            sender,
        };

        inner.connections.insert(connection_id, info);
        info!(
            "Registered connection {connection_id} ({} total)",
            inner.connections.len()
        );

        connection_id
    }

    /// Set the display name for a connection. No-op for an absent id.
    pub async fn set_name(&self, connection_id: ConnectionId, name: &str) {
        let mut inner = self.inner.write().await;

        if let Some(info) = inner.connections.get_mut(&connection_id) {
            debug!("Connection {connection_id} announced as {name:?}");
            info.display_name = name.to_string();
        }
    }

    /// Remove a connection. Absence is not an error.
    pub async fn remove(&self, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        if inner.connections.remove(&connection_id).is_some() {
            info!(
                "Removed connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
    }

    /// Current roster: non-empty display names, deduplicated, sorted ascending
    pub async fn snapshot(&self) -> Vec<String> {
        let inner = self.inner.read().await;

        let names: BTreeSet<&str> = inner
            .connections
            .values()
            .map(|info| info.display_name.as_str())
            .filter(|name| !name.is_empty())
            .collect();

        names.into_iter().map(String::from).collect()
    }

    /// Outbound handles for every live connection, for broadcast fanout
    pub async fn senders(&self) -> Vec<(ConnectionId, mpsc::Sender<Message>)> {
        let inner = self.inner.read().await;

        inner
            .connections
            .values()
            .map(|info| (info.connection_id, info.sender.clone()))
            .collect()
    }

    /// Get information about a specific connection
    pub async fn get(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        let inner = self.inner.read().await;
        inner.connections.get(&connection_id).cloned()
    }

    /// Get total connection count
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.connections.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
