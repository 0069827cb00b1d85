use crate::ConnectionId;

use axum::extract::ws::Message;
use chrono::DateTime;
use tokio::sync::mpsc;

/// Information about an active connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connection_id: ConnectionId,
    /// Empty until the client announces a username
    pub display_name: String,
    pub connected_at: DateTime<chrono::Utc>,
    /// Handle to the connection's outbound message pump
    pub sender: mpsc::Sender<Message>,
}
