use crate::Result as WsErrorResult;

use axum::extract::ws::Message;
use serde::{Deserialize, Serialize};

/// One-time message sent to a client right after registration
pub const GREETING: &str = "<em><small>Connected to server!</small></em>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Connected,
    ListUsers,
}

/// Wire format of a server-to-client frame.
/// Built once per broadcast; recipients get copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub action: NotificationKind,
    pub message: String,
    pub message_type: String,
    pub connected_users: Vec<String>,
}

impl Notification {
    /// Greeting frame, no roster
    pub fn greeting() -> Self {
        Self {
            action: NotificationKind::Connected,
            message: String::from(GREETING),
            message_type: String::new(),
            connected_users: Vec::new(),
        }
    }

    /// Roster frame carrying the given user list
    pub fn roster(users: Vec<String>) -> Self {
        Self {
            action: NotificationKind::ListUsers,
            message: String::new(),
            message_type: String::new(),
            connected_users: users,
        }
    }

    /// Serialize into a WebSocket text frame
    pub fn to_message(&self) -> WsErrorResult<Message> {
        let json = serde_json::to_string(self)?;
        Ok(Message::Text(json.into()))
    }
}
