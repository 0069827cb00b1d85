use crate::{ConnectionId, InboundPayload};

use serde::Deserialize;

/// Client actions understood by the dispatcher.
/// Anything else deserializes to Unknown and is ignored downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Username,
    ListCurrent,
    Left,
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::ListCurrent => "list_current",
            Self::Left => "left",
            Self::Unknown => "unknown",
        }
    }
}

/// A decoded client message queued for the dispatcher,
/// tagged with its originating connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub connection_id: ConnectionId,
    pub action: EventAction,
    pub username: String,
    pub message: String,
}

impl Event {
    pub fn new(connection_id: ConnectionId, payload: InboundPayload) -> Self {
        Self {
            connection_id,
            action: payload.action,
            username: payload.username,
            message: payload.message,
        }
    }

    /// Synthetic departure event, enqueued when a listener tears down
    pub fn left(connection_id: ConnectionId) -> Self {
        Self {
            connection_id,
            action: EventAction::Left,
            username: String::new(),
            message: String::new(),
        }
    }
}
