use crate::EventAction;

use serde::Deserialize;

/// Wire format of a client message.
/// Every field defaults when absent, so partial payloads decode cleanly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InboundPayload {
    pub action: EventAction,
    pub message: String,
    pub username: String,
}
