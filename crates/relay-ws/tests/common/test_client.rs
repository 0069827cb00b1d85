#![allow(dead_code)]

use relay_ws::{GREETING, Notification, NotificationKind};

use axum_test::{TestServer, TestWebSocket, WsMessage};
use serde_json::json;
use tokio::time::{Duration, timeout};

/// How long a single receive may take before the test gives up
const RECEIVE_TIMEOUT: Duration = Duration::from_secs(2);

/// WebSocket test client wrapper speaking the chat wire format
pub struct WsTestClient {
    ws: TestWebSocket,
}

impl WsTestClient {
    /// Connect to the WebSocket endpoint
    pub async fn connect(server: &TestServer) -> Self {
        let ws = server.get_websocket("/ws").await.into_websocket().await;

        Self { ws }
    }

    /// Announce a display name
    pub async fn announce(&mut self, username: &str) {
        self.send_json(&json!({ "action": "username", "username": username }))
            .await;
    }

    /// Ask the server to rebroadcast the current roster
    pub async fn request_roster(&mut self) {
        self.send_json(&json!({ "action": "list_current" })).await;
    }

    /// Announce departure without closing the socket
    pub async fn leave(&mut self) {
        self.send_json(&json!({ "action": "left" })).await;
    }

    /// Send a JSON value as a text frame
    pub async fn send_json(&mut self, value: &serde_json::Value) {
        self.ws.send_text(value.to_string()).await;
    }

    /// Send a raw text frame (for malformed-input tests)
    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    /// Send a raw frame
    pub async fn send_message(&mut self, message: WsMessage) {
        self.ws.send_message(message).await;
    }

    /// Receive and decode the next server notification
    pub async fn receive_notification(&mut self) -> Notification {
        let text = match timeout(RECEIVE_TIMEOUT, self.ws.receive_text()).await {
            Ok(text) => text,
            Err(_) => panic!("Timed out waiting for a server notification"),
        };

        serde_json::from_str(&text).expect("Server sent a frame that is not a notification")
    }

    /// Receive a raw frame
    pub async fn receive_message(&mut self) -> WsMessage {
        match timeout(RECEIVE_TIMEOUT, self.ws.receive_message()).await {
            Ok(message) => message,
            Err(_) => panic!("Timed out waiting for a server frame"),
        }
    }

    /// Assert the next frame is the connection greeting
    pub async fn expect_greeting(&mut self) {
        let notification = self.receive_notification().await;

        assert_eq!(notification.action, NotificationKind::Connected);
        assert_eq!(notification.message, GREETING);
        assert!(notification.connected_users.is_empty());
    }

    /// Drain roster frames until one matches the expected user list.
    /// Interleaved broadcasts from other clients make the frame count
    /// nondeterministic, so tests assert on the final state instead.
    pub async fn receive_roster_until(&mut self, expected: &[&str]) -> Notification {
        for _ in 0..50 {
            let notification = self.receive_notification().await;
            if roster_matches(&notification, expected) {
                return notification;
            }
        }

        panic!("No roster matching {expected:?} arrived within 50 frames");
    }

    /// Close the WebSocket connection
    pub async fn close(self) {
        self.ws.close().await;
    }

    /// Get mutable reference to underlying TestWebSocket for advanced usage
    pub fn ws_mut(&mut self) -> &mut TestWebSocket {
        &mut self.ws
    }
}

fn roster_matches(notification: &Notification, expected: &[&str]) -> bool {
    notification.action == NotificationKind::ListUsers
        && notification.connected_users.len() == expected.len()
        && notification
            .connected_users
            .iter()
            .zip(expected)
            .all(|(actual, wanted)| actual.as_str() == *wanted)
}
