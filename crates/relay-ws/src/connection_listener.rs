use crate::{ConnectionId, Event, InboundPayload, Metrics, Result as WsErrorResult, WsError};

use std::panic::Location;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::StreamExt;
use futures::stream::SplitStream;
use log::{debug, info};
use tokio::sync::mpsc;

/// Read half of one connection: decodes inbound frames and forwards
/// them to the event channel. Never touches the registry; the
/// dispatcher learns about this connection's fate through events.
pub struct ConnectionListener {
    connection_id: ConnectionId,
    events: mpsc::Sender<Event>,
    outbox: mpsc::Sender<Message>,
    metrics: Metrics,
}

impl ConnectionListener {
    pub fn new(
        connection_id: ConnectionId,
        events: mpsc::Sender<Event>,
        outbox: mpsc::Sender<Message>,
        metrics: Metrics,
    ) -> Self {
        Self {
            connection_id,
            events,
            outbox,
            metrics,
        }
    }

    /// Read until the client disconnects, the transport fails, or a
    /// frame fails to decode. Any error return tears the connection down.
    pub async fn run(self, mut receiver: SplitStream<WebSocket>) -> WsErrorResult<()> {
        loop {
            match receiver.next().await {
                Some(Ok(msg)) => self.handle_message(msg).await?,
                Some(Err(e)) => {
                    return Err(WsError::ConnectionClosed {
                        reason: format!("WebSocket error: {e}"),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                None => {
                    info!("Connection {} closed by client", self.connection_id);
                    return Ok(());
                }
            }
        }
    }

    async fn handle_message(&self, msg: Message) -> WsErrorResult<()> {
        match msg {
            Message::Text(text) => self.submit(text.as_str().as_bytes()).await,
            Message::Binary(data) => self.submit(&data).await,
            Message::Ping(data) => {
                self.outbox.send(Message::Pong(data)).await.map_err(|_| {
                    WsError::SendBufferClosed {
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;
                Ok(())
            }
            Message::Pong(_) => Ok(()),
            Message::Close(_) => {
                debug!(
                    "Received close frame from connection {}",
                    self.connection_id
                );
                Ok(())
            }
        }
    }

    /// Decode one frame and queue the event. Suspends when the
    /// dispatcher is behind rather than dropping the event.
    async fn submit(&self, data: &[u8]) -> WsErrorResult<()> {
        let payload: InboundPayload = serde_json::from_slice(data)?;
        let event = Event::new(self.connection_id, payload);

        debug!(
            "Connection {} submitted {} event",
            self.connection_id,
            event.action.as_str()
        );
        self.metrics.event_received(event.action.as_str());

        self.events
            .send(event)
            .await
            .map_err(|_| WsError::EventChannelClosed {
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }
}
