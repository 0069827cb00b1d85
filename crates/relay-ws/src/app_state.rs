use crate::{
    ConnectionConfig, ConnectionListener, ConnectionRegistry, Event, Metrics, Notification,
    Result as WsErrorResult, WsError,
};

use std::panic::Location;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt, stream::SplitSink};
use log::{error, info, warn};
use tokio::sync::mpsc;

/// Shared application state for WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: ConnectionRegistry,
    /// Producer side of the dispatcher's event channel
    pub events: mpsc::Sender<Event>,
    pub metrics: Metrics,
    pub config: ConnectionConfig,
}

/// WebSocket upgrade handler
pub async fn handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle WebSocket connection after upgrade: register, greet, run the
/// supervised read loop, then hand the departure to the dispatcher.
async fn handle_socket(socket: WebSocket, state: AppState) {
    state.metrics.connection_established();

    let (ws_sender, ws_receiver) = socket.split();

    // Bounded outbox: broadcasts queue here and a pump task drains
    // them onto the socket, so a slow client stalls only itself
    let (tx, rx) = mpsc::channel::<Message>(state.config.send_buffer_size);

    let connection_id = state.registry.register(tx.clone()).await;
    let send_task = tokio::spawn(pump_outbound(rx, ws_sender));

    if let Err(e) = send_greeting(&tx).await {
        error!("Failed to greet connection {connection_id}: {e}");
    }

    // The listener runs in its own task so a panic inside it is
    // contained here and handled as an ordinary disconnect
    let listener = ConnectionListener::new(
        connection_id,
        state.events.clone(),
        tx.clone(),
        state.metrics.clone(),
    );
    let outcome = tokio::spawn(listener.run(ws_receiver)).await;

    let reason = match outcome {
        Ok(Ok(())) => "client_closed",
        Ok(Err(e)) => {
            info!("Connection {connection_id} listener ended: {e}");
            "error"
        }
        Err(join_error) => {
            let panic_msg = if join_error.is_panic() {
                match join_error.into_panic().downcast::<String>() {
                    Ok(msg) => *msg,
                    Err(any) => match any.downcast::<&str>() {
                        Ok(msg) => msg.to_string(),
                        Err(_) => "Unknown panic".to_string(),
                    },
                }
            } else {
                "Task cancelled".to_string()
            };
            error!("Connection {connection_id} listener panicked: {panic_msg}");
            "panic"
        }
    };

    // Removal belongs to the dispatcher; it learns of the departure
    // from this event and broadcasts the shrunken roster
    if state.events.send(Event::left(connection_id)).await.is_err() {
        warn!("Event channel closed, removing connection {connection_id} directly");
        state.registry.remove(connection_id).await;
    }

    // Once the registry entry is gone every sender is dropped and the
    // pump drains out
    drop(tx);
    let _ = send_task.await;

    state.metrics.connection_closed(reason);
    info!("Connection {connection_id} closed ({reason})");
}

/// Forward queued messages onto the socket until the channel closes
/// or the client stops accepting writes
async fn pump_outbound(mut rx: mpsc::Receiver<Message>, mut ws_sender: SplitSink<WebSocket, Message>) {
    while let Some(msg) = rx.recv().await {
        if ws_sender.send(msg).await.is_err() {
            break;
        }
    }
}

async fn send_greeting(tx: &mpsc::Sender<Message>) -> WsErrorResult<()> {
    let message = Notification::greeting().to_message()?;

    tx.send(message)
        .await
        .map_err(|_| WsError::SendBufferClosed {
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}
