pub mod error;
pub mod health;
pub mod home;
pub mod logger;
pub mod routes;

pub use crate::routes::build_router;

use relay_ws::{AppState, ConnectionConfig, ConnectionRegistry, Event, EventDispatcher, Metrics};

use std::error::Error;

use log::info;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Config first; bad values abort startup
    let config = relay_config::Config::load()?;
    config.validate()?;

    // Logger next, so everything below can log
    logger::init_from_config(&config)?;

    info!("Starting relay-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Channel sizing handed down to relay-ws
    let connection_config = ConnectionConfig {
        send_buffer_size: config.websocket.send_buffer_size,
        event_buffer_size: config.websocket.event_buffer_size,
        write_timeout_ms: config.websocket.write_timeout_ms,
    };

    // Create connection registry and metrics collector
    let registry = ConnectionRegistry::new();
    let metrics = Metrics::default();

    // Event channel: every listener produces, the dispatcher alone consumes
    let (events, events_rx) = mpsc::channel::<Event>(connection_config.event_buffer_size);

    let dispatcher = EventDispatcher::new(
        registry.clone(),
        connection_config.clone(),
        metrics.clone(),
    );

    info!("Starting event dispatcher");
    tokio::spawn(dispatcher.run(events_rx));

    // Build application state
    let app_state = AppState {
        registry,
        events,
        metrics,
        config: connection_config,
    };

    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // local_addr resolves the real port when 0 was requested
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    info!("Server ready to accept connections");
    axum::serve(listener, app).await?;

    Ok(())
}
