#![allow(dead_code)]

use relay_ws::{AppState, ConnectionConfig, ConnectionRegistry, Event, EventDispatcher, Metrics};

use axum::{Router, routing::get};
use axum_test::TestServer;
use tokio::sync::mpsc;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub send_buffer_size: usize,
    pub event_buffer_size: usize,
    pub write_timeout_ms: u64,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            send_buffer_size: 100,
            event_buffer_size: 256,
            // Short enough that a stalled-recipient test finishes quickly
            write_timeout_ms: 1000,
        }
    }
}

impl TestServerConfig {
    /// Create config with tiny buffers (for backpressure tests)
    pub fn with_small_buffers() -> Self {
        Self {
            send_buffer_size: 1,
            event_buffer_size: 1,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

/// Create a TestServer with default configuration
pub fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default())
}

/// Create a TestServer with custom configuration
pub fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let (app, app_state) = create_app(config);
    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

/// Poll the registry until it settles at the expected connection count.
/// Teardown runs on server tasks, so tests cannot observe it synchronously.
pub async fn wait_for_connection_count(app_state: &AppState, expected: usize) {
    for _ in 0..50 {
        if app_state.registry.total_count().await == expected {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    let actual = app_state.registry.total_count().await;
    assert_eq!(
        actual, expected,
        "Registry did not settle at {expected} connections"
    );
}

/// Build the Axum Router with AppState and a running dispatcher
fn create_app(config: TestServerConfig) -> (Router, AppState) {
    let connection_config = ConnectionConfig {
        send_buffer_size: config.send_buffer_size,
        event_buffer_size: config.event_buffer_size,
        write_timeout_ms: config.write_timeout_ms,
    };

    let registry = ConnectionRegistry::new();
    let metrics = Metrics::default();

    // Dispatcher task lives as long as AppState holds the sender
    let (events, events_rx) = mpsc::channel::<Event>(connection_config.event_buffer_size);
    let dispatcher = EventDispatcher::new(
        registry.clone(),
        connection_config.clone(),
        metrics.clone(),
    );
    tokio::spawn(dispatcher.run(events_rx));

    let app_state = AppState {
        registry,
        events,
        metrics,
        config: connection_config,
    };

    let router = Router::new()
        .route("/ws", get(relay_ws::handler))
        .with_state(app_state.clone());

    (router, app_state)
}
