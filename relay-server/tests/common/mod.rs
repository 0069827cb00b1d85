#![allow(dead_code)]

//! Test infrastructure for relay-server route tests

use relay_ws::{AppState, ConnectionConfig, ConnectionRegistry, Event, EventDispatcher, Metrics};

use tokio::sync::mpsc;

/// Create AppState for testing, with a live dispatcher draining events
pub fn create_test_app_state() -> AppState {
    let config = ConnectionConfig::default();
    let registry = ConnectionRegistry::new();
    let metrics = Metrics::default();

    let (events, events_rx) = mpsc::channel::<Event>(config.event_buffer_size);
    let dispatcher = EventDispatcher::new(registry.clone(), config.clone(), metrics.clone());
    tokio::spawn(dispatcher.run(events_rx));

    AppState {
        registry,
        events,
        metrics,
        config,
    }
}
