use crate::{health, home};

use relay_ws::AppState;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};

/// The full route table: chat page, relay socket, probes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/ws", get(relay_ws::handler))
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        // Browser clients may load the page from anywhere
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
