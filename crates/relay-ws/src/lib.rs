pub mod app_state;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_listener;
pub mod connection_registry;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod inbound_payload;
pub mod metrics;
pub mod notification;

pub use app_state::{AppState, handler};
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_listener::ConnectionListener;
pub use connection_registry::ConnectionRegistry;
pub use dispatcher::EventDispatcher;
pub use error::{Result, WsError};
pub use event::{Event, EventAction};
pub use inbound_payload::InboundPayload;
pub use metrics::Metrics;
pub use notification::{GREETING, Notification, NotificationKind};
