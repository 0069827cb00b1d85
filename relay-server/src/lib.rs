pub mod error;
pub mod health;
pub mod home;
pub mod logger;
pub mod routes;

pub use error::{Result as ServerErrorResult, ServerError};

pub use crate::routes::build_router;
