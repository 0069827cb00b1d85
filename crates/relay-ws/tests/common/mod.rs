#![allow(unused_imports)]

pub(crate) mod test_client;
pub(crate) mod test_server;

pub use test_client::*;
pub use test_server::*;
