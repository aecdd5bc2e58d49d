//! Desktop and terminal client for the Phoenix AI code scanning service.
//!
//! The `client` module holds the scan controller, the HTTP backend and the
//! iced front end. `common` carries the wire models shared by both binaries.

pub mod common;
#[cfg(feature = "client")]
pub mod client;
