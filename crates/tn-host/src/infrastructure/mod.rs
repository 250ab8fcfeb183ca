//! Infrastructure layer for tn-host.
//!
//! - `storage` resolves the platform configuration directory from the
//!   environment.
//! - `ws_server` binds the boundary socket, upgrades each shell connection to
//!   a WebSocket session, and answers requests on the blocking pool.

pub mod storage;
pub mod ws_server;

pub use ws_server::{run_server, serve};
