//! Infrastructure layer for tn-shell.
//!
//! - `ws_client` implements `BoundaryClient` over a WebSocket to the host.
//! - `ui_bridge` exposes the startup state to the UI as uniform command
//!   results.

pub mod ui_bridge;
pub mod ws_client;

pub use ws_client::{BoundaryConfig, WsBoundaryClient};
