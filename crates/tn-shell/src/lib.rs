//! tn-shell library crate.
//!
//! The shell is the UI-facing half of Twitch Notifications.  It never reads
//! the disk; at startup it asks the host for the configuration file over a
//! local WebSocket and decides which screen to show first.
//!
//! # Architecture
//!
//! ```text
//! [tn-shell]
//!   ├── application/
//!   │     ├── boundary   BoundaryClient trait, TransportError
//!   │     └── startup    StartupState, decide(), StartupController
//!   └── infrastructure/
//!         ├── ws_client  WebSocket BoundaryClient
//!         └── ui_bridge  UI commands and state DTOs
//!         ↕  (JSON over WebSocket)
//! tn-host
//! ```
//!
//! The application layer depends only on the `BoundaryClient` trait, so the
//! startup logic is tested without a host.

pub mod application;
pub mod infrastructure;
