//! tn-host library crate.
//!
//! The host is the half of Twitch Notifications that is allowed to touch the
//! disk.  It listens on a local WebSocket, and for every `CheckConfig`
//! request from the shell it probes the configuration location and answers
//! with a `FileCheckResult`.
//!
//! # Architecture
//!
//! ```text
//! tn-shell  (JSON over WebSocket)
//!         ↕
//! [tn-host]
//!   ├── domain/          HostConfig: where to look, what limits apply
//!   ├── application/     ConfigProbe (disk → FileCheckResult), request handling
//!   └── infrastructure/
//!         ├── storage/   Platform config directory resolution
//!         └── ws_server/ WebSocket accept loop and per-shell sessions
//! ```
//!
//! `domain` does no I/O.  `application` does blocking file-system reads but
//! knows nothing about sockets.  `infrastructure` owns the runtime and the
//! network.

pub mod application;
pub mod domain;
pub mod infrastructure;
