//! Application layer for tn-host.
//!
//! - **`check_config`** – probes the configuration directory and file and
//!   turns what it finds into a `FileCheckResult`.
//! - **`handle_request`** – decodes a shell request, dispatches it to the
//!   probe, and builds the reply.  Malformed requests become `Rejected`
//!   replies instead of dropped connections.
//!
//! Both run synchronously; the infrastructure layer moves them onto the
//! blocking pool.

pub mod check_config;
pub mod handle_request;

pub use check_config::ConfigProbe;
pub use handle_request::{handle_request, handle_request_text};
