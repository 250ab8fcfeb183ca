//! Application layer for tn-shell.
//!
//! - **`boundary`** – the one call the shell makes to the host, as a trait.
//! - **`startup`** – maps the host's answer to the first UI state and owns
//!   that state for the lifetime of the shell.

pub mod boundary;
pub mod startup;

pub use boundary::{BoundaryClient, TransportError};
pub use startup::{decide, decide_outcome, ErrorType, StartupController, StartupState};
