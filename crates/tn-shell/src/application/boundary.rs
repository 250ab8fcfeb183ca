//! The shell's single call across the process boundary.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use tn_core::{FileCheckResult, ProtocolError};

/// The boundary call could not complete.
///
/// This is distinct from an Unreadable [`FileCheckResult`]: the host never
/// answered (or answered something unusable), so nothing is known about the
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("cannot reach host at {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("failed to send request to host: {0}")]
    Send(String),

    #[error("failed to receive reply from host: {0}")]
    Receive(String),

    #[error("host closed the connection before replying")]
    Closed,

    #[error("host did not reply within {0:?}")]
    Timeout(Duration),

    #[error("could not encode request: {0}")]
    Encode(ProtocolError),

    #[error("invalid reply from host: {0}")]
    Decode(ProtocolError),

    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// Asks the host whether the configuration file exists and what it contains.
///
/// The WebSocket implementation lives in `infrastructure::ws_client`; tests
/// use a mock or a recording double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoundaryClient: Send + Sync {
    /// Performs one check.  No side effects on either side beyond the host
    /// possibly preparing an empty configuration directory.
    async fn check_and_read_config(&self) -> Result<FileCheckResult, TransportError>;
}
