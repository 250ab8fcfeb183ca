//! WebSocket implementation of [`BoundaryClient`].
//!
//! Each check opens a short-lived connection to the host, sends one
//! `CheckConfig` request, and waits for the reply carrying the same request
//! id.  Replies for other ids are stale and skipped.  The whole exchange,
//! connect included, is bounded by [`BoundaryConfig::timeout`].

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tracing::{debug, warn};

use tn_core::{
    decode_reply, encode_request, validate_file_name, FileCheckResult, FileNameError, HostReply,
    RequestCounter, ShellRequest,
};

use crate::application::boundary::{BoundaryClient, TransportError};

/// Default host URL; matches the host's default bind address.
pub const DEFAULT_HOST_URL: &str = "ws://127.0.0.1:24810";
/// Default bound on one check, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how the shell reaches the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryConfig {
    pub host_url: String,
    pub timeout: Duration,
    /// Asks the host for a file other than its default.  Single path
    /// component only.
    pub file_name: Option<String>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            host_url: DEFAULT_HOST_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            file_name: None,
        }
    }
}

/// Talks to the host over WebSocket.
#[derive(Debug)]
pub struct WsBoundaryClient {
    config: BoundaryConfig,
    ids: RequestCounter,
}

impl WsBoundaryClient {
    /// # Errors
    ///
    /// Returns [`FileNameError`] if the configured file-name override is not
    /// a single path component.
    pub fn new(config: BoundaryConfig) -> Result<Self, FileNameError> {
        if let Some(name) = &config.file_name {
            validate_file_name(name)?;
        }
        Ok(Self {
            config,
            ids: RequestCounter::new(),
        })
    }

    async fn exchange(&self, request_id: u64, text: String) -> Result<FileCheckResult, TransportError> {
        let url = self.config.host_url.as_str();
        let (mut ws, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::Connect {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        debug!("connected to host at {url}; sending request {request_id}");

        ws.send(WsMessage::Text(text))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        let outcome = loop {
            let frame = match ws.next().await {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => break Err(TransportError::Receive(e.to_string())),
                None => break Err(TransportError::Closed),
            };

            let text = match frame {
                WsMessage::Text(text) => text,
                WsMessage::Close(_) => break Err(TransportError::Closed),
                WsMessage::Binary(_) => {
                    warn!("ignoring binary frame from host");
                    continue;
                }
                WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => continue,
            };

            match decode_reply(&text).map_err(TransportError::Decode)? {
                HostReply::ConfigChecked { request_id: id, result } if id == request_id => {
                    break Ok(result);
                }
                HostReply::Rejected { request_id: id, reason }
                    if id.is_none() || id == Some(request_id) =>
                {
                    break Err(TransportError::Rejected(reason));
                }
                stale => {
                    debug!(
                        "skipping stale {} for request {:?}",
                        stale.type_name(),
                        stale.request_id()
                    );
                }
            }
        };

        // The reply is in hand; a failed close changes nothing.
        if let Err(e) = ws.close(None).await {
            debug!("closing host connection: {e}");
        }
        outcome
    }
}

#[async_trait]
impl BoundaryClient for WsBoundaryClient {
    async fn check_and_read_config(&self) -> Result<FileCheckResult, TransportError> {
        let request_id = self.ids.next();
        let request = ShellRequest::CheckConfig {
            request_id,
            file_name: self.config.file_name.clone(),
        };
        let text = encode_request(&request).map_err(TransportError::Encode)?;

        timeout(self.config.timeout, self.exchange(request_id, text))
            .await
            .map_err(|_| TransportError::Timeout(self.config.timeout))?
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
