//! WebSocket server: accept loop and per-shell sessions.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting connections from the shell and upgrading each one to a
//!    WebSocket session.
//! 3. Answering every text frame with exactly one JSON reply.  The disk
//!    probe runs on Tokio's blocking pool so a slow disk never stalls the
//!    runtime's worker threads.
//! 4. Stopping the accept loop when the `running` flag is cleared.
//!
//! Sessions are independent: each runs in its own task and ends when the
//! shell closes its side.  Several shells (or a shell and a test) can be
//! connected at once.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{accept_async, tungstenite::Message as WsMessage};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use tn_core::{encode_reply, FileCheckResult, FileErrorKind, HostReply, ProtocolError};

use crate::application::{handle_request_text, ConfigProbe};
use crate::domain::HostConfig;

/// How long one `accept()` may block before the loop rechecks `running`.
const ACCEPT_POLL: Duration = Duration::from_millis(200);

// ── Public API ────────────────────────────────────────────────────────────────

/// Binds `config.bind_addr` and serves shell sessions until `running` is
/// cleared.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the listener cannot be
/// bound (port in use, no permission).
pub async fn run_server(config: HostConfig, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    config.validate().context("invalid host configuration")?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind boundary listener on {}", config.bind_addr))?;

    info!(
        "host listening on {} (config dir {})",
        config.bind_addr,
        config.config_dir.display()
    );

    let probe = Arc::new(ConfigProbe::new(&config));
    serve(listener, probe, running).await
}

/// Runs the accept loop on an already-bound listener.
///
/// Split out from [`run_server`] so tests can bind port 0 and learn the
/// address before the loop starts.
///
/// # Errors
///
/// Currently never fails; accept errors are logged and the loop continues.
pub async fn serve(
    listener: TcpListener,
    probe: Arc<ConfigProbe>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    loop {
        if !running.load(Ordering::Relaxed) {
            info!("shutdown flag set; stopping accept loop");
            break;
        }

        match timeout(ACCEPT_POLL, listener.accept()).await {
            Ok(Ok((stream, peer_addr))) => {
                let probe = Arc::clone(&probe);
                tokio::spawn(async move {
                    handle_shell_session(stream, peer_addr, probe).await;
                });
            }
            Ok(Err(e)) => {
                // Transient (e.g. out of file descriptors); keep serving.
                error!("accept error: {e}");
            }
            Err(_) => {}
        }
    }

    Ok(())
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Entry point of each session task; logs how the session ended.
async fn handle_shell_session(stream: TcpStream, peer_addr: SocketAddr, probe: Arc<ConfigProbe>) {
    let session_id = Uuid::new_v4();
    info!("session {session_id}: shell connected from {peer_addr}");

    match run_session(stream, session_id, probe).await {
        Ok(()) => info!("session {session_id}: closed normally"),
        Err(e) => warn!("session {session_id}: closed with error: {e:#}"),
    }
}

/// Completes the handshake, then answers frames until the shell closes.
///
/// # Errors
///
/// Returns an error if the handshake fails, the stream errors, or a reply
/// cannot be sent.
async fn run_session(
    stream: TcpStream,
    session_id: Uuid,
    probe: Arc<ConfigProbe>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream)
        .await
        .context("WebSocket handshake failed")?;
    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    while let Some(frame) = ws_rx.next().await {
        let frame = frame.context("WebSocket receive failed")?;

        let reply = match frame {
            WsMessage::Text(text) => {
                let probe = Arc::clone(&probe);
                tokio::task::spawn_blocking(move || handle_request_text(&probe, &text))
                    .await
                    .context("request handler panicked")?
            }
            WsMessage::Binary(data) => {
                warn!(
                    "session {session_id}: unexpected binary frame ({} bytes)",
                    data.len()
                );
                HostReply::Rejected {
                    request_id: None,
                    reason: "binary frames are not supported".to_string(),
                }
            }
            WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {
                // tungstenite answers pings itself on the next write or flush.
                continue;
            }
            WsMessage::Close(_) => {
                debug!("session {session_id}: close frame received");
                break;
            }
        };

        debug!(
            "session {session_id}: replying {} (id {:?})",
            reply.type_name(),
            reply.request_id()
        );
        let text = encode_for_wire(reply)?;
        ws_tx
            .send(WsMessage::Text(text))
            .await
            .context("failed to send reply")?;
    }

    Ok(())
}

/// Encodes `reply`, downgrading it when it cannot be sent as is.
///
/// A check result too big for one frame becomes a `tooLarge` result for the
/// same request; any other encode failure becomes `Rejected`.
fn encode_for_wire(reply: HostReply) -> anyhow::Result<String> {
    let request_id = reply.request_id();
    let fallback = match encode_reply(&reply) {
        Ok(text) => return Ok(text),
        Err(e @ ProtocolError::FrameTooLarge { .. }) => match reply {
            HostReply::ConfigChecked { request_id, .. } => HostReply::ConfigChecked {
                request_id,
                result: FileCheckResult::unreadable(FileErrorKind::TooLarge, e.to_string()),
            },
            HostReply::Rejected { .. } => rejected(request_id, &e),
        },
        Err(e) => {
            error!("reply failed validation: {e}");
            rejected(request_id, &e)
        }
    };
    encode_reply(&fallback).context("failed to encode fallback reply")
}

fn rejected(request_id: Option<u64>, e: &ProtocolError) -> HostReply {
    HostReply::Rejected {
        request_id,
        reason: format!("host could not encode reply: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
