//! Request dispatch: one decoded [`ShellRequest`] in, one [`HostReply`] out.
//!
//! Every text frame gets exactly one reply.  A frame that does not decode is
//! answered with `Rejected`, carrying the request id when one can still be
//! read from the raw JSON, so the shell fails its pending check instead of
//! waiting for a timeout.

use tracing::{debug, warn};

use tn_core::{decode_request, HostReply, ShellRequest};

use crate::application::check_config::ConfigProbe;

/// Decodes `text` and answers it.  Blocking: runs the probe.
pub fn handle_request_text(probe: &ConfigProbe, text: &str) -> HostReply {
    match decode_request(text) {
        Ok(request) => handle_request(probe, request),
        Err(e) => {
            let request_id = peek_request_id(text);
            warn!("rejecting request (id {request_id:?}): {e}");
            HostReply::Rejected {
                request_id,
                reason: e.to_string(),
            }
        }
    }
}

/// Answers an already-decoded request.  Blocking: runs the probe.
pub fn handle_request(probe: &ConfigProbe, request: ShellRequest) -> HostReply {
    debug!("handling {} (id {})", request.type_name(), request.request_id());
    match request {
        ShellRequest::CheckConfig {
            request_id,
            file_name,
        } => HostReply::ConfigChecked {
            request_id,
            result: probe.check(file_name.as_deref()),
        },
    }
}

/// Best-effort read of `request_id` from a frame that failed strict decoding.
fn peek_request_id(text: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()?
        .get("request_id")?
        .as_u64()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
