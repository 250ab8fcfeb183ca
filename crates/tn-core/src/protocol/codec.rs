//! Strict JSON codec for boundary messages.
//!
//! One function per direction and per side.  Decoding is the only way a
//! message enters either process, and it rejects anything that is not exactly
//! a valid message:
//!
//! - frames larger than [`MAX_FRAME_LEN`],
//! - JSON that does not match the schema (unknown or missing fields, unknown
//!   `type` tags, stringified objects),
//! - [`FileCheckResult`](crate::FileCheckResult) invariant violations,
//! - invalid file-name overrides.
//!
//! Encoding runs the same checks before serializing, so a process never puts
//! a message on the wire that the other side would refuse.

use thiserror::Error;

use crate::domain::file_name::validate_file_name;
use crate::protocol::messages::{HostReply, ShellRequest};

/// Largest text frame either side will encode or decode (8 MiB).
pub const MAX_FRAME_LEN: usize = 8 * 1024 * 1024;

/// Errors from encoding or decoding boundary messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The frame exceeds [`MAX_FRAME_LEN`].
    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    /// The text is not a well-formed message of the expected kind.
    #[error("malformed message: {0}")]
    Malformed(String),

    /// The message parsed but a field value is not allowed.
    #[error("invalid field value: {0}")]
    InvalidField(String),
}

// ── Shell → host ──────────────────────────────────────────────────────────────

/// Serializes a request after validating it.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidField`] for an invalid file-name override.
pub fn encode_request(request: &ShellRequest) -> Result<String, ProtocolError> {
    validate_request(request)?;
    let text = serde_json::to_string(request).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    check_frame_len(text.len())?;
    Ok(text)
}

/// Parses and validates a request received by the host.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the frame is oversized, malformed, or carries
/// an invalid file-name override.
pub fn decode_request(text: &str) -> Result<ShellRequest, ProtocolError> {
    check_frame_len(text.len())?;
    let request: ShellRequest =
        serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    validate_request(&request)?;
    Ok(request)
}

// ── Host → shell ──────────────────────────────────────────────────────────────

/// Serializes a reply after validating it.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidField`] if a `ConfigChecked` result breaks
/// the file-check invariants, or [`ProtocolError::FrameTooLarge`] if the
/// encoded reply is too big to send.
pub fn encode_reply(reply: &HostReply) -> Result<String, ProtocolError> {
    if let HostReply::ConfigChecked { result, .. } = reply {
        result
            .validate()
            .map_err(|e| ProtocolError::InvalidField(e.to_string()))?;
    }
    let text = serde_json::to_string(reply).map_err(|e| ProtocolError::Malformed(e.to_string()))?;
    check_frame_len(text.len())?;
    Ok(text)
}

/// Parses and validates a reply received by the shell.
///
/// Invariant violations inside `result` surface as
/// [`ProtocolError::Malformed`], because they are caught while
/// deserializing.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the frame is oversized or malformed.
pub fn decode_reply(text: &str) -> Result<HostReply, ProtocolError> {
    check_frame_len(text.len())?;
    serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn check_frame_len(len: usize) -> Result<(), ProtocolError> {
    if len > MAX_FRAME_LEN {
        return Err(ProtocolError::FrameTooLarge {
            len,
            max: MAX_FRAME_LEN,
        });
    }
    Ok(())
}

fn validate_request(request: &ShellRequest) -> Result<(), ProtocolError> {
    match request {
        ShellRequest::CheckConfig {
            file_name: Some(name),
            ..
        } => validate_file_name(name).map_err(|e| ProtocolError::InvalidField(e.to_string())),
        ShellRequest::CheckConfig { file_name: None, .. } => Ok(()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
