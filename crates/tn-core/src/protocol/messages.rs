//! JSON messages exchanged between the shell and the host.
//!
//! Every message is a JSON object whose `"type"` field names the variant:
//!
//! ```json
//! {"type":"CheckConfig","request_id":1,"file_name":null}
//! {"type":"ConfigChecked","request_id":1,"result":{"exists":false,"content":"","error":"","errorType":""}}
//! {"type":"Rejected","request_id":null,"reason":"malformed message: ..."}
//! ```
//!
//! Requests and replies are separate enums so the host cannot send a request
//! and the shell cannot send a reply.

use serde::{Deserialize, Serialize};

use crate::domain::FileCheckResult;

/// Messages the shell sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum ShellRequest {
    /// Check for the configuration file and read it if present.
    CheckConfig {
        /// Echoed back in the reply so the shell can match it.
        request_id: u64,
        /// Optional override of the host's default file name.  Must be a
        /// single path component.
        file_name: Option<String>,
    },
}

impl ShellRequest {
    pub fn request_id(&self) -> u64 {
        match self {
            ShellRequest::CheckConfig { request_id, .. } => *request_id,
        }
    }

    /// Variant name for log lines.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShellRequest::CheckConfig { .. } => "CheckConfig",
        }
    }
}

/// Messages the host sends to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum HostReply {
    /// Result of a `CheckConfig` request.
    ConfigChecked {
        request_id: u64,
        result: FileCheckResult,
    },

    /// The host could not process a request (malformed, invalid field).
    ///
    /// `request_id` is `None` when the request was too broken to read one.
    Rejected {
        request_id: Option<u64>,
        reason: String,
    },
}

impl HostReply {
    pub fn request_id(&self) -> Option<u64> {
        match self {
            HostReply::ConfigChecked { request_id, .. } => Some(*request_id),
            HostReply::Rejected { request_id, .. } => *request_id,
        }
    }

    /// Variant name for log lines.  Never includes config contents.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostReply::ConfigChecked { .. } => "ConfigChecked",
            HostReply::Rejected { .. } => "Rejected",
        }
    }
}
