//! The file-check result exchanged between host and shell.
//!
//! A [`FileCheckResult`] is built fresh by the host for every check request
//! and consumed exactly once by the shell at startup.  On the wire it is a
//! flat JSON object:
//!
//! ```json
//! {"exists":true,"content":"port=8080","error":"","errorType":""}
//! ```
//!
//! # The three logical states
//!
//! | State      | `exists` | `error`   | `content`  |
//! |------------|----------|-----------|------------|
//! | Absent     | `false`  | empty     | ignored    |
//! | Loaded     | `true`   | empty     | valid      |
//! | Unreadable | `true`   | non-empty | ignored    |
//!
//! Deserialization goes through a single strict path: the wire struct is
//! parsed with unknown fields denied and every field required, then converted
//! with [`TryFrom`], which enforces the invariants above.  A payload that
//! violates them is a decode error, never a silently defaulted value.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error category tag reserved for boundary failures on the shell side.
///
/// The host can never produce it; decoding a host payload carrying this tag
/// fails with [`FileCheckError::ReservedErrorType`].
pub const TRANSPORT_ERROR_TAG: &str = "transport";

/// Closed set of reasons the host can give for an unreadable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileErrorKind {
    /// The configuration directory exists but is not a directory, or could
    /// not be inspected.
    Directory,
    /// The OS denied access to the directory or the file.
    Permission,
    /// The configuration path exists but is not a regular file.
    NotAFile,
    /// The file is larger than the host is willing to send.
    TooLarge,
    /// The file is not valid UTF-8 text.
    Corrupt,
    /// Any other I/O failure.
    Other,
}

impl FileErrorKind {
    /// Every variant, in declaration order.
    pub const ALL: [FileErrorKind; 6] = [
        FileErrorKind::Directory,
        FileErrorKind::Permission,
        FileErrorKind::NotAFile,
        FileErrorKind::TooLarge,
        FileErrorKind::Corrupt,
        FileErrorKind::Other,
    ];

    /// Returns the wire tag for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            FileErrorKind::Directory => "directory",
            FileErrorKind::Permission => "permission",
            FileErrorKind::NotAFile => "notAFile",
            FileErrorKind::TooLarge => "tooLarge",
            FileErrorKind::Corrupt => "corrupt",
            FileErrorKind::Other => "other",
        }
    }

    /// Parses a wire tag.  Returns `None` for anything outside the closed set,
    /// including the reserved `transport` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a wire payload is not a valid [`FileCheckResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileCheckError {
    /// `errorType` is not one of the [`FileErrorKind`] tags.
    #[error("unknown errorType tag '{0}'")]
    UnknownErrorType(String),

    /// `errorType` carries the shell-only `transport` tag.
    #[error("errorType '{0}' is reserved and cannot come from the host")]
    ReservedErrorType(String),

    /// `error` is set but `errorType` is empty.
    #[error("error message is set but errorType is empty")]
    MissingErrorType,

    /// `errorType` is set but `error` is empty.
    #[error("errorType '{0}' is set but the error message is empty")]
    MissingErrorMessage(FileErrorKind),

    /// An error was reported for a file that does not exist.
    #[error("an error was reported but exists is false")]
    ErrorWithoutFile,
}

/// Outcome of a configuration-file check, as produced by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FileCheckWire", into = "FileCheckWire")]
pub struct FileCheckResult {
    /// Whether the target file is present on the host.
    pub exists: bool,
    /// File contents.  Only meaningful in the Loaded state.
    pub content: String,
    /// Human-readable error description, empty when there is no error.
    pub error: String,
    /// Error category, `None` when there is no error.
    pub error_type: Option<FileErrorKind>,
}

/// Borrowed view of the logical state a [`FileCheckResult`] is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCheckOutcome<'a> {
    /// No configuration file yet; first-run setup is needed.
    Absent,
    /// The file was read; carries its contents.
    Loaded(&'a str),
    /// The file exists but could not be read.
    Unreadable {
        kind: FileErrorKind,
        message: &'a str,
    },
}

impl FileCheckResult {
    /// The file does not exist.
    pub fn absent() -> Self {
        Self {
            exists: false,
            content: String::new(),
            error: String::new(),
            error_type: None,
        }
    }

    /// The file exists and was read successfully.
    pub fn loaded(content: impl Into<String>) -> Self {
        Self {
            exists: true,
            content: content.into(),
            error: String::new(),
            error_type: None,
        }
    }

    /// The file exists but reading it failed.
    pub fn unreadable(kind: FileErrorKind, message: impl Into<String>) -> Self {
        Self {
            exists: true,
            content: String::new(),
            error: message.into(),
            error_type: Some(kind),
        }
    }

    /// Classifies the result into one of the three logical states.
    ///
    /// `exists == false` always reads as [`FileCheckOutcome::Absent`]; the
    /// content and error fields are not consulted.  An Unreadable value
    /// built by hand without a kind is reported as [`FileErrorKind::Other`].
    pub fn outcome(&self) -> FileCheckOutcome<'_> {
        if !self.exists {
            return FileCheckOutcome::Absent;
        }
        if self.error.is_empty() {
            FileCheckOutcome::Loaded(&self.content)
        } else {
            FileCheckOutcome::Unreadable {
                kind: self.error_type.unwrap_or(FileErrorKind::Other),
                message: &self.error,
            }
        }
    }

    /// Checks the pairing and state invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`FileCheckError`] found.
    pub fn validate(&self) -> Result<(), FileCheckError> {
        match (self.error.is_empty(), self.error_type) {
            (true, Some(kind)) => return Err(FileCheckError::MissingErrorMessage(kind)),
            (false, None) => return Err(FileCheckError::MissingErrorType),
            _ => {}
        }
        if !self.exists && !self.error.is_empty() {
            return Err(FileCheckError::ErrorWithoutFile);
        }
        Ok(())
    }
}

// ── Wire representation ───────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileCheckWire {
    exists: bool,
    content: String,
    error: String,
    #[serde(rename = "errorType")]
    error_type: String,
}

impl TryFrom<FileCheckWire> for FileCheckResult {
    type Error = FileCheckError;

    fn try_from(wire: FileCheckWire) -> Result<Self, Self::Error> {
        let error_type = match wire.error_type.as_str() {
            "" => None,
            TRANSPORT_ERROR_TAG => {
                return Err(FileCheckError::ReservedErrorType(wire.error_type));
            }
            tag => Some(
                FileErrorKind::from_tag(tag)
                    .ok_or_else(|| FileCheckError::UnknownErrorType(wire.error_type.clone()))?,
            ),
        };

        let result = FileCheckResult {
            exists: wire.exists,
            content: wire.content,
            error: wire.error,
            error_type,
        };
        result.validate()?;
        Ok(result)
    }
}

impl From<FileCheckResult> for FileCheckWire {
    fn from(result: FileCheckResult) -> Self {
        Self {
            exists: result.exists,
            content: result.content,
            error: result.error,
            error_type: result
                .error_type
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
