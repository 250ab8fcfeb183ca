//! # tn-core
//!
//! Shared contract between the Twitch Notifications shell (the UI process)
//! and the host process that owns file-system access.
//!
//! The shell never touches the disk itself.  At startup it asks the host
//! whether the configuration file exists and what it contains; the host
//! answers with a [`FileCheckResult`].  This crate defines:
//!
//! - **`domain`** – the [`FileCheckResult`] model, its invariants, and the
//!   closed set of host-side error categories ([`FileErrorKind`]).
//! - **`protocol`** – the JSON messages exchanged across the boundary and the
//!   strict codec that validates them.
//!
//! It has no dependencies on async runtimes, sockets, or the file system, so
//! both processes (and their tests) can use it freely.

pub mod domain;
pub mod protocol;

pub use domain::file_check::{
    FileCheckError, FileCheckOutcome, FileCheckResult, FileErrorKind, TRANSPORT_ERROR_TAG,
};
pub use domain::file_name::{validate_file_name, FileNameError};
pub use protocol::codec::{
    decode_reply, decode_request, encode_reply, encode_request, ProtocolError, MAX_FRAME_LEN,
};
pub use protocol::messages::{HostReply, ShellRequest};
pub use protocol::sequence::RequestCounter;
