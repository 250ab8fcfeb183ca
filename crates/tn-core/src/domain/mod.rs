//! Domain types for the startup configuration check.
//!
//! Everything here is plain data plus validation.  No I/O, no async, no
//! environment lookups: the host decides *how* to look at the disk, these
//! types only describe *what* it found.

pub mod file_check;
pub mod file_name;

pub use file_check::{FileCheckError, FileCheckOutcome, FileCheckResult, FileErrorKind};
pub use file_name::{validate_file_name, FileNameError};
