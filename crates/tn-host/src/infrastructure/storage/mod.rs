//! Storage infrastructure: where the configuration lives on this platform.
//!
//! Only path resolution happens here.  Reading the file is the probe's job
//! (`application::check_config`), so the platform rules stay in one place
//! and the probe can be tested against any directory.

pub mod paths;

pub use paths::{app_config_dir, StorageError};
