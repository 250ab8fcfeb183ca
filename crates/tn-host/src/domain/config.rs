//! Host configuration.
//!
//! [`HostConfig`] says where the host listens, which file it checks, and the
//! limits it applies.  It is built once at startup from CLI arguments (see
//! `main.rs`) and handed to the probe and the server; nothing here reads the
//! environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;
use tn_core::{validate_file_name, FileNameError};

/// Default port of the shell boundary socket.
pub const DEFAULT_PORT: u16 = 24810;
/// Application title; also the name of the per-app config subdirectory.
pub const DEFAULT_APP_TITLE: &str = "Twitch Notifications";
/// File checked when the shell does not override it.
pub const DEFAULT_FILE_NAME: &str = "config.json";
/// Default upper bound on the size of the configuration file (1 MiB).
pub const DEFAULT_MAX_CONFIG_BYTES: u64 = 1024 * 1024;
/// Hard ceiling for `max_config_bytes` (4 MiB), keeping replies well under
/// the protocol frame limit.
pub const MAX_CONFIG_BYTES_LIMIT: u64 = 4 * 1024 * 1024;

/// Invalid host configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostConfigError {
    #[error("invalid configuration file name: {0}")]
    FileName(#[from] FileNameError),

    #[error("max_config_bytes must be between 1 and {limit}, got {value}")]
    MaxConfigBytes { value: u64, limit: u64 },
}

/// Runtime settings for the host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Address of the boundary WebSocket listener.  Loopback by default: the
    /// shell runs on the same machine.
    pub bind_addr: SocketAddr,
    /// Directory holding the configuration file.
    pub config_dir: PathBuf,
    /// File checked when a request carries no override.
    pub file_name: String,
    /// Create `config_dir` when a check finds it missing, so first-run setup
    /// has somewhere to write.
    pub create_missing_dir: bool,
    /// Files larger than this are reported as `tooLarge` instead of sent.
    pub max_config_bytes: u64,
}

impl HostConfig {
    /// Builds a config for `config_dir` with every other field at its
    /// default.
    ///
    /// ```rust
    /// use tn_host::domain::HostConfig;
    ///
    /// let cfg = HostConfig::new("/tmp/tn");
    /// assert_eq!(cfg.bind_addr.port(), 24810);
    /// assert!(cfg.config_file_path().ends_with("config.json"));
    /// ```
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            config_dir: config_dir.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            create_missing_dir: true,
            max_config_bytes: DEFAULT_MAX_CONFIG_BYTES,
        }
    }

    /// Full path of the default configuration file.
    pub fn config_file_path(&self) -> PathBuf {
        self.config_dir.join(&self.file_name)
    }

    /// # Errors
    ///
    /// Returns [`HostConfigError`] if the file name is not a single path
    /// component or `max_config_bytes` is out of range.
    pub fn validate(&self) -> Result<(), HostConfigError> {
        validate_file_name(&self.file_name)?;
        if self.max_config_bytes == 0 || self.max_config_bytes > MAX_CONFIG_BYTES_LIMIT {
            return Err(HostConfigError::MaxConfigBytes {
                value: self.max_config_bytes,
                limit: MAX_CONFIG_BYTES_LIMIT,
            });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_binds_loopback_on_default_port() {
        let cfg = HostConfig::new("/tmp/tn");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:24810");
    }

    #[test]
    fn test_new_uses_default_file_and_limits() {
        let cfg = HostConfig::new("/tmp/tn");
        assert_eq!(cfg.file_name, "config.json");
        assert!(cfg.create_missing_dir);
        assert_eq!(cfg.max_config_bytes, 1024 * 1024);
    }

    #[test]
    fn test_config_file_path_joins_dir_and_name() {
        let cfg = HostConfig::new("/tmp/tn");
        assert_eq!(cfg.config_file_path(), PathBuf::from("/tmp/tn/config.json"));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert_eq!(HostConfig::new("/tmp/tn").validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_nested_file_name() {
        let mut cfg = HostConfig::new("/tmp/tn");
        cfg.file_name = "sub/config.json".to_string();
        assert!(matches!(cfg.validate(), Err(HostConfigError::FileName(_))));
    }

    #[test]
    fn test_validate_rejects_zero_and_oversized_limits() {
        let mut cfg = HostConfig::new("/tmp/tn");

        cfg.max_config_bytes = 0;
        assert!(cfg.validate().is_err());

        cfg.max_config_bytes = MAX_CONFIG_BYTES_LIMIT + 1;
        assert_eq!(
            cfg.validate(),
            Err(HostConfigError::MaxConfigBytes {
                value: MAX_CONFIG_BYTES_LIMIT + 1,
                limit: MAX_CONFIG_BYTES_LIMIT,
            })
        );
    }
}
