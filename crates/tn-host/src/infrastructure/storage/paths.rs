//! Platform configuration directory resolution.
//!
//! | Platform | Base directory                                  |
//! |----------|-------------------------------------------------|
//! | Windows  | `%APPDATA%`                                     |
//! | macOS    | `$HOME/Library/Application Support`             |
//! | Linux    | `$XDG_CONFIG_HOME`, falling back to `$HOME/.config` |
//!
//! The application's directory is `<base>/<app title>`.  Resolution reads the
//! environment only; nothing is created or inspected on disk here.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;
use tn_core::{validate_file_name, FileNameError};

/// Errors from resolving the configuration directory.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// The environment does not name a usable base directory (for example
    /// `HOME` is unset).  The host cannot serve checks without one.
    #[error("could not determine the platform configuration directory")]
    NoPlatformConfigDir,

    #[error("invalid application title: {0}")]
    InvalidAppTitle(#[from] FileNameError),
}

/// Resolves `<platform config dir>/<app_title>` from the process environment.
///
/// # Errors
///
/// Returns [`StorageError::InvalidAppTitle`] if the title is not a single
/// path component, or [`StorageError::NoPlatformConfigDir`] if the base
/// directory cannot be determined.
pub fn app_config_dir(app_title: &str) -> Result<PathBuf, StorageError> {
    validate_file_name(app_title)?;
    let base =
        platform_config_base(|key| std::env::var_os(key)).ok_or(StorageError::NoPlatformConfigDir)?;
    Ok(base.join(app_title))
}

/// Picks the base directory using `var` to look up environment variables.
///
/// Taking the lookup as a parameter keeps tests off the real process
/// environment, which is shared between test threads.
fn platform_config_base(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    // Empty or relative values are treated as unset.
    let absolute = |key: &str| {
        var(key)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
    };

    #[cfg(target_os = "windows")]
    {
        absolute("APPDATA")
    }

    #[cfg(target_os = "macos")]
    {
        absolute("HOME").map(|home| home.join("Library").join("Application Support"))
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        absolute("XDG_CONFIG_HOME").or_else(|| absolute("HOME").map(|home| home.join(".config")))
    }

    #[cfg(not(any(unix, target_os = "windows")))]
    {
        let _ = absolute;
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_has_no_base() {
        assert_eq!(platform_config_base(env(&[])), None);
    }

    #[test]
    fn test_app_config_dir_rejects_title_with_separator() {
        assert!(matches!(
            app_config_dir("Twitch/Notifications"),
            Err(StorageError::InvalidAppTitle(_))
        ));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_xdg_config_home_wins_over_home() {
        let base = platform_config_base(env(&[("XDG_CONFIG_HOME", "/xdg"), ("HOME", "/home/u")]));
        assert_eq!(base, Some(PathBuf::from("/xdg")));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_home_dot_config_fallback() {
        let base = platform_config_base(env(&[("HOME", "/home/u")]));
        assert_eq!(base, Some(PathBuf::from("/home/u/.config")));
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn test_relative_or_empty_xdg_is_ignored() {
        // Arrange
        let relative = env(&[("XDG_CONFIG_HOME", "cfg"), ("HOME", "/home/u")]);
        let empty = env(&[("XDG_CONFIG_HOME", ""), ("HOME", "/home/u")]);

        // Act / Assert
        assert_eq!(
            platform_config_base(relative),
            Some(PathBuf::from("/home/u/.config"))
        );
        assert_eq!(
            platform_config_base(empty),
            Some(PathBuf::from("/home/u/.config"))
        );
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn test_macos_uses_application_support() {
        let base = platform_config_base(env(&[("HOME", "/Users/u")]));
        assert_eq!(
            base,
            Some(PathBuf::from("/Users/u/Library/Application Support"))
        );
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_uses_appdata() {
        let base = platform_config_base(env(&[("APPDATA", r"C:\Users\u\AppData\Roaming")]));
        assert_eq!(base, Some(PathBuf::from(r"C:\Users\u\AppData\Roaming")));
    }
}
