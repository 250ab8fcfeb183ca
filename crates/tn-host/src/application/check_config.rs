//! Configuration probe: disk state → [`FileCheckResult`].
//!
//! The probe runs these checks in order and stops at the first that decides
//! the outcome:
//!
//! 1. Configuration directory missing → Absent (the directory is created
//!    when enabled, so first-run setup can write into it).
//! 2. Directory path is not a directory, or cannot be inspected →
//!    Unreadable (`directory`, or `permission` when access is denied).
//! 3. File missing → Absent.
//! 4. File is not a regular file → Unreadable (`notAFile`).
//! 5. File larger than the configured limit → Unreadable (`tooLarge`).
//! 6. Read fails → Unreadable (`permission` or `other`).
//! 7. Contents are not UTF-8 → Unreadable (`corrupt`).
//! 8. Otherwise → Loaded.
//!
//! The probe never fails: every I/O problem becomes a result the shell can
//! show.  File contents are never logged.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use tn_core::{validate_file_name, FileCheckResult, FileErrorKind};

use crate::domain::HostConfig;

/// Answers configuration checks for one configuration directory.
#[derive(Debug, Clone)]
pub struct ConfigProbe {
    config_dir: PathBuf,
    default_file_name: String,
    create_missing_dir: bool,
    max_config_bytes: u64,
}

impl ConfigProbe {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            config_dir: config.config_dir.clone(),
            default_file_name: config.file_name.clone(),
            create_missing_dir: config.create_missing_dir,
            max_config_bytes: config.max_config_bytes,
        }
    }

    /// Checks for the configuration file and reads it if present.
    ///
    /// `file_name` overrides the default file name; it must be a single path
    /// component.  This call does blocking file-system I/O.
    pub fn check(&self, file_name: Option<&str>) -> FileCheckResult {
        let file_name = file_name.unwrap_or(&self.default_file_name);
        if let Err(e) = validate_file_name(file_name) {
            warn!("refusing to check invalid file name: {e}");
            return FileCheckResult::unreadable(FileErrorKind::Other, e.to_string());
        }

        if let Some(early) = self.check_dir() {
            return early;
        }

        let path = self.config_dir.join(file_name);
        let result = self.check_file(&path);
        match result.error_type {
            None if result.exists => info!("config file {} loaded", path.display()),
            None => info!("config file {} not found", path.display()),
            Some(kind) => warn!("config file {} unreadable ({kind}): {}", path.display(), result.error),
        }
        result
    }

    /// Returns `Some` when the directory state alone decides the outcome.
    fn check_dir(&self) -> Option<FileCheckResult> {
        let dir = &self.config_dir;
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => None,
            Ok(_) => Some(FileCheckResult::unreadable(
                FileErrorKind::Directory,
                format!("configuration path {} is not a directory", dir.display()),
            )),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("config directory {} does not exist", dir.display());
                if self.create_missing_dir {
                    // A creation failure still means "no config yet"; setup will
                    // report its own error when it tries to write.
                    match fs::create_dir_all(dir) {
                        Ok(()) => info!("created config directory {}", dir.display()),
                        Err(e) => warn!("failed to create config directory {}: {e}", dir.display()),
                    }
                }
                Some(FileCheckResult::absent())
            }
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                Some(FileCheckResult::unreadable(
                    FileErrorKind::Permission,
                    format!("permission denied accessing configuration directory: {e}"),
                ))
            }
            Err(e) => Some(FileCheckResult::unreadable(
                FileErrorKind::Directory,
                format!("failed to inspect configuration directory: {e}"),
            )),
        }
    }

    fn check_file(&self, path: &Path) -> FileCheckResult {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return FileCheckResult::absent(),
            Err(e) => return unreadable_from_io("failed to access config file", &e),
        };

        if !meta.is_file() {
            return FileCheckResult::unreadable(
                FileErrorKind::NotAFile,
                format!("{} is not a regular file", path.display()),
            );
        }
        if meta.len() > self.max_config_bytes {
            return self.too_large(meta.len());
        }

        let bytes = match read_bounded(path, self.max_config_bytes) {
            Ok(bytes) => bytes,
            // Removed between the metadata call and the read.
            Err(e) if e.kind() == io::ErrorKind::NotFound => return FileCheckResult::absent(),
            Err(e) => return unreadable_from_io("failed to read config file", &e),
        };
        debug!("read {} bytes from {}", bytes.len(), path.display());

        // The file grew past the limit since the metadata call.
        if bytes.len() as u64 > self.max_config_bytes {
            return FileCheckResult::unreadable(
                FileErrorKind::TooLarge,
                format!(
                    "config file grew past the {} byte limit while being read",
                    self.max_config_bytes
                ),
            );
        }

        match String::from_utf8(bytes) {
            Ok(content) => FileCheckResult::loaded(content),
            Err(e) => FileCheckResult::unreadable(
                FileErrorKind::Corrupt,
                format!("config file is not valid UTF-8: {}", e.utf8_error()),
            ),
        }
    }

    fn too_large(&self, len: u64) -> FileCheckResult {
        FileCheckResult::unreadable(
            FileErrorKind::TooLarge,
            format!(
                "config file is {len} bytes, larger than the {} byte limit",
                self.max_config_bytes
            ),
        )
    }
}

/// Reads at most `limit + 1` bytes, so an oversized file is detectable
/// without ever buffering more than that.
fn read_bounded(path: &Path, limit: u64) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    File::open(path)?
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn unreadable_from_io(context: &str, e: &io::Error) -> FileCheckResult {
    let kind = match e.kind() {
        io::ErrorKind::PermissionDenied => FileErrorKind::Permission,
        _ => FileErrorKind::Other,
    };
    FileCheckResult::unreadable(kind, format!("{context}: {e}"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tn_core::FileCheckOutcome;
    use uuid::Uuid;

    /// A unique config directory under the system temp dir that is removed on
    /// drop.  The directory itself is not created.
    struct TempConfigDir {
        root: PathBuf,
    }

    impl TempConfigDir {
        fn new() -> Self {
            let root = std::env::temp_dir().join(format!("tn_host_probe_{}", Uuid::new_v4()));
            Self { root }
        }

        fn dir(&self) -> PathBuf {
            self.root.join("Twitch Notifications")
        }

        fn probe(&self) -> ConfigProbe {
            ConfigProbe::new(&HostConfig::new(self.dir()))
        }

        fn write(&self, name: &str, bytes: &[u8]) {
            fs::create_dir_all(self.dir()).unwrap();
            fs::write(self.dir().join(name), bytes).unwrap();
        }
    }

    impl Drop for TempConfigDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    // ── Absent ────────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_dir_is_absent_and_gets_created() {
        // Arrange
        let tmp = TempConfigDir::new();
        let probe = tmp.probe();

        // Act
        let result = probe.check(None);

        // Assert
        assert_eq!(result, FileCheckResult::absent());
        assert!(tmp.dir().is_dir(), "config dir should have been created");
    }

    #[test]
    fn test_missing_dir_is_not_created_when_disabled() {
        let tmp = TempConfigDir::new();
        let mut cfg = HostConfig::new(tmp.dir());
        cfg.create_missing_dir = false;

        let result = ConfigProbe::new(&cfg).check(None);

        assert_eq!(result.outcome(), FileCheckOutcome::Absent);
        assert!(!tmp.dir().exists());
    }

    #[test]
    fn test_missing_file_in_existing_dir_is_absent() {
        let tmp = TempConfigDir::new();
        fs::create_dir_all(tmp.dir()).unwrap();

        assert_eq!(tmp.probe().check(None), FileCheckResult::absent());
    }

    // ── Loaded ────────────────────────────────────────────────────────────────

    #[test]
    fn test_existing_file_is_loaded_verbatim() {
        // Arrange
        let tmp = TempConfigDir::new();
        let content = "{\"channel\":\"rustlang\",\"notify\":true}\n";
        tmp.write("config.json", content.as_bytes());

        // Act
        let result = tmp.probe().check(None);

        // Assert
        assert_eq!(result, FileCheckResult::loaded(content));
    }

    #[test]
    fn test_empty_file_is_loaded_not_absent() {
        let tmp = TempConfigDir::new();
        tmp.write("config.json", b"");

        assert_eq!(tmp.probe().check(None).outcome(), FileCheckOutcome::Loaded(""));
    }

    #[test]
    fn test_file_name_override_is_used() {
        let tmp = TempConfigDir::new();
        tmp.write("config.json", b"default");
        tmp.write("alt.json", b"alternate");

        let result = tmp.probe().check(Some("alt.json"));

        assert_eq!(result.outcome(), FileCheckOutcome::Loaded("alternate"));
    }

    // ── Unreadable ────────────────────────────────────────────────────────────

    #[test]
    fn test_invalid_override_is_unreadable_other() {
        let tmp = TempConfigDir::new();
        let result = tmp.probe().check(Some("../escape.json"));
        assert_eq!(result.error_type, Some(FileErrorKind::Other));
        assert!(result.exists);
    }

    #[test]
    fn test_directory_in_place_of_file_is_not_a_file() {
        let tmp = TempConfigDir::new();
        fs::create_dir_all(tmp.dir().join("config.json")).unwrap();

        let result = tmp.probe().check(None);

        assert_eq!(result.error_type, Some(FileErrorKind::NotAFile));
        assert!(!result.error.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let tmp = TempConfigDir::new();
        tmp.write("config.json", &[0x7b, 0xff, 0xfe, 0x7d]);

        let result = tmp.probe().check(None);

        assert_eq!(result.error_type, Some(FileErrorKind::Corrupt));
        assert!(result.content.is_empty(), "no partial content on error");
    }

    #[test]
    fn test_file_over_limit_is_too_large() {
        // Arrange
        let tmp = TempConfigDir::new();
        tmp.write("config.json", &[b'a'; 64]);
        let mut cfg = HostConfig::new(tmp.dir());
        cfg.max_config_bytes = 16;

        // Act
        let result = ConfigProbe::new(&cfg).check(None);

        // Assert
        assert_eq!(result.error_type, Some(FileErrorKind::TooLarge));
        assert!(result.error.contains("16"), "{}", result.error);
    }

    #[test]
    fn test_file_at_limit_is_loaded() {
        let tmp = TempConfigDir::new();
        tmp.write("config.json", &[b'a'; 16]);
        let mut cfg = HostConfig::new(tmp.dir());
        cfg.max_config_bytes = 16;

        let result = ConfigProbe::new(&cfg).check(None);

        assert!(matches!(result.outcome(), FileCheckOutcome::Loaded(c) if c.len() == 16));
    }

    #[test]
    fn test_read_bounded_stops_one_byte_past_limit() {
        // Arrange
        let tmp = TempConfigDir::new();
        tmp.write("config.json", &[b'a'; 4096]);

        // Act
        let bytes = read_bounded(&tmp.dir().join("config.json"), 16).unwrap();

        // Assert
        assert_eq!(bytes.len(), 17);
    }

    #[test]
    fn test_read_bounded_reads_small_file_whole() {
        let tmp = TempConfigDir::new();
        tmp.write("config.json", b"notify=true");

        let bytes = read_bounded(&tmp.dir().join("config.json"), 1024).unwrap();

        assert_eq!(bytes, b"notify=true");
    }

    #[test]
    fn test_config_dir_that_is_a_file_is_directory_error() {
        // Arrange: a regular file where the directory should be
        let tmp = TempConfigDir::new();
        fs::create_dir_all(&tmp.root).unwrap();
        fs::write(tmp.dir(), b"not a dir").unwrap();

        // Act
        let result = tmp.probe().check(None);

        // Assert
        assert_eq!(result.error_type, Some(FileErrorKind::Directory));
        assert!(result.exists);
    }

    #[test]
    fn test_every_probe_result_satisfies_invariants() {
        let tmp = TempConfigDir::new();
        let probe = tmp.probe();

        let absent = probe.check(None);
        tmp.write("config.json", b"ok");
        let loaded = probe.check(None);
        tmp.write("config.json", &[0xff]);
        let corrupt = probe.check(None);

        for result in [absent, loaded, corrupt] {
            assert_eq!(result.validate(), Ok(()));
        }
    }
}
