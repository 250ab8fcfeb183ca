//! Validation for configuration file-name overrides.
//!
//! The shell may ask the host to check a file other than the default
//! `config.json`, but only inside the application's configuration directory.
//! The override is therefore a single path component.

use thiserror::Error;

/// Reasons a file-name override is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileNameError {
    #[error("file name must not be empty")]
    Empty,
    #[error("file name '{0}' must not contain path separators")]
    Separator(String),
    #[error("file name '{0}' is not a plain file name")]
    Reserved(String),
    #[error("file name must not contain NUL bytes")]
    Nul,
}

/// Checks that `name` is a non-empty single path component.
///
/// # Errors
///
/// Returns [`FileNameError`] for empty or whitespace-only names, names with
/// `/` or `\`, `.` and `..`, and names containing NUL.
pub fn validate_file_name(name: &str) -> Result<(), FileNameError> {
    if name.trim().is_empty() {
        return Err(FileNameError::Empty);
    }
    if name.contains('\0') {
        return Err(FileNameError::Nul);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(FileNameError::Separator(name.to_string()));
    }
    if name == "." || name == ".." {
        return Err(FileNameError::Reserved(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_are_accepted() {
        assert!(validate_file_name("config.json").is_ok());
        assert!(validate_file_name("settings.dev.json").is_ok());
    }

    #[test]
    fn test_empty_and_blank_names_are_rejected() {
        assert_eq!(validate_file_name(""), Err(FileNameError::Empty));
        assert_eq!(validate_file_name("   "), Err(FileNameError::Empty));
    }

    #[test]
    fn test_path_traversal_is_rejected() {
        assert!(matches!(
            validate_file_name("../secrets"),
            Err(FileNameError::Separator(_))
        ));
        assert!(matches!(
            validate_file_name("..\\secrets"),
            Err(FileNameError::Separator(_))
        ));
        assert!(matches!(
            validate_file_name(".."),
            Err(FileNameError::Reserved(_))
        ));
    }

    #[test]
    fn test_nul_is_rejected() {
        assert_eq!(validate_file_name("a\0b"), Err(FileNameError::Nul));
    }
}
