//! System-related error types.
//!
//! This module defines errors related to local system operations: the
//! config file, the log directory, the clipboard and the terminal.

use std::path::PathBuf;
use thiserror::Error;

/// System-specific error variants.
#[derive(Debug, Clone, Error)]
pub enum SystemError {
    /// File not found.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Permission denied for file/directory operation.
    #[error("Permission denied: cannot {operation} {}", path.display())]
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    #[error("I/O error during {operation}: {message}")]
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// Could not determine configuration directory.
    #[error("Could not determine configuration directory")]
    NoConfigDirectory,

    /// Could not determine data directory.
    #[error("Could not determine data directory")]
    NoDataDirectory,

    /// System clipboard unavailable or empty.
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Terminal setup or rendering failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl SystemError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SystemError::IoError { operation, path, .. } => match path {
                Some(p) => format!("Failed to {} '{}'", operation, p.display()),
                None => format!("Failed to {}", operation),
            },
            SystemError::Clipboard(msg) => format!("Clipboard is not available: {}", msg),
            other => other.to_string(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::FileNotFound { .. } => "E_SYS_NOTFOUND",
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::NoConfigDirectory => "E_SYS_NOCONFIG",
            SystemError::NoDataDirectory => "E_SYS_NODATA",
            SystemError::Clipboard(_) => "E_SYS_CLIPBOARD",
            SystemError::Terminal(_) => "E_SYS_TERM",
        }
    }
}

/// Classify a std::io::Error into a more specific SystemError.
pub fn classify_io_error(err: std::io::Error, path: Option<PathBuf>, operation: &str) -> SystemError {
    use std::io::ErrorKind;

    match (err.kind(), path) {
        (ErrorKind::NotFound, Some(path)) => SystemError::FileNotFound { path },
        (ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        (_, path) => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found_with_path() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let classified = classify_io_error(err, Some(PathBuf::from("/tmp/x.json")), "read config");
        assert!(matches!(classified, SystemError::FileNotFound { .. }));
        assert_eq!(classified.error_code(), "E_SYS_NOTFOUND");
    }

    #[test]
    fn test_classify_permission_denied() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let classified = classify_io_error(err, Some(PathBuf::from("/etc/x")), "write config");
        match classified {
            SystemError::PermissionDenied { operation, .. } => assert_eq!(operation, "write config"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_classify_without_path_is_generic() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let classified = classify_io_error(err, None, "open log");
        assert_eq!(classified.user_message(), "Failed to open log");
    }
}
