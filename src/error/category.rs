//! Error category classification for unified error handling.
//!
//! This module provides a high-level categorization of errors to enable
//! consistent handling and user messaging.

use std::fmt;

/// High-level categorization of errors for handling decisions.
///
/// Categories drive how an error is surfaced: inline next to the control
/// that triggered it, as a toast, or as a fatal startup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport to the backend failed (connection refused, socket closed).
    Network,

    /// The backend executed the command and reported a failure.
    Backend,

    /// The frontend could not make sense of a response or payload.
    Client,

    /// User action required (invalid input, nothing selected).
    User,

    /// System/OS errors (filesystem, clipboard, terminal).
    System,

    /// Configuration errors (unreadable config file, bad URL).
    Configuration,
}

impl ErrorCategory {
    /// Returns true if the user can reasonably try the same action again.
    ///
    /// Nothing retries automatically; this only decides whether the UI
    /// offers a "retry" hint.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Backend)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Backend => "backend",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the launcher backend is running and try again",
            ErrorCategory::Backend => "The launcher reported a problem. Try again or check its logs",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check your packdeck configuration file",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
