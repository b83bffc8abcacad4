//! Unified error type for packdeck.
//!
//! `DeckError` consolidates the domain error enums so startup code and the
//! app shell can handle failures uniformly.

use std::fmt;

use super::category::ErrorCategory;
use super::channel::ChannelError;
use super::command::CommandError;
use super::config::ConfigError;
use super::context::ErrorContext;
use super::system::SystemError;

/// Unified error type for packdeck.
#[derive(Debug)]
pub enum DeckError {
    /// Command gateway failures.
    Command(CommandError),

    /// Event channel failures.
    Channel(ChannelError),

    /// Configuration failures.
    Config(ConfigError),

    /// System/filesystem errors.
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<DeckError>,
        context: ErrorContext,
    },
}

impl DeckError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeckError::Command(err) => match err {
                CommandError::Backend { .. } => ErrorCategory::Backend,
                CommandError::Transport { .. } => ErrorCategory::Network,
                CommandError::Decode { .. } | CommandError::InvalidArguments { .. } => {
                    ErrorCategory::Client
                }
            },
            DeckError::Channel(err) => match err {
                ChannelError::ConnectionFailed(_) | ChannelError::Disconnected { .. } => {
                    ErrorCategory::Network
                }
                ChannelError::MalformedFrame(_) | ChannelError::InvalidPayload { .. } => {
                    ErrorCategory::Client
                }
            },
            DeckError::Config(_) => ErrorCategory::Configuration,
            DeckError::System(_) => ErrorCategory::System,
            DeckError::WithContext { error, .. } => error.category(),
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            DeckError::Command(err) => err.user_message(),
            DeckError::Channel(err) => err.to_string(),
            DeckError::Config(err) => err.to_string(),
            DeckError::System(err) => err.user_message(),
            DeckError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DeckError::Command(err) => err.error_code(),
            DeckError::Channel(err) => err.error_code(),
            DeckError::Config(err) => err.error_code(),
            DeckError::System(err) => err.error_code(),
            DeckError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        DeckError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            DeckError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &DeckError {
        match self {
            DeckError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Command(err) => write!(f, "{}", err),
            DeckError::Channel(err) => write!(f, "{}", err),
            DeckError::Config(err) => write!(f, "{}", err),
            DeckError::System(err) => write!(f, "{}", err),
            DeckError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Command(err) => Some(err),
            DeckError::Channel(err) => Some(err),
            DeckError::Config(err) => Some(err),
            DeckError::System(err) => Some(err),
            DeckError::WithContext { error, .. } => error.source(),
        }
    }
}

// ============================================================================
// From implementations for automatic error conversion
// ============================================================================

impl From<CommandError> for DeckError {
    fn from(err: CommandError) -> Self {
        DeckError::Command(err)
    }
}

impl From<ChannelError> for DeckError {
    fn from(err: ChannelError) -> Self {
        DeckError::Channel(err)
    }
}

impl From<ConfigError> for DeckError {
    fn from(err: ConfigError) -> Self {
        DeckError::Config(err)
    }
}

impl From<SystemError> for DeckError {
    fn from(err: SystemError) -> Self {
        DeckError::System(err)
    }
}

impl From<std::io::Error> for DeckError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        DeckError::System(classify_io_error(err, None, "I/O operation"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_categories() {
        let backend: DeckError = CommandError::Backend {
            command: "x".to_string(),
            message: "m".to_string(),
        }
        .into();
        assert_eq!(backend.category(), ErrorCategory::Backend);

        let transport: DeckError = CommandError::Transport {
            command: "x".to_string(),
            message: "m".to_string(),
        }
        .into();
        assert_eq!(transport.category(), ErrorCategory::Network);

        let decode: DeckError = CommandError::Decode {
            command: "x".to_string(),
            message: "m".to_string(),
        }
        .into();
        assert_eq!(decode.category(), ErrorCategory::Client);
    }

    #[test]
    fn test_context_is_transparent_for_category() {
        let err: DeckError = ChannelError::Disconnected { attempts: 3 }.into();
        let err = err.with_context(ErrorContext::new("connect_events"));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.error_code(), "E_CHAN_DISCONNECTED");
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("connect_events"));
        assert!(matches!(err.inner(), DeckError::Channel(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: DeckError = io_err.into();
        assert_eq!(err.category(), ErrorCategory::System);
    }

    #[test]
    fn test_display_with_context() {
        let err: DeckError = ConfigError::InvalidUrl {
            field: "backend_url",
            value: "ftp://x".to_string(),
        }
        .into();
        let err = err.with_context(ErrorContext::new("load_config"));
        assert_eq!(
            err.to_string(),
            "Invalid URL for backend_url: ftp://x ([load_config])"
        );
    }
}
