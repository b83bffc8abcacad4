//! Event channel error types.
//!
//! Errors raised by the push transport that feeds the event hub.

use thiserror::Error;

/// Event transport errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChannelError {
    /// The initial connection to the event endpoint failed.
    #[error("Connection to event stream failed: {0}")]
    ConnectionFailed(String),

    /// The transport gave up after exhausting its reconnect attempts.
    #[error("Event stream disconnected after {attempts} reconnect attempts")]
    Disconnected { attempts: u8 },

    /// A frame could not be decoded into an event envelope.
    #[error("Malformed event frame: {0}")]
    MalformedFrame(String),

    /// A payload on a known channel did not match its expected shape.
    #[error("Invalid payload on '{channel}': {message}")]
    InvalidPayload { channel: String, message: String },
}

impl ChannelError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChannelError::ConnectionFailed(_) => "E_CHAN_CONN",
            ChannelError::Disconnected { .. } => "E_CHAN_DISCONNECTED",
            ChannelError::MalformedFrame(_) => "E_CHAN_FRAME",
            ChannelError::InvalidPayload { .. } => "E_CHAN_PAYLOAD",
        }
    }

    /// Whether the event stream is gone for good.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ChannelError::Disconnected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_error_display() {
        assert_eq!(
            ChannelError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection to event stream failed: refused"
        );
        assert_eq!(
            ChannelError::Disconnected { attempts: 5 }.to_string(),
            "Event stream disconnected after 5 reconnect attempts"
        );
        assert_eq!(
            ChannelError::InvalidPayload {
                channel: "performance-event".to_string(),
                message: "missing field".to_string()
            }
            .to_string(),
            "Invalid payload on 'performance-event': missing field"
        );
    }

    #[test]
    fn test_channel_error_fatal() {
        assert!(ChannelError::Disconnected { attempts: 1 }.is_fatal());
        assert!(!ChannelError::MalformedFrame("x".to_string()).is_fatal());
    }
}
