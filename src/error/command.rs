//! Command gateway error types.
//!
//! The backend does not expose a structured error taxonomy. Whatever it
//! returns is collapsed into one display string by [`extract_error_message`]
//! and carried in [`CommandError::Backend`]. The other variants describe
//! failures on our side of the gateway.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by a command gateway call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The backend ran the command and reported a failure.
    #[error("{message}")]
    Backend { command: String, message: String },

    /// The request never reached the backend, or the reply never came back.
    #[error("Could not reach the launcher backend ({command}): {message}")]
    Transport { command: String, message: String },

    /// The backend replied with a value of an unexpected shape.
    #[error("Unexpected response to '{command}': {message}")]
    Decode { command: String, message: String },

    /// The argument bag could not be serialized.
    #[error("Invalid arguments for '{command}': {message}")]
    InvalidArguments { command: String, message: String },
}

impl CommandError {
    /// Build a backend error from the raw error payload the backend returned.
    pub fn from_backend_payload(command: &str, payload: &Value) -> Self {
        CommandError::Backend {
            command: command.to_string(),
            message: extract_error_message(payload),
        }
    }

    /// Name of the command that failed.
    pub fn command(&self) -> &str {
        match self {
            CommandError::Backend { command, .. }
            | CommandError::Transport { command, .. }
            | CommandError::Decode { command, .. }
            | CommandError::InvalidArguments { command, .. } => command,
        }
    }

    /// The string shown inline next to the control that triggered the call.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CommandError::Backend { .. } => "E_CMD_BACKEND",
            CommandError::Transport { .. } => "E_CMD_TRANSPORT",
            CommandError::Decode { .. } => "E_CMD_DECODE",
            CommandError::InvalidArguments { .. } => "E_CMD_ARGS",
        }
    }
}

/// Best-effort conversion of an arbitrary backend error payload to a string.
///
/// Order: a bare string is used verbatim; an object's `details` field wins
/// over its `message` field; anything else is JSON-stringified.
pub fn extract_error_message(payload: &Value) -> String {
    match payload {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            for key in ["details", "message"] {
                match map.get(key) {
                    Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                    Some(Value::Null) | None => {}
                    Some(Value::String(_)) => {}
                    Some(other) => return other.to_string(),
                }
            }
            payload.to_string()
        }
        other => other.to_string(),
    }
}
