//! Clipboard trait abstraction.
//!
//! Preference profiles are exported to and imported from the system
//! clipboard as JSON text.

use crate::error::SystemError;

/// Text clipboard access.
pub trait ClipboardProvider: Send {
    /// Read the clipboard as text.
    fn get_text(&mut self) -> Result<String, SystemError>;

    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), SystemError>;
}
