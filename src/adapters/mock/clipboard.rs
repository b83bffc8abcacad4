//! In-memory clipboard for testing.

use std::sync::{Arc, Mutex};

use crate::error::SystemError;
use crate::traits::ClipboardProvider;

/// Clipboard that stores text in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard pre-filled with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        let clipboard = Self::new();
        *clipboard.contents.lock().unwrap() = Some(text.into());
        clipboard
    }

    /// Current contents, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl ClipboardProvider for InMemoryClipboard {
    fn get_text(&mut self) -> Result<String, SystemError> {
        self.contents
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SystemError::Clipboard("clipboard is empty".to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<(), SystemError> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clipboard_errors() {
        let mut clipboard = InMemoryClipboard::new();
        assert!(clipboard.get_text().is_err());
    }

    #[test]
    fn test_clones_share_contents() {
        let mut a = InMemoryClipboard::new();
        let b = a.clone();
        a.set_text("{\"theme\":\"dark\"}").unwrap();
        assert_eq!(b.contents().as_deref(), Some("{\"theme\":\"dark\"}"));
    }
}
