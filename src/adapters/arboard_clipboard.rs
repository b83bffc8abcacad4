//! System clipboard adapter using arboard.

use crate::error::SystemError;
use crate::traits::ClipboardProvider;

/// Clipboard backed by the OS clipboard (X11/Wayland, NSPasteboard, Win32).
///
/// The handle is opened lazily so headless sessions only fail when the
/// clipboard is actually used.
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, SystemError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| SystemError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| SystemError::Clipboard("clipboard handle missing".to_string()))
    }
}

impl std::fmt::Debug for ArboardClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArboardClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

impl ClipboardProvider for ArboardClipboard {
    fn get_text(&mut self) -> Result<String, SystemError> {
        self.handle()?
            .get_text()
            .map_err(|e| SystemError::Clipboard(e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<(), SystemError> {
        self.handle()?
            .set_text(text.to_string())
            .map_err(|e| SystemError::Clipboard(e.to_string()))
    }
}
