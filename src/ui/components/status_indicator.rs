//! One-line state of a backend request: spinner, error or nothing.

use ratatui::text::{Line, Span};

use crate::store::Loadable;
use crate::ui::theme::Theme;

const SPINNER_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];

pub fn spinner_char(tick: u64) -> char {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// Status line for `loadable`, or `None` when idle with data.
pub fn loadable_status<T>(
    loadable: &Loadable<T>,
    what: &str,
    theme: &Theme,
    tick: u64,
) -> Option<Line<'static>> {
    if loadable.loading {
        return Some(Line::from(vec![
            Span::styled(format!("{} ", spinner_char(tick)), theme.warning()),
            Span::styled(format!("Loading {}...", what), theme.dim()),
        ]));
    }
    if let Some(error) = &loadable.error {
        return Some(Line::from(vec![
            Span::styled("✗ ", theme.error()),
            Span::styled(error.clone(), theme.error()),
        ]));
    }
    None
}
