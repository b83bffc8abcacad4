//! Centered overlay with a rounded border.

use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::theme::Theme;

/// Width and height of a dialog that fits `area` with a two-cell margin.
fn dialog_rect(area: Rect, width: u16, content_height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4)).max(1);
    let height = (content_height + 2).min(area.height.saturating_sub(2)).max(3);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Clear the dialog's background, draw its frame and return the inner area.
pub fn render_dialog_frame(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &str,
    width: u16,
    content_height: u16,
) -> Rect {
    let dialog = dialog_rect(area, width, content_height);
    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);
    inner
}
