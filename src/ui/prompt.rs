//! Text prompt overlay.

use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::components::render_dialog_frame;
use super::theme::Theme;
use crate::app::Prompt;

const PROMPT_WIDTH: u16 = 60;

pub fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt, theme: &Theme) {
    let inner = render_dialog_frame(frame, area, theme, prompt.target.label(), PROMPT_WIDTH, 2);
    // Keep the end of a long buffer in view.
    let visible = inner.width.saturating_sub(3) as usize;
    let mut text = prompt.buffer.as_str();
    while text.width() > visible {
        let mut chars = text.chars();
        chars.next();
        text = chars.as_str();
    }
    let lines = vec![
        Line::from(vec![Span::styled("> ", theme.accent()), Span::styled(text.to_string(), theme.text())]),
        Line::from(Span::styled("enter confirm  esc cancel", theme.dim())),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
    frame.set_cursor_position(Position::new(inner.x + 2 + text.width() as u16, inner.y));
}
