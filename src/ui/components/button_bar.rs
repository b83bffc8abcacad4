//! Row of `[key] label` buttons.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub struct ButtonSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub button: Button,
    pub enabled: bool,
}

impl ButtonSpec {
    pub fn new(key: &'static str, label: &'static str, button: Button) -> Self {
        Self {
            key,
            label,
            button,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Buttons on the first row of `area`. Disabled buttons are drawn dim and
/// not registered.
pub fn render_button_bar(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    hits: &mut HitAreaRegistry,
    buttons: Vec<ButtonSpec>,
) {
    let mut spans = Vec::new();
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);
    for spec in buttons {
        let key = format!("[{}]", spec.key);
        let label = format!(" {} ", spec.label);
        let width = (key.width() + label.width()) as u16;
        if x.saturating_add(width) > right {
            break;
        }
        if spec.enabled {
            hits.register(Rect::new(x, area.y, width, 1), ClickAction::Press(spec.button));
            spans.push(Span::styled(key, theme.accent()));
            spans.push(Span::styled(label, theme.text()));
        } else {
            spans.push(Span::styled(key, theme.dim()));
            spans.push(Span::styled(label, theme.dim()));
        }
        x = x.saturating_add(width);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: 1, ..area });
}
