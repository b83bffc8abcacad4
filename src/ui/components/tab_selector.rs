//! Horizontal tab row whose tabs are clickable.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::interaction::{ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub struct TabItem {
    pub label: String,
    pub action: ClickAction,
}

/// Draw tabs left to right on the first row of `area`; tabs that do not fit
/// are dropped.
pub fn render_tab_selector(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    hits: &mut HitAreaRegistry,
    items: &[TabItem],
    selected: usize,
) {
    let mut spans = Vec::with_capacity(items.len() * 2);
    let mut x = area.x;
    let right = area.x.saturating_add(area.width);
    for (index, item) in items.iter().enumerate() {
        let text = format!(" {} ", item.label);
        let width = text.width() as u16;
        if x.saturating_add(width) > right {
            break;
        }
        let style = if index == selected {
            theme.selected()
        } else {
            theme.dim()
        };
        hits.register(Rect::new(x, area.y, width, 1), item.action.clone());
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: 1, ..area });
}
