//! Bordered list with a highlighted row. Every visible row is registered
//! as a hit area.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::interaction::{ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

/// First visible row so that `selected` fits in `height` rows.
pub fn window_start(selected: usize, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    selected.min(len - 1).saturating_sub(height - 1)
}

pub struct ListSpec<'a> {
    pub title: String,
    pub rows: Vec<Line<'a>>,
    /// `None` draws no highlight.
    pub selected: Option<usize>,
    pub empty: &'a str,
    pub on_click: fn(usize) -> ClickAction,
}

pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    hits: &mut HitAreaRegistry,
    spec: ListSpec<'_>,
) {
    let block = Block::default()
        .title(Span::styled(format!(" {} ", spec.title), theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if spec.rows.is_empty() {
        frame.render_widget(Paragraph::new(Span::styled(spec.empty, theme.dim())), inner);
        return;
    }

    let height = inner.height as usize;
    let start = window_start(spec.selected.unwrap_or(0), spec.rows.len(), height);
    for (offset, row) in spec.rows.into_iter().skip(start).take(height).enumerate() {
        let index = start + offset;
        let rect = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
        let row = if spec.selected == Some(index) {
            row.style(theme.selected())
        } else {
            row
        };
        frame.render_widget(Paragraph::new(row), rect);
        hits.register(rect, (spec.on_click)(index));
    }
}
