use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use super::split_toolbar;
use crate::app::{App, ScreenView};
use crate::state::{Operation, OperationPhase};
use crate::ui::components::{render_button_bar, window_start, ButtonSpec};
use crate::ui::helpers::{format_bytes, format_speed, truncate_string};
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

/// Rows per operation: title line plus gauge.
const ROW_HEIGHT: u16 = 2;

fn detail(op: &Operation) -> String {
    let mut parts = Vec::new();
    if let Some(stage) = &op.stage {
        parts.push(stage.clone());
    }
    if op.counts_bytes {
        if op.total > 0 {
            parts.push(format!("{} / {}", format_bytes(op.current), format_bytes(op.total)));
        }
    } else {
        if op.total > 0 {
            parts.push(format!("{} / {}", op.current, op.total));
        }
        if op.bytes > 0 {
            parts.push(format_bytes(op.bytes));
        }
    }
    if op.speed > 0 && op.is_active() {
        parts.push(format_speed(op.speed));
    }
    if let Some(error) = &op.cancel_error {
        parts.push(format!("cancel failed: {}", error));
    }
    parts.join("  ")
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Downloads(cursor) = &app.view else {
        return;
    };
    let downloads = &app.ctx.downloads;
    let operations = downloads.operations();
    let (toolbar, body) = split_toolbar(area, theme);
    let selected = operations.get(cursor.selected);
    let mut buttons = vec![ButtonSpec::new("x", "Clear finished", Button::ClearFinished)];
    if let Some(op) = selected.filter(|op| op.phase == OperationPhase::Running) {
        buttons.insert(0, ButtonSpec::new("c", "Cancel", Button::CancelOperation(op.id.clone())));
    }
    render_button_bar(frame, toolbar, theme, hits, buttons);

    let block = Block::default()
        .title(Span::styled(
            format!(" Operations ({} active) ", downloads.active_count()),
            theme.title(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    let inner = block.inner(body);
    frame.render_widget(block, body);

    if operations.is_empty() {
        frame.render_widget(Paragraph::new(Span::styled("No downloads.", theme.dim())), inner);
        return;
    }

    let visible = (inner.height / ROW_HEIGHT) as usize;
    let start = window_start(cursor.selected, operations.len(), visible);
    for (offset, op) in operations.iter().skip(start).take(visible).enumerate() {
        let index = start + offset;
        let rect = Rect::new(inner.x, inner.y + offset as u16 * ROW_HEIGHT, inner.width, ROW_HEIGHT);
        let [title, bar] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(rect);

        let phase_style = match op.phase {
            OperationPhase::Completed => theme.success(),
            OperationPhase::Failed(_) => theme.error(),
            OperationPhase::Cancelling | OperationPhase::Cancelled => theme.warning(),
            OperationPhase::Running => theme.accent(),
        };
        let name_style = if index == cursor.selected { theme.selected() } else { theme.text() };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(truncate_string(&op.name, 40), name_style),
                Span::styled(format!("  {}", op.phase.label()), phase_style),
                Span::styled(format!("  {}", detail(op)), theme.dim()),
            ])),
            title,
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(phase_style)
                .ratio(op.ratio())
                .label(format!("{:.0}%", op.ratio() * 100.0)),
            bar,
        );
        hits.register(rect, ClickAction::SelectRow(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::OperationEvent;
    use crate::state::{DownloadsMsg, DownloadsStore};

    #[test]
    fn test_detail_shows_counters_and_bytes() {
        let mut store = DownloadsStore::new();
        store.apply(DownloadsMsg::Operation(OperationEvent::Progress {
            operation_id: "op".into(),
            phase: Some("downloading".into()),
            current: 1,
            total: 4,
            bytes: 12345,
            speed: 10,
        }));
        let text = detail(store.get("op").unwrap());
        assert!(text.contains("downloading"));
        assert!(text.contains("1 / 4"));
        assert!(text.contains("12.1 KiB"));
        assert!(text.contains(&format_speed(10)));
    }
}
