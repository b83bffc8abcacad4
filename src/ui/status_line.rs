//! Bottom line: newest toast (click to dismiss) or key hints, plus the
//! event channel state.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::interaction::{ClickAction, HitAreaRegistry};
use super::theme::Theme;
use crate::app::App;
use crate::events::ConnectionState;

const HINTS: &str = "tab/1-0 screens  ↑↓ select  q quit";

pub fn render_status_line(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let connection = app.connection.label();
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(connection.len() as u16 + 4),
    ])
    .areas(area);

    match app.ctx.toasts.latest() {
        Some(active) => {
            let style = theme.toast(active.toast.level);
            let count = app.ctx.toasts.visible().len();
            let more = if count > 1 { format!("  (+{})", count - 1) } else { String::new() };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!(" {}", active.toast.message), style),
                    Span::styled(more, theme.dim()),
                    Span::styled("  ✕", theme.dim()),
                ])),
                left,
            );
            hits.register(left, ClickAction::DismissToast(active.id));
        }
        None => {
            frame.render_widget(Paragraph::new(Span::styled(format!(" {}", HINTS), theme.dim())), left);
        }
    }

    let style = match app.connection {
        ConnectionState::Connected => theme.success(),
        ConnectionState::Disconnected => theme.error(),
        _ => theme.warning(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(theme.icon("● "), style),
            Span::styled(connection, style),
        ]))
        .right_aligned(),
        right,
    );
}
