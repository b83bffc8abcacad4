use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Sparkline, Wrap},
    Frame,
};

use super::{instance_name, split_toolbar};
use crate::app::{App, ScreenView};
use crate::events::Severity;
use crate::ui::components::{render_button_bar, spinner_char, ButtonSpec};
use crate::ui::interaction::{Button, HitAreaRegistry};
use crate::ui::theme::Theme;
use crate::view_state::metric;

fn block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Performance(store) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    let label = if store.monitoring { "Stop monitoring" } else { "Start monitoring" };
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![ButtonSpec::new("m", label, Button::ToggleMonitoring)
            .enabled(store.instance_id.is_some() && !store.pending)],
    );

    let [header, chart, bottlenecks] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Min(0),
    ])
    .areas(body);

    let summary = store.summary();
    let state = if store.pending {
        Span::styled(format!("{} waiting", spinner_char(app.tick_count)), theme.warning())
    } else if store.monitoring {
        Span::styled("monitoring", theme.success())
    } else {
        Span::styled("idle", theme.dim())
    };
    let tps_style = if summary.is_lagging() { theme.error() } else { theme.success() };
    let mut lines = vec![Line::from(vec![
        Span::styled(instance_name(app, store.instance_id.as_deref()), theme.title()),
        Span::raw("  "),
        state,
        Span::styled("   [g] instance", theme.dim()),
    ])];
    lines.push(Line::from(vec![
        Span::styled("TPS ", theme.dim()),
        Span::styled(metric(summary.tps), tps_style),
        Span::styled("  MSPT ", theme.dim()),
        Span::styled(metric(summary.mspt), tps_style),
        Span::styled("  CPU ", theme.dim()),
        Span::styled(format!("{}%", metric(summary.cpu_percent)), theme.text()),
        Span::styled("  MEM ", theme.dim()),
        Span::styled(summary.memory_display(), theme.text()),
        Span::styled(format!("  ({} samples)", summary.samples), theme.dim()),
    ]));
    if let Some(error) = &store.error {
        lines.push(Line::from(Span::styled(error.clone(), theme.error())));
    }
    frame.render_widget(Paragraph::new(lines), header);

    // Sparkline wants integers; TPS is scaled to tenths.
    let inner_width = chart.width.saturating_sub(2) as usize;
    let points: Vec<u64> = store
        .snapshots
        .last_n(inner_width)
        .map(|s| s.tps.map_or(0, |t| (t * 10.0).round().max(0.0) as u64))
        .collect();
    frame.render_widget(
        Sparkline::default()
            .block(block("TPS", theme))
            .data(&points)
            .max(200)
            .style(theme.accent()),
        chart,
    );

    let lines: Vec<Line> = if store.bottlenecks.is_empty() {
        vec![Line::from(Span::styled("No bottlenecks reported.", theme.dim()))]
    } else {
        store
            .bottlenecks
            .iter()
            .flat_map(|b| {
                let style = match b.severity {
                    Severity::Critical | Severity::High => theme.error(),
                    Severity::Medium => theme.warning(),
                    Severity::Low => theme.dim(),
                };
                let mut lines = vec![Line::from(vec![
                    Span::styled(format!("{:?} ", b.severity).to_lowercase(), style),
                    Span::styled(format!("[{}] ", b.category), theme.accent()),
                    Span::styled(b.description.clone(), theme.text()),
                ])];
                if let Some(tip) = &b.recommendation {
                    lines.push(Line::from(Span::styled(format!("  {}", tip), theme.dim())));
                }
                lines
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(lines)
            .block(block("Bottlenecks", theme))
            .wrap(Wrap { trim: true }),
        bottlenecks,
    );
}
