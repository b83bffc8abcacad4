use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::split_toolbar;
use crate::app::App;
use crate::models::InstanceStatus;
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, ButtonSpec, ListSpec,
};
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let (toolbar, body) = split_toolbar(area, theme);
    let store = &app.instances;
    let selected = store.selected();
    let action = match selected {
        Some(i) if i.status.is_running() => "Stop",
        _ => "Start",
    };
    let busy = selected.map_or(true, |i| store.is_pending(&i.id) || i.status.is_transitional());
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("enter", action, Button::ToggleInstance).enabled(!busy),
            ButtonSpec::new("r", "Refresh", Button::Refresh),
        ],
    );

    let [status, list] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
    let status_line = loadable_status(&store.list, "instances", theme, app.tick_count).or_else(|| {
        store
            .action_error
            .as_ref()
            .map(|e| Line::from(Span::styled(e.clone(), theme.error())))
    });
    if let Some(line) = status_line {
        frame.render_widget(Paragraph::new(line), status);
    }

    let rows = store
        .instances()
        .iter()
        .map(|instance| {
            let style = match instance.status {
                InstanceStatus::Running => theme.success(),
                InstanceStatus::Crashed => theme.error(),
                s if s.is_transitional() => theme.warning(),
                _ => theme.dim(),
            };
            let status = if store.is_pending(&instance.id) {
                "working".to_string()
            } else {
                instance.status.label().to_string()
            };
            Line::from(vec![
                Span::styled(theme.icon("● "), style),
                Span::styled(format!("{:<28}", instance.name), theme.text()),
                Span::styled(format!("{:<18}", instance.version_label()), theme.dim()),
                Span::styled(status, style),
            ])
        })
        .collect();

    render_list(
        frame,
        list,
        theme,
        hits,
        ListSpec {
            title: format!("Instances ({})", store.instances().len()),
            rows,
            selected: Some(store.cursor.selected),
            empty: "No instances. Import some from another launcher on the Transfer screen.",
            on_click: ClickAction::SelectRow,
        },
    );
}
