use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{instance_name, split_toolbar};
use crate::app::{App, ScreenView};
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, ButtonSpec, ListSpec,
};
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Resources(store) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("t", store.resource_type.toggle().label(), Button::ToggleResourceType),
            ButtonSpec::new("r", "Refresh", Button::Refresh),
        ],
    );

    let [filter, status, list] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(body);

    let scope = match store.scope.instance_id() {
        Some(id) => instance_name(app, Some(id)),
        None => store.scope.label(),
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{}s", store.resource_type.label()), theme.title()),
            Span::styled(format!("  scope: {}", scope), theme.text()),
            Span::styled("   [g] scope  [space] enable  [d] remove  [i] install", theme.dim()),
        ])),
        filter,
    );

    let status_line = loadable_status(&store.install, "install", theme, app.tick_count)
        .or_else(|| loadable_status(&store.list, "resources", theme, app.tick_count))
        .or_else(|| {
            store
                .action_error
                .as_ref()
                .map(|e| Line::from(Span::styled(e.clone(), theme.error())))
        });
    if let Some(line) = status_line {
        frame.render_widget(Paragraph::new(line), status);
    }

    let rows = store
        .resources()
        .iter()
        .map(|resource| {
            let (mark, style) = if store.is_removing(resource.id) {
                ("removing", theme.warning())
            } else if resource.enabled {
                ("enabled", theme.success())
            } else {
                ("disabled", theme.dim())
            };
            Line::from(vec![
                Span::styled(format!("{:<9}", mark), style),
                Span::styled(format!("{:<32}", resource.name), theme.text()),
                Span::styled(resource.version.clone().unwrap_or_default(), theme.dim()),
                Span::styled(format!("  {}", resource.file_name), theme.dim()),
            ])
        })
        .collect();

    render_list(
        frame,
        list,
        theme,
        hits,
        ListSpec {
            title: format!("{}s ({})", store.resource_type.label(), store.resources().len()),
            rows,
            selected: Some(store.cursor.selected),
            empty: "Nothing installed here.",
            on_click: ClickAction::SelectRow,
        },
    );
}
