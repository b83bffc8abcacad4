use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use super::{instance_name, split_toolbar};
use crate::app::{App, ScreenView};
use crate::models::CompatibilityStatus;
use crate::state::PatchesStore;
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, ButtonSpec, ListSpec,
};
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Patches(store) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("v", "Preview", Button::PreviewPatch)
                .enabled(store.selected().is_some() && store.instance_id.is_some()),
            ButtonSpec::new("a", "Apply", Button::ApplyPatch).enabled(store.can_apply()),
            ButtonSpec::new("r", "Refresh", Button::Refresh),
        ],
    );

    let [list, detail] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(body);

    let rows = store
        .patches()
        .iter()
        .map(|patch| {
            Line::from(vec![
                Span::styled(format!("{:<24}", patch.name), theme.text()),
                Span::styled(patch.change_label(), theme.dim()),
            ])
        })
        .collect();
    render_list(
        frame,
        list,
        theme,
        hits,
        ListSpec {
            title: format!("Patches ({})", store.patches().len()),
            rows,
            selected: Some(store.cursor.selected),
            empty: "No patches yet. Snapshot an instance, change it, then create one.",
            on_click: ClickAction::SelectRow,
        },
    );

    let block = Block::default()
        .title(Span::styled(" Preview ", theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    frame.render_widget(
        Paragraph::new(detail_lines(app, store, theme))
            .block(block)
            .wrap(Wrap { trim: true }),
        detail,
    );
}

fn detail_lines(app: &App, store: &PatchesStore, theme: &Theme) -> Vec<Line<'static>> {
    let tick = app.tick_count;
    let mut lines = vec![Line::from(vec![
        Span::styled("target ", theme.dim()),
        Span::styled(instance_name(app, store.instance_id.as_deref()), theme.text()),
        Span::styled(" [g]", theme.dim()),
    ])];
    if let Some(line) = loadable_status(&store.list, "patches", theme, tick) {
        lines.push(line);
    }
    if let Some(patch) = store.selected() {
        if let Some(description) = &patch.description {
            lines.push(Line::from(Span::styled(description.clone(), theme.text())));
        }
        if let Some(base) = &patch.base_instance {
            lines.push(Line::from(Span::styled(format!("from {}", base), theme.dim())));
        }
    }
    lines.push(Line::from(""));

    if let Some(line) = loadable_status(&store.preview, "compatibility", theme, tick) {
        lines.push(line);
    }
    if let Some(compat) = &store.preview.data {
        let style = match compat.status {
            CompatibilityStatus::Compatible => theme.success(),
            CompatibilityStatus::CompatibleWithWarnings => theme.warning(),
            CompatibilityStatus::Incompatible => theme.error(),
            CompatibilityStatus::AlreadyApplied => theme.dim(),
        };
        lines.push(Line::from(Span::styled(compat.status.label().to_string(), style)));
        for error in &compat.errors {
            lines.push(Line::from(Span::styled(format!("✗ {}", error), theme.error())));
        }
        for warning in &compat.warnings {
            lines.push(Line::from(Span::styled(format!("! {}", warning), theme.warning())));
        }
    }

    if let Some(line) = loadable_status(&store.apply_result, "apply", theme, tick) {
        lines.push(line);
    }
    if let Some(result) = &store.apply_result.data {
        let style = if result.success { theme.success() } else { theme.error() };
        lines.push(Line::from(Span::styled(
            format!("applied: +{} -{} mods", result.mods_added, result.mods_removed),
            style,
        )));
        for error in &result.errors {
            lines.push(Line::from(Span::styled(format!("✗ {}", error), theme.error())));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("New patch", theme.title())));
    if let Some(line) = loadable_status(&store.snapshot, "snapshot", theme, tick) {
        lines.push(line);
    }
    match &store.snapshot.data {
        Some(snapshot) => {
            lines.push(Line::from(Span::styled(
                format!("snapshot {} ({} mods)  [n] create patch", snapshot.id, snapshot.mod_count),
                theme.text(),
            )));
        }
        None => lines.push(Line::from(Span::styled("[s] snapshot the target first", theme.dim()))),
    }
    if let Some(line) = loadable_status(&store.create, "patch", theme, tick) {
        lines.push(line);
    }
    if let Some(created) = &store.create.data {
        lines.push(Line::from(Span::styled(format!("created {}", created.name), theme.success())));
    }
    lines
}
