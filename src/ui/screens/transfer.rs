use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::split_toolbar;
use crate::app::{App, ScreenView, TransferPane, TransferView};
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, ButtonSpec, ListSpec,
};
use crate::ui::helpers::percent;
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Transfer(view) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("enter", "Import selected", Button::StartImport)
                .enabled(!view.import.running && !view.import.selected.is_empty()),
            ButtonSpec::new("enter", "Export", Button::StartExport).enabled(
                !view.export.running
                    && !view.export.project_id.trim().is_empty()
                    && !view.export.path.trim().is_empty(),
            ),
            ButtonSpec::new("r", "Detect launchers", Button::Refresh),
        ],
    );

    let [import, export] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(body);
    render_import(frame, import, app, view, theme, hits);
    render_export(frame, export, view, theme);
}

fn pane_block<'a>(title: &str, active: bool, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {} ", title), theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if active { theme.accent() } else { theme.border() })
}

fn render_import(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &TransferView,
    theme: &Theme,
    hits: &mut HitAreaRegistry,
) {
    let store = &view.import;
    let block = pane_block("Import [←]", view.pane == TransferPane::Import, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [launchers, instances, progress] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(inner);

    let rows = store
        .launchers()
        .iter()
        .map(|l| {
            Line::from(vec![
                Span::styled(format!("{:<16}", l.name), theme.text()),
                Span::styled(format!("{} instances  ", l.instances.len()), theme.dim()),
                Span::styled(l.path.clone(), theme.dim()),
            ])
        })
        .collect();
    render_list(
        frame,
        launchers,
        theme,
        hits,
        ListSpec {
            title: "Launchers [ ]".to_string(),
            rows,
            selected: Some(store.cursor.selected),
            empty: if store.launchers.loading { "Detecting..." } else { "No launchers found." },
            on_click: ClickAction::SelectRow,
        },
    );

    let rows = store
        .current_launcher()
        .map(|l| {
            l.instances
                .iter()
                .map(|i| {
                    let checked = store.selected.contains(&i.id);
                    let version = match (&i.minecraft_version, &i.loader) {
                        (Some(v), Some(l)) => format!("{} {}", v, l),
                        (Some(v), None) => v.clone(),
                        _ => String::new(),
                    };
                    Line::from(vec![
                        Span::styled(if checked { "[x] " } else { "[ ] " }, theme.accent()),
                        Span::styled(format!("{:<28}", i.name), theme.text()),
                        Span::styled(version, theme.dim()),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();
    render_list(
        frame,
        instances,
        theme,
        hits,
        ListSpec {
            title: format!("Instances ({} selected) [space] [a]ll", store.selected.len()),
            rows,
            selected: Some(view.instance_cursor.selected),
            empty: "Select a launcher.",
            on_click: ClickAction::SelectDetailRow,
        },
    );

    let mut lines = Vec::new();
    if let Some(line) = loadable_status(&store.launchers, "launchers", theme, app.tick_count) {
        lines.push(line);
    }
    if let Some(error) = &store.error {
        lines.push(Line::from(Span::styled(error.clone(), theme.error())));
    }
    if let Some(p) = &store.progress {
        let file = p.current_file.clone().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{} {} ", p.phase, percent(store.ratio())), theme.accent()),
            Span::styled(file, theme.dim()),
        ]));
    }
    if store.running || store.progress.is_some() {
        let [text, bar] = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).areas(progress);
        frame.render_widget(Paragraph::new(lines), text);
        frame.render_widget(Gauge::default().gauge_style(theme.accent()).ratio(store.ratio()), bar);
    } else {
        frame.render_widget(Paragraph::new(lines), progress);
    }
}

fn render_export(frame: &mut Frame, area: Rect, view: &TransferView, theme: &Theme) {
    let store = &view.export;
    let block = pane_block("Export [→]", view.pane == TransferPane::Export, theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field = |label: &str, key: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<9}", label), theme.dim()),
            Span::styled(
                if value.is_empty() { "-".to_string() } else { value.to_string() },
                theme.text(),
            ),
            Span::styled(format!(" [{}]", key), theme.dim()),
        ])
    };
    let mut lines = vec![
        field("project", "p", &store.project_id),
        field("path", "o", &store.path),
        Line::from(""),
    ];
    if let Some(p) = &store.progress {
        lines.push(Line::from(vec![
            Span::styled(format!("{} {} ", p.stage, percent(store.ratio())), theme.accent()),
            Span::styled(p.filename.clone().unwrap_or_default(), theme.dim()),
        ]));
    } else if store.running {
        lines.push(Line::from(Span::styled("Exporting...", theme.warning())));
    }
    if let Some(output) = &store.output {
        lines.push(Line::from(Span::styled(format!("Written to {}", output), theme.success())));
    }
    if let Some(error) = &store.error {
        lines.push(Line::from(Span::styled(error.clone(), theme.error())));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
