use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::split_toolbar;
use crate::app::{App, ScreenView};
use crate::models::format_downloads;
use crate::state::{CatalogStore, InstallState};
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, ButtonSpec, ListSpec,
};
use crate::ui::helpers::truncate_string;
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

fn install_marker(store: &CatalogStore, id: &str, theme: &Theme) -> Span<'static> {
    match store.installs.get(id) {
        Some(InstallState::Requested) => Span::styled(" requested", theme.warning()),
        Some(InstallState::Running(_)) => Span::styled(" installing", theme.success()),
        Some(InstallState::Failed(e)) => Span::styled(format!(" failed: {}", e), theme.error()),
        None => Span::raw(""),
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Catalog(store) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    let total = store.total();
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("←", "Prev", Button::PreviousPage)
                .enabled(store.page.has_previous() && !store.results.loading),
            ButtonSpec::new("→", "Next", Button::NextPage)
                .enabled(store.page.has_next(total) && !store.results.loading),
            ButtonSpec::new("s", store.source.toggle().label(), Button::ToggleSource),
            ButtonSpec::new("i", "Install", Button::InstallMod)
                .enabled(store.selected().is_some() && app.instances.selected().is_some()),
            ButtonSpec::new("r", "Search", Button::Refresh),
        ],
    );

    let [query, status, list] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(body);

    let filters = match (&store.minecraft_version, &store.loader) {
        (Some(v), Some(l)) => format!("{} {}", v, l),
        (Some(v), None) => v.clone(),
        (None, Some(l)) => l.clone(),
        (None, None) => "any version".to_string(),
    };
    let input = store.input.value();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("/ ", theme.accent()),
            Span::styled(
                if input.is_empty() { "type / to search".to_string() } else { input.to_string() },
                if input.is_empty() { theme.dim() } else { theme.text() },
            ),
            Span::styled(
                format!("   {}  {}  page {}/{}", store.source.label(), filters, store.page.page_number(), store.page.page_count(total)),
                theme.dim(),
            ),
        ])),
        query,
    );
    if let Some(line) = loadable_status(&store.results, "mods", theme, app.tick_count) {
        frame.render_widget(Paragraph::new(line), status);
    }

    let width = list.width.saturating_sub(2) as usize;
    let rows = store
        .entries()
        .iter()
        .map(|entry| {
            let downloads = format_downloads(entry.downloads);
            let title_width = 32.min(width / 2);
            let description_width = width.saturating_sub(title_width + downloads.len() + 4);
            Line::from(vec![
                Span::styled(
                    format!("{:<w$}", truncate_string(&entry.title, title_width), w = title_width),
                    theme.text(),
                ),
                Span::styled(format!(" {:>7} ", downloads), theme.accent()),
                Span::styled(truncate_string(&entry.description, description_width), theme.dim()),
                install_marker(store, &entry.id, theme),
            ])
        })
        .collect();

    render_list(
        frame,
        list,
        theme,
        hits,
        ListSpec {
            title: format!("{} ({} results)", store.source.label(), total),
            rows,
            selected: Some(store.cursor.selected),
            empty: "No mods match this search.",
            on_click: ClickAction::SelectRow,
        },
    );
}
