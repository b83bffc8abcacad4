use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use serde_json::Value;

use super::split_toolbar;
use crate::app::{App, ScreenView, SettingsSection, SettingsView};
use crate::state::{Density, ThemeMode};
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, render_tab_selector, ButtonSpec, ListSpec,
    TabItem,
};
use crate::ui::helpers::truncate_string;
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Settings(view) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    let dirty = match view.section {
        SettingsSection::General => view.settings.is_dirty(),
        SettingsSection::Appearance => app.ctx.preferences.is_dirty(),
        SettingsSection::Translations => view.translations.is_dirty(),
    };
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("w", "Save", Button::Save).enabled(dirty),
            ButtonSpec::new("r", "Reload", Button::Refresh),
        ],
    );

    let [tabs, content] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(body);
    let items: Vec<TabItem> = SettingsSection::ALL
        .iter()
        .map(|s| TabItem {
            label: s.label().to_string(),
            action: ClickAction::SelectSection(*s),
        })
        .collect();
    let selected = SettingsSection::ALL
        .iter()
        .position(|s| *s == view.section)
        .unwrap_or(0);
    render_tab_selector(frame, tabs, theme, hits, &items, selected);

    match view.section {
        SettingsSection::General => render_general(frame, content, app, view, theme, hits),
        SettingsSection::Appearance => render_appearance(frame, content, app, theme, hits),
        SettingsSection::Translations => render_translations(frame, content, app, view, theme, hits),
    }
}

fn value_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn render_general(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &SettingsView,
    theme: &Theme,
    hits: &mut HitAreaRegistry,
) {
    let store = &view.settings;
    let [status, list] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let status_line = loadable_status(&store.save, "save", theme, app.tick_count)
        .or_else(|| loadable_status(&store.remote, "settings", theme, app.tick_count))
        .unwrap_or_else(|| {
            Line::from(Span::styled(
                "[enter] edit  [space] toggle  [z] revert",
                theme.dim(),
            ))
        });
    frame.render_widget(Paragraph::new(status_line), status);

    let value_width = list.width.saturating_sub(36) as usize;
    let rows = store
        .keys()
        .into_iter()
        .map(|key| {
            let edited = store.is_edited(key);
            Line::from(vec![
                Span::styled(if edited { "* " } else { "  " }, theme.warning()),
                Span::styled(format!("{:<30}", truncate_string(key, 30)), theme.text()),
                Span::styled(
                    truncate_string(&value_text(store.value(key)), value_width),
                    if edited { theme.warning() } else { theme.dim() },
                ),
            ])
        })
        .collect();
    render_list(
        frame,
        list,
        theme,
        hits,
        ListSpec {
            title: "Backend settings".to_string(),
            rows,
            selected: Some(store.cursor.selected),
            empty: "No settings.",
            on_click: ClickAction::SelectRow,
        },
    );
}

fn render_appearance(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let prefs = &app.ctx.preferences;
    let [profiles, detail] =
        Layout::horizontal([Constraint::Length(30), Constraint::Min(20)]).areas(area);
    let active_name = &prefs.preferences().active_profile;
    let rows = prefs
        .preferences()
        .profiles
        .iter()
        .map(|p| {
            let marker = if &p.name == active_name { "● " } else { "  " };
            Line::from(vec![
                Span::styled(marker, theme.accent()),
                Span::styled(p.name.clone(), theme.text()),
            ])
        })
        .collect();
    let active_index = prefs
        .preferences()
        .profiles
        .iter()
        .position(|p| &p.name == active_name);
    render_list(
        frame,
        profiles,
        theme,
        hits,
        ListSpec {
            title: "Profiles [p] [n] [x]".to_string(),
            rows,
            selected: active_index,
            empty: "No profiles.",
            on_click: ClickAction::SelectRow,
        },
    );

    let profile = prefs.active();
    let on_off = |b: bool| if b { "on" } else { "off" };
    let row = |label: &str, key: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), theme.dim()),
            Span::styled(value, style),
            Span::styled(format!("  [{}]", key), theme.dim()),
        ])
    };
    let mut lines = vec![
        row(
            "Theme",
            "t",
            match profile.theme {
                ThemeMode::Dark => "dark",
                ThemeMode::Light => "light",
            }
            .to_string(),
            theme.text(),
        ),
        row(
            "Density",
            "d",
            match profile.density {
                Density::Comfortable => "comfortable",
                Density::Compact => "compact",
            }
            .to_string(),
            theme.text(),
        ),
        row("Accent", "a", format!("■ {}", profile.accent_color), theme.accent()),
        row("Status line", "s", on_off(profile.show_status_line).to_string(), theme.text()),
        row("Icons", "i", on_off(profile.show_icons).to_string(), theme.text()),
        row("Download badge", "b", on_off(profile.show_download_count).to_string(), theme.text()),
        Line::from(""),
        Line::from(Span::styled(
            "[c] copy profiles to clipboard  [v] import from clipboard",
            theme.dim(),
        )),
    ];
    if prefs.is_dirty() {
        lines.push(Line::from(Span::styled("Unsaved changes [w]", theme.warning())));
    }
    for line in [
        loadable_status(&prefs.load, "preferences", theme, app.tick_count),
        loadable_status(&prefs.save, "save", theme, app.tick_count),
    ]
    .into_iter()
    .flatten()
    {
        lines.push(line);
    }
    let inner = Rect {
        x: detail.x + 2,
        width: detail.width.saturating_sub(2),
        ..detail
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_translations(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &SettingsView,
    theme: &Theme,
    hits: &mut HitAreaRegistry,
) {
    let store = &view.translations;
    let [status, lists] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let status_line = loadable_status(&store.entries, "entries", theme, app.tick_count)
        .or_else(|| loadable_status(&store.langs, "languages", theme, app.tick_count))
        .or_else(|| {
            store
                .action_error
                .as_ref()
                .map(|e| Line::from(Span::styled(e.clone(), theme.error())))
        })
        .unwrap_or_else(|| {
            let text = if store.saving {
                "Saving..."
            } else {
                "[enter] open  [n] new language  [e] set entry  [x] remove  [D] delete language"
            };
            Line::from(Span::styled(text, theme.dim()))
        });
    frame.render_widget(Paragraph::new(status_line), status);

    let [langs, entries] =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(20)]).areas(lists);
    let open = store.lang.as_deref();
    let rows = store
        .langs()
        .iter()
        .map(|lang| {
            let style = if Some(lang.as_str()) == open { theme.accent() } else { theme.text() };
            Line::from(Span::styled(lang.clone(), style))
        })
        .collect();
    render_list(
        frame,
        langs,
        theme,
        hits,
        ListSpec {
            title: "Languages [ ]".to_string(),
            rows,
            selected: Some(store.cursor.selected),
            empty: "None yet.",
            on_click: ClickAction::SelectRow,
        },
    );

    let key_width = (entries.width / 2) as usize;
    let rows = store
        .entry_list()
        .into_iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<w$} ", truncate_string(key, key_width), w = key_width),
                    theme.accent(),
                ),
                Span::styled(value.to_string(), theme.text()),
            ])
        })
        .collect();
    let title = match open {
        Some(lang) if store.is_dirty() => format!("{} (unsaved)", lang),
        Some(lang) => lang.to_string(),
        None => "Entries".to_string(),
    };
    render_list(
        frame,
        entries,
        theme,
        hits,
        ListSpec {
            title,
            rows,
            selected: open.map(|_| store.entry_cursor.selected),
            empty: if open.is_some() { "No entries." } else { "Open a language." },
            on_click: ClickAction::SelectDetailRow,
        },
    );
}
