//! Top bar: app name, screen tabs and the active download badge.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::components::{render_tab_selector, TabItem};
use super::interaction::{ClickAction, HitAreaRegistry};
use super::theme::Theme;
use crate::app::{App, Screen};

const APP_NAME: &str = " packdeck ";

pub fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let active = app.ctx.downloads.active_count();
    let badge = if theme.show_download_count && active > 0 {
        format!("{}{} ", theme.icon("↓ "), active)
    } else {
        String::new()
    };
    let [name, tabs, downloads] = Layout::horizontal([
        Constraint::Length(APP_NAME.len() as u16 + 1),
        Constraint::Min(0),
        Constraint::Length(badge.len() as u16),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(Span::styled(APP_NAME, theme.title())), name);

    let items: Vec<TabItem> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| TabItem {
            label: if theme.compact {
                screen.title().to_string()
            } else {
                format!("{} {}", (i + 1) % 10, screen.title())
            },
            action: ClickAction::SwitchScreen(*screen),
        })
        .collect();
    render_tab_selector(frame, tabs, theme, hits, &items, app.screen.index());

    if !badge.is_empty() {
        frame.render_widget(Paragraph::new(Line::from(Span::styled(badge, theme.accent()))), downloads);
        hits.register(downloads, ClickAction::SwitchScreen(Screen::Downloads));
    }
}
