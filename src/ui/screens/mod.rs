//! One module per screen. Each draws into the body area below the header
//! and registers its hit areas.

pub mod catalog;
pub mod downloads;
pub mod instances;
pub mod patches;
pub mod performance;
pub mod recipes;
pub mod resources;
pub mod settings;
pub mod sync;
pub mod transfer;

use ratatui::layout::{Constraint, Layout, Rect};

use crate::app::App;
use crate::ui::theme::Theme;

/// Toolbar row, then the rest of `area` after the theme's gap.
pub(crate) fn split_toolbar(area: Rect, theme: &Theme) -> (Rect, Rect) {
    let [toolbar, _, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(theme.gap()),
        Constraint::Min(0),
    ])
    .areas(area);
    (toolbar, body)
}

/// Display name of an instance id, falling back to the id itself.
pub(crate) fn instance_name(app: &App, id: Option<&str>) -> String {
    match id {
        Some(id) => app
            .instances
            .get(id)
            .map_or_else(|| id.to_string(), |i| i.name.clone()),
        None => "none".to_string(),
    }
}
