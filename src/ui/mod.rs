//! Terminal rendering.
//!
//! Every frame rebuilds the [`Theme`] from the active preference profile and
//! re-registers the hit areas that mouse events are tested against. Layout is
//! header, screen body, then an optional status line; an open prompt draws on
//! top of everything.

pub mod components;
pub mod helpers;
pub mod interaction;
pub mod screens;
pub mod theme;

mod header;
mod prompt;
mod status_line;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};

use crate::app::{App, Screen};
use header::render_header;
use interaction::HitAreaRegistry;
use prompt::render_prompt;
use status_line::render_status_line;

/// Draw the whole shell.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.viewport = (area.width, area.height);

    let mut hits = std::mem::take(&mut app.hit_areas);
    hits.clear();
    let theme = Theme::from_profile(app.ctx.preferences.active());
    draw(frame, area, app, &theme, &mut hits);
    app.hit_areas = hits;
}

fn draw(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let status_height = u16::from(theme.show_status_line);
    let [header, _, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(theme.gap()),
        Constraint::Min(0),
        Constraint::Length(status_height),
    ])
    .areas(area);

    render_header(frame, header, app, theme, hits);
    render_screen(frame, body, app, theme, hits);
    if theme.show_status_line {
        render_status_line(frame, status, app, theme, hits);
    }
    if let Some(prompt) = &app.prompt {
        render_prompt(frame, area, prompt, theme);
    }
}

fn render_screen(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    match app.screen {
        Screen::Instances => screens::instances::render(frame, area, app, theme, hits),
        Screen::Catalog => screens::catalog::render(frame, area, app, theme, hits),
        Screen::Resources => screens::resources::render(frame, area, app, theme, hits),
        Screen::Performance => screens::performance::render(frame, area, app, theme, hits),
        Screen::Downloads => screens::downloads::render(frame, area, app, theme, hits),
        Screen::Recipes => screens::recipes::render(frame, area, app, theme, hits),
        Screen::Patches => screens::patches::render(frame, area, app, theme, hits),
        Screen::Sync => screens::sync::render(frame, area, app, theme, hits),
        Screen::Transfer => screens::transfer::render(frame, area, app, theme, hits),
        Screen::Settings => screens::settings::render(frame, area, app, theme, hits),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::adapters::MockGateway;
    use crate::app::{AppContext, Prompt, PromptTarget};
    use crate::config::DeckConfig;
    use crate::state::Toast;
    use crate::ui::interaction::ClickAction;

    fn create_test_app() -> App {
        let ctx = AppContext::with_gateway(DeckConfig::default(), Arc::new(MockGateway::new()));
        App::new(ctx)
    }

    fn draw_app(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[tokio::test]
    async fn test_render_every_screen() {
        let mut app = create_test_app();
        for screen in Screen::ALL {
            app.switch_screen(screen);
            let text = buffer_text(&draw_app(&mut app, 160, 32));
            assert!(text.contains(screen.title()), "{} missing title", screen.title());
        }
    }

    #[tokio::test]
    async fn test_render_tiny_terminal_does_not_panic() {
        let mut app = create_test_app();
        for screen in Screen::ALL {
            app.switch_screen(screen);
            draw_app(&mut app, 12, 4);
        }
    }

    #[test]
    fn test_render_registers_header_tabs() {
        let mut app = create_test_app();
        draw_app(&mut app, 160, 32);
        assert_eq!(app.viewport, (160, 32));
        let switches = Screen::ALL
            .iter()
            .filter(|s| {
                (0..160).any(|x| app.hit_areas.hit_test(x, 0) == Some(ClickAction::SwitchScreen(**s)))
            })
            .count();
        assert_eq!(switches, Screen::ALL.len());
    }

    #[test]
    fn test_hit_areas_rebuilt_each_frame() {
        let mut app = create_test_app();
        draw_app(&mut app, 160, 32);
        let first = app.hit_areas.len();
        draw_app(&mut app, 160, 32);
        assert_eq!(app.hit_areas.len(), first);
    }

    #[test]
    fn test_toast_in_status_line_is_dismissable() {
        let mut app = create_test_app();
        app.ctx.notify(Toast::error("Backend unreachable"));
        let text = buffer_text(&draw_app(&mut app, 160, 32));
        assert!(text.contains("Backend unreachable"));
        assert!(matches!(app.hit_areas.hit_test(2, 31), Some(ClickAction::DismissToast(_))));
    }

    #[test]
    fn test_status_line_hidden_by_profile() {
        let mut app = create_test_app();
        app.ctx.preferences.update_active(|p| p.show_status_line = false);
        app.ctx.notify(Toast::info("hidden"));
        let text = buffer_text(&draw_app(&mut app, 160, 32));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_prompt_overlay() {
        let mut app = create_test_app();
        app.prompt = Some(Prompt::new(PromptTarget::PatchName, "pre-1.21"));
        let text = buffer_text(&draw_app(&mut app, 100, 30));
        assert!(text.contains("Patch name"));
        assert!(text.contains("pre-1.21"));
    }
}
