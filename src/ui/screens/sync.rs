use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{instance_name, split_toolbar};
use crate::app::{App, ScreenView};
use crate::models::SyncFileKind;
use crate::ui::components::{
    loadable_status, render_button_bar, render_list, ButtonSpec, ListSpec,
};
use crate::ui::helpers::format_bytes;
use crate::ui::interaction::{Button, ClickAction, HitAreaRegistry};
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let ScreenView::Sync(store) = &app.view else {
        return;
    };
    let (toolbar, body) = split_toolbar(area, theme);
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("v", "Preview", Button::PreviewSync).enabled(store.pair().is_some()),
            ButtonSpec::new("x", "Sync", Button::ExecuteSync).enabled(store.can_execute()),
        ],
    );

    let [pair, status, list] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(body);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[s] from ", theme.dim()),
            Span::styled(instance_name(app, store.source_id.as_deref()), theme.text()),
            Span::styled("   [t] to ", theme.dim()),
            Span::styled(instance_name(app, store.target_id.as_deref()), theme.text()),
        ])),
        pair,
    );

    let result_line = store.result.data.as_ref().map(|r| {
        let style = if r.errors.is_empty() { theme.success() } else { theme.warning() };
        Line::from(Span::styled(r.summary(), style))
    });
    let status_line = loadable_status(&store.result, "sync", theme, app.tick_count)
        .or_else(|| loadable_status(&store.preview, "preview", theme, app.tick_count))
        .or(result_line)
        .or_else(|| {
            (store.source_id.is_some() && store.source_id == store.target_id)
                .then(|| Line::from(Span::styled("Source and target are the same instance", theme.warning())))
        });
    if let Some(line) = status_line {
        frame.render_widget(Paragraph::new(line), status);
    }

    let files = store.preview.data.as_ref().map_or(&[][..], |p| p.files.as_slice());
    let rows = files
        .iter()
        .map(|file| {
            let style = match file.kind {
                SyncFileKind::New => theme.success(),
                SyncFileKind::Changed => theme.warning(),
                _ => theme.dim(),
            };
            Line::from(vec![
                Span::styled(format!("{:<10}", file.kind.label()), style),
                Span::styled(file.path.clone(), theme.text()),
                Span::styled(
                    file.size.map(|s| format!("  {}", format_bytes(s))).unwrap_or_default(),
                    theme.dim(),
                ),
            ])
        })
        .collect();
    let title = match &store.preview.data {
        Some(preview) => format!("Changes ({} to write)", preview.write_count()),
        None => "Changes".to_string(),
    };
    render_list(
        frame,
        list,
        theme,
        hits,
        ListSpec {
            title,
            rows,
            selected: None,
            empty: "Pick two instances and preview to see what would be copied.",
            on_click: ClickAction::SelectDetailRow,
        },
    );
}
