//! Recipe builder: palette, crafting grid and live preview.
//!
//! Palette items are dragged onto grid slots or the output cell. Slots and
//! the output cell are registered as drop targets so the drag state can
//! hit-test them while the pointer moves.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::split_toolbar;
use crate::app::App;
use crate::recipe::{ItemId, GRID_SIZE};
use crate::ui::components::{render_button_bar, ButtonSpec};
use crate::ui::helpers::truncate_string;
use crate::ui::interaction::{Button, ClickAction, DropTarget, HitAreaRegistry};
use crate::ui::theme::Theme;
use crate::view_state::paginate;

const CELL_WIDTH: u16 = 14;
const CELL_HEIGHT: u16 = 3;
const PALETTE_ITEM_WIDTH: u16 = 16;

fn cell<'a>(item: Option<&ItemId>, border: Style, theme: &Theme) -> Paragraph<'a> {
    let text = item.map_or(Span::styled("·", theme.dim()), |id| {
        Span::styled(
            truncate_string(id.short_name(), CELL_WIDTH as usize - 2),
            theme.text(),
        )
    });
    Paragraph::new(Line::from(text).centered()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border),
    )
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let store = &app.recipes;
    let (toolbar, body) = split_toolbar(area, theme);
    render_button_bar(
        frame,
        toolbar,
        theme,
        hits,
        vec![
            ButtonSpec::new("k", store.form.kind.label(), Button::CycleRecipeKind),
            ButtonSpec::new("f", store.format.label(), Button::CycleFormat),
            ButtonSpec::new("x", "Clear grid", Button::ClearGrid),
        ],
    );

    let grid_width = CELL_WIDTH * GRID_SIZE as u16 + CELL_WIDTH + 4;
    let [left, right] =
        Layout::horizontal([Constraint::Length(grid_width.max(40)), Constraint::Min(20)]).areas(body);
    let per_row = (left.width.saturating_sub(2) / PALETTE_ITEM_WIDTH).max(1) as usize;
    let palette_rows = paginate(&store.palette, per_row).len();
    let [palette, form, grid] = Layout::vertical([
        Constraint::Length(palette_rows as u16 + 2),
        Constraint::Length(3),
        Constraint::Min(CELL_HEIGHT * GRID_SIZE as u16),
    ])
    .areas(left);

    render_palette(frame, palette, app, theme, hits);
    render_form(frame, form, app, theme);
    render_grid(frame, grid, app, theme, hits);
    render_preview(frame, right, app, theme);
    render_drag_ghost(frame, app, theme);
}

fn render_palette(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let store = &app.recipes;
    let block = Block::default()
        .title(Span::styled(" Palette [p] add ", theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let per_row = (inner.width / PALETTE_ITEM_WIDTH).max(1) as usize;
    for row in paginate(&store.palette, per_row) {
        let y = inner.y + row.index as u16;
        if y >= inner.y + inner.height {
            break;
        }
        for (column, item) in row.items.iter().enumerate() {
            let index = row.index * per_row + column;
            let rect = Rect::new(inner.x + column as u16 * PALETTE_ITEM_WIDTH, y, PALETTE_ITEM_WIDTH, 1);
            let style = if app.drag.dragged() == Some(index) {
                theme.selected()
            } else {
                theme.accent()
            };
            let label = truncate_string(item.short_name(), PALETTE_ITEM_WIDTH as usize - 1);
            frame.render_widget(Paragraph::new(Span::styled(label, style)), rect);
            hits.register(rect, ClickAction::PaletteItem(index));
        }
    }
    if let Some(error) = &store.input_error {
        let rect = Rect::new(area.x + 2, area.y + area.height.saturating_sub(1), area.width.saturating_sub(4), 1);
        frame.render_widget(Paragraph::new(Span::styled(error.clone(), theme.error())), rect);
    }
}

fn render_form(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let form = &app.recipes.form;
    let mut spans = vec![
        Span::styled("count ", theme.dim()),
        Span::styled(format!("{} [+/-]", form.count), theme.text()),
    ];
    if form.kind.is_cooking() {
        spans.push(Span::styled("  time ", theme.dim()));
        spans.push(Span::styled(format!("{}s [t/T]", form.cook_time / 20), theme.text()));
        spans.push(Span::styled("  xp ", theme.dim()));
        spans.push(Span::styled(format!("{:.2} [e/E]", form.experience), theme.text()));
    }
    let id_line = Line::from(vec![
        Span::styled("id ", theme.dim()),
        Span::styled(form.recipe_name(), theme.text()),
        Span::styled(" [n]", theme.dim()),
    ]);
    frame.render_widget(Paragraph::new(vec![Line::from(spans), id_line]), area);
}

fn render_grid(frame: &mut Frame, area: Rect, app: &App, theme: &Theme, hits: &mut HitAreaRegistry) {
    let store = &app.recipes;
    let hover = app.drag.hover();
    let border_for = |target: DropTarget, focused: bool| {
        if hover == Some(target) {
            theme.selected()
        } else if focused {
            theme.accent()
        } else {
            theme.border()
        }
    };

    let uses_grid = store.form.kind.uses_grid();
    let cells = if uses_grid { GRID_SIZE * GRID_SIZE } else { 1 };
    for slot in 0..cells {
        let (row, column) = (slot / GRID_SIZE, slot % GRID_SIZE);
        let rect = Rect::new(
            area.x + column as u16 * CELL_WIDTH,
            area.y + row as u16 * CELL_HEIGHT,
            CELL_WIDTH,
            CELL_HEIGHT,
        );
        if rect.bottom() > area.bottom() || rect.right() > area.right() {
            continue;
        }
        let item = store.form.grid.get(slot).and_then(Option::as_ref);
        let border = border_for(DropTarget::GridSlot(slot), store.focused_slot == slot);
        frame.render_widget(cell(item, border, theme), rect);
        hits.register_drop_target(rect, ClickAction::GridSlot(slot), DropTarget::GridSlot(slot));
    }

    let columns = if uses_grid { GRID_SIZE as u16 } else { 1 };
    let output = Rect::new(
        area.x + columns * CELL_WIDTH + 4,
        area.y + CELL_HEIGHT,
        CELL_WIDTH,
        CELL_HEIGHT,
    );
    if output.right() <= area.right() && output.bottom() <= area.bottom() {
        let arrow = Rect::new(output.x - 3, output.y + 1, 2, 1);
        frame.render_widget(Paragraph::new(Span::styled("→", theme.dim())), arrow);
        frame.render_widget(
            cell(store.form.output.as_ref(), border_for(DropTarget::Output, false), theme),
            output,
        );
        hits.register_drop_target(output, ClickAction::OutputSlot, DropTarget::Output);
    }
}

fn render_preview(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let store = &app.recipes;
    let title = format!(" {} (.{}) [c] copy ", store.format.label(), store.format.file_extension());
    let block = Block::default()
        .title(Span::styled(title, theme.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    let content = match store.validation() {
        Some(err) => Paragraph::new(Span::styled(err.to_string(), theme.dim())),
        None => Paragraph::new(store.preview().to_string()).style(theme.text()),
    };
    frame.render_widget(content.block(block).wrap(Wrap { trim: false }), area);
}

/// Label following the pointer while an item is dragged.
fn render_drag_ghost(frame: &mut Frame, app: &App, theme: &Theme) {
    let (Some(index), Some((x, y))) = (app.drag.dragged(), app.drag.pointer()) else {
        return;
    };
    let Some(item) = app.recipes.palette.get(index) else {
        return;
    };
    let screen = frame.area();
    let label = truncate_string(item.short_name(), PALETTE_ITEM_WIDTH as usize);
    let width = (label.len() as u16 + 2).min(screen.width.saturating_sub(x));
    let rect = Rect::new(x.saturating_add(1).min(screen.right().saturating_sub(1)), y, width, 1);
    if rect.width == 0 || rect.y >= screen.bottom() {
        return;
    }
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(Span::styled(format!(" {} ", label), theme.selected())), rect);
}
