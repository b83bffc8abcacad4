//! Keyboard and mouse input.
//!
//! Keys are handled in three layers: global shortcuts, the open prompt (if
//! any), then the mounted screen. Mouse presses are resolved through the hit
//! areas the last frame registered.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use super::{App, Prompt, PromptTarget, Screen, ScreenView, SettingsSection, TransferPane};
use crate::models::ResourceScope;
use crate::state::Toast;
use crate::ui::interaction::{Button, ClickAction, DropEvent, DropTarget};

/// Id after `current` in `ids`, wrapping. With `allow_none`, the cycle
/// passes through `None` after the last id.
fn cycle_id(ids: &[String], current: Option<&str>, allow_none: bool) -> Option<String> {
    let position = current.and_then(|c| ids.iter().position(|id| id == c));
    match position {
        None => ids.first().cloned(),
        Some(i) if i + 1 < ids.len() => Some(ids[i + 1].clone()),
        Some(_) if allow_none => None,
        Some(_) => ids.first().cloned(),
    }
}

impl App {
    fn instance_ids(&self) -> Vec<String> {
        self.instances.instances().iter().map(|i| i.id.clone()).collect()
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.mark_dirty();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => self.switch_screen(self.screen.next()),
            KeyCode::BackTab => self.switch_screen(self.screen.previous()),
            KeyCode::Esc => self.drag.cancel(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(screen) = Screen::from_digit(c) {
                    self.switch_screen(screen);
                }
            }
            _ => self.handle_screen_key(key),
        }
    }

    fn open_prompt(&mut self, target: PromptTarget, initial: impl Into<String>) {
        self.prompt = Some(Prompt::new(target, initial));
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let live_search = prompt.target == PromptTarget::CatalogSearch;
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.commit_prompt(prompt);
                }
            }
            KeyCode::Backspace => {
                prompt.buffer.pop();
                if live_search {
                    if let ScreenView::Catalog(store) = &mut self.view {
                        store.input.backspace(Instant::now());
                    }
                }
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                prompt.buffer.push(c);
                if live_search {
                    if let ScreenView::Catalog(store) = &mut self.view {
                        store.input.push_char(c, Instant::now());
                    }
                }
            }
            _ => {}
        }
    }

    fn commit_prompt(&mut self, prompt: Prompt) {
        let text = prompt.buffer.trim().to_string();
        debug!(target = prompt.target.label(), "prompt committed");
        match prompt.target {
            // Enter skips the debounce.
            PromptTarget::CatalogSearch => self.search_catalog(),
            PromptTarget::ResourceInstall => {
                if let ScreenView::Resources(store) = &mut self.view {
                    store.install_input = text;
                }
                self.install_resource();
            }
            PromptTarget::RecipePaletteItem => {
                self.recipes.item_input = text;
                self.recipes.add_palette_item();
            }
            PromptTarget::RecipeOutput => {
                self.recipes.item_input = text;
                self.recipes.set_output_from_input();
            }
            PromptTarget::RecipeId => {
                self.recipes.set_recipe_id(Some(text).filter(|t| !t.is_empty()));
            }
            PromptTarget::SettingValue => {
                if let ScreenView::Settings(view) = &mut self.view {
                    view.settings.edit_buffer = Some(prompt.buffer);
                    view.settings.commit_edit();
                    if let Some(message) = view.settings.edit_error.take() {
                        view.settings.edit_buffer = None;
                        self.ctx.notify(Toast::error(message));
                    }
                }
            }
            PromptTarget::PatchName => {
                if let ScreenView::Patches(store) = &mut self.view {
                    store.new_patch_name = text;
                }
                self.create_patch();
            }
            PromptTarget::ExportProject => {
                if let ScreenView::Transfer(view) = &mut self.view {
                    view.export.project_id = text;
                }
            }
            PromptTarget::ExportPath => {
                if let ScreenView::Transfer(view) = &mut self.view {
                    view.export.path = text;
                }
            }
            PromptTarget::TranslationLang => {
                if let ScreenView::Settings(view) = &mut self.view {
                    if let Err(message) = view.translations.create(&text) {
                        self.ctx.notify(Toast::error(message));
                    }
                }
            }
            PromptTarget::TranslationEntry => {
                let Some((key, value)) = text.split_once('=') else {
                    self.ctx.notify(Toast::error("Expected key=value"));
                    return;
                };
                if let ScreenView::Settings(view) = &mut self.view {
                    if !view.translations.set_entry(key, value.trim()) {
                        self.ctx.notify(Toast::error("Open a language first"));
                    }
                }
            }
            PromptTarget::ProfileName => {
                if let Err(message) = self.ctx.preferences.add_profile(&text) {
                    self.ctx.notify(Toast::error(message));
                }
            }
        }
    }

    fn handle_screen_key(&mut self, key: KeyEvent) {
        match self.screen {
            Screen::Instances => self.instances_key(key),
            Screen::Catalog => self.catalog_key(key),
            Screen::Resources => self.resources_key(key),
            Screen::Performance => self.performance_key(key),
            Screen::Downloads => self.downloads_key(key),
            Screen::Recipes => self.recipes_key(key),
            Screen::Patches => self.patches_key(key),
            Screen::Sync => self.sync_key(key),
            Screen::Transfer => self.transfer_key(key),
            Screen::Settings => self.settings_key(key),
        }
    }

    /// Move the main list of the mounted screen by one row.
    fn move_selection(&mut self, down: bool) {
        let step = |cursor: &mut crate::view_state::ListCursor, len: usize| {
            if down {
                cursor.select_next(len)
            } else {
                cursor.select_previous()
            }
        };
        match &mut self.view {
            ScreenView::Instances => {
                let len = self.instances.instances().len();
                step(&mut self.instances.cursor, len);
            }
            ScreenView::Catalog(store) => {
                let len = store.entries().len();
                step(&mut store.cursor, len);
            }
            ScreenView::Resources(store) => {
                let len = store.resources().len();
                step(&mut store.cursor, len);
            }
            ScreenView::Downloads(cursor) => {
                let len = self.ctx.downloads.operations().len();
                step(cursor, len);
            }
            ScreenView::Patches(store) => {
                let index = if down {
                    store.cursor.selected + 1
                } else {
                    store.cursor.selected.saturating_sub(1)
                };
                store.select(index);
            }
            ScreenView::Transfer(view) => {
                let len = view.import.current_launcher().map_or(0, |l| l.instances.len());
                step(&mut view.instance_cursor, len);
            }
            ScreenView::Settings(view) => match view.section {
                SettingsSection::General => {
                    let len = view.settings.keys().len();
                    step(&mut view.settings.cursor, len);
                }
                SettingsSection::Translations => {
                    let len = view.translations.entry_list().len();
                    step(&mut view.translations.entry_cursor, len);
                }
                SettingsSection::Appearance => {}
            },
            ScreenView::Performance(_) | ScreenView::Recipes | ScreenView::Sync(_) => {}
        }
    }

    fn list_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            _ => return false,
        }
        true
    }

    fn instances_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected_instance(),
            KeyCode::Char('r') => self.fetch_instances(),
            _ => {}
        }
    }

    fn catalog_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        match key.code {
            KeyCode::Char('/') => {
                let current = match &self.view {
                    ScreenView::Catalog(store) => store.input.value().to_string(),
                    _ => String::new(),
                };
                self.open_prompt(PromptTarget::CatalogSearch, current);
            }
            KeyCode::Right | KeyCode::Char(']') => self.catalog_page(true),
            KeyCode::Left | KeyCode::Char('[') => self.catalog_page(false),
            KeyCode::Char('s') => self.toggle_catalog_source(),
            KeyCode::Enter | KeyCode::Char('i') => self.install_selected_mod(),
            KeyCode::Char('r') => self.search_catalog(),
            _ => {}
        }
    }

    fn resources_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected_resource(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_resource(),
            KeyCode::Char('t') => self.cycle_resource_filter(true),
            KeyCode::Char('g') => self.cycle_resource_filter(false),
            KeyCode::Char('i') => self.open_prompt(PromptTarget::ResourceInstall, ""),
            KeyCode::Char('r') => self.fetch_resources(),
            _ => {}
        }
    }

    /// Flip the resource type, or move the scope to the next instance.
    fn cycle_resource_filter(&mut self, flip_type: bool) {
        let ids = self.instance_ids();
        let ScreenView::Resources(store) = &mut self.view else {
            return;
        };
        let (kind, scope) = if flip_type {
            (store.resource_type.toggle(), store.scope.clone())
        } else {
            let next = cycle_id(&ids, store.scope.instance_id(), true);
            (store.resource_type, next.map_or(ResourceScope::Global, ResourceScope::Instance))
        };
        if store.set_filter(kind, scope) {
            self.fetch_resources();
        }
    }

    fn performance_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('m') => self.toggle_monitoring(),
            KeyCode::Char('g') => self.cycle_performance_instance(),
            _ => {}
        }
    }

    fn cycle_performance_instance(&mut self) {
        let ids = self.instance_ids();
        let ScreenView::Performance(store) = &mut self.view else {
            return;
        };
        if store.monitoring || store.pending {
            self.ctx.notify(Toast::info("Stop monitoring before switching instance"));
            return;
        }
        if let Some(id) = cycle_id(&ids, store.instance_id.as_deref(), false) {
            store.bind(&id);
        }
    }

    fn downloads_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        match key.code {
            KeyCode::Char('c') | KeyCode::Delete => {
                let ScreenView::Downloads(cursor) = &self.view else {
                    return;
                };
                let id = self
                    .ctx
                    .downloads
                    .operations()
                    .get(cursor.selected)
                    .map(|op| op.id.clone());
                if let Some(id) = id {
                    self.cancel_operation(&id);
                }
            }
            KeyCode::Char('x') => {
                let removed = self.ctx.downloads.clear_finished();
                if let ScreenView::Downloads(cursor) = &mut self.view {
                    cursor.clamp(self.ctx.downloads.operations().len());
                }
                debug!(removed, "cleared finished operations");
            }
            _ => {}
        }
    }

    fn recipes_key(&mut self, key: KeyEvent) {
        let store = &mut self.recipes;
        match key.code {
            KeyCode::Up => store.move_focus(-1, 0),
            KeyCode::Down => store.move_focus(1, 0),
            KeyCode::Left => store.move_focus(0, -1),
            KeyCode::Right => store.move_focus(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.cycle_focused_slot(),
            KeyCode::Backspace | KeyCode::Delete => {
                let slot = store.focused_slot;
                store.clear_slot(slot);
            }
            KeyCode::Char('x') => store.clear_grid(),
            KeyCode::Char('k') => store.cycle_kind(),
            KeyCode::Char('f') => store.cycle_format(),
            KeyCode::Char('+') => store.adjust_count(1),
            KeyCode::Char('-') => store.adjust_count(-1),
            KeyCode::Char('t') => store.adjust_cook_time(1),
            KeyCode::Char('T') => store.adjust_cook_time(-1),
            KeyCode::Char('e') => store.adjust_experience(1),
            KeyCode::Char('E') => store.adjust_experience(-1),
            KeyCode::Char('p') => self.open_prompt(PromptTarget::RecipePaletteItem, ""),
            KeyCode::Char('o') => self.open_prompt(PromptTarget::RecipeOutput, ""),
            KeyCode::Char('n') => {
                let current = self.recipes.form.id.clone().unwrap_or_default();
                self.open_prompt(PromptTarget::RecipeId, current);
            }
            KeyCode::Char('c') => self.copy_recipe(),
            _ => {}
        }
    }

    /// Keyboard placement: step the focused slot through the palette, then
    /// back to empty.
    fn cycle_focused_slot(&mut self) {
        let store = &mut self.recipes;
        let slot = store.focused_slot;
        let current = store
            .form
            .grid
            .get(slot)
            .and_then(|item| item.as_ref())
            .and_then(|item| store.palette.iter().position(|p| p == item));
        let next = current.map_or(0, |i| i + 1);
        if next < store.palette.len() {
            store.place(slot, next);
        } else {
            store.clear_slot(slot);
        }
    }

    fn copy_recipe(&mut self) {
        let toast = if let Some(err) = self.recipes.validation() {
            Toast::error(err.to_string())
        } else {
            match self.ctx.clipboard.set_text(self.recipes.preview()) {
                Ok(()) => Toast::success("Recipe copied to clipboard"),
                Err(err) => Toast::error(err.user_message()),
            }
        };
        self.ctx.notify(toast);
    }

    fn patches_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        match key.code {
            KeyCode::Char('g') => {
                let ids = self.instance_ids();
                if let ScreenView::Patches(store) = &mut self.view {
                    let next = cycle_id(&ids, store.instance_id.as_deref(), false);
                    store.set_instance(next);
                }
            }
            KeyCode::Char('v') => self.preview_patch(),
            KeyCode::Char('a') => self.apply_patch(),
            KeyCode::Char('s') => self.create_snapshot(),
            KeyCode::Char('n') => self.open_prompt(PromptTarget::PatchName, ""),
            KeyCode::Char('r') => self.fetch_patches(),
            _ => {}
        }
    }

    fn sync_key(&mut self, key: KeyEvent) {
        let ids = self.instance_ids();
        match key.code {
            KeyCode::Char('s') => {
                if let ScreenView::Sync(store) = &mut self.view {
                    let next = cycle_id(&ids, store.source_id.as_deref(), false);
                    store.set_source(next);
                }
            }
            KeyCode::Char('t') => {
                if let ScreenView::Sync(store) = &mut self.view {
                    let next = cycle_id(&ids, store.target_id.as_deref(), false);
                    store.set_target(next);
                }
            }
            KeyCode::Char('v') => self.preview_sync(),
            KeyCode::Enter | KeyCode::Char('x') => self.execute_sync(),
            _ => {}
        }
    }

    fn transfer_key(&mut self, key: KeyEvent) {
        let ScreenView::Transfer(view) = &mut self.view else {
            return;
        };
        match (view.pane, key.code) {
            (_, KeyCode::Left) => view.pane = TransferPane::Import,
            (_, KeyCode::Right) => view.pane = TransferPane::Export,
            (TransferPane::Import, KeyCode::Char('[')) => {
                let index = view.import.cursor.selected.saturating_sub(1);
                view.import.select_launcher(index);
                view.instance_cursor = Default::default();
            }
            (TransferPane::Import, KeyCode::Char(']')) => {
                let index = view.import.cursor.selected + 1;
                view.import.select_launcher(index);
                view.instance_cursor = Default::default();
            }
            (TransferPane::Import, KeyCode::Char(' ')) => {
                let id = view
                    .import
                    .current_launcher()
                    .and_then(|l| l.instances.get(view.instance_cursor.selected))
                    .map(|i| i.id.clone());
                if let Some(id) = id {
                    view.import.toggle_instance(&id);
                }
            }
            (TransferPane::Import, KeyCode::Char('a')) => view.import.select_all(),
            (TransferPane::Import, KeyCode::Enter) => self.start_import(),
            (TransferPane::Import, KeyCode::Char('r')) => self.detect_launchers(),
            (TransferPane::Export, KeyCode::Char('p')) => {
                let current = view.export.project_id.clone();
                self.open_prompt(PromptTarget::ExportProject, current);
            }
            (TransferPane::Export, KeyCode::Char('o')) => {
                let current = view.export.path.clone();
                self.open_prompt(PromptTarget::ExportPath, current);
            }
            (TransferPane::Export, KeyCode::Enter) => self.start_export(),
            _ => {
                self.list_key(&key);
            }
        }
    }

    fn settings_key(&mut self, key: KeyEvent) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        if matches!(key.code, KeyCode::Left | KeyCode::Right) {
            view.section = if key.code == KeyCode::Right {
                view.section.next()
            } else {
                view.section.next().next()
            };
            return;
        }
        match view.section {
            SettingsSection::General => self.general_settings_key(key),
            SettingsSection::Appearance => self.appearance_key(key),
            SettingsSection::Translations => self.translations_key(key),
        }
    }

    fn general_settings_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let selected = view.settings.selected_key();
        match key.code {
            KeyCode::Char(' ') => {
                if let Some(key) = selected {
                    view.settings.toggle_bool(&key);
                }
            }
            KeyCode::Enter => {
                let Some(key) = selected else {
                    return;
                };
                let current = match view.settings.value(&key) {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(value) => value.to_string(),
                    None => String::new(),
                };
                self.open_prompt(PromptTarget::SettingValue, current);
            }
            KeyCode::Char('z') => {
                if let Some(key) = selected {
                    view.settings.revert(&key);
                }
            }
            KeyCode::Char('w') => self.save_settings(),
            KeyCode::Char('r') => self.reload_settings(),
            _ => {}
        }
    }

    fn appearance_key(&mut self, key: KeyEvent) {
        let prefs = &mut self.ctx.preferences;
        match key.code {
            KeyCode::Char('t') => prefs.toggle_theme(),
            KeyCode::Char('d') => prefs.toggle_density(),
            KeyCode::Char('a') => prefs.cycle_accent(),
            KeyCode::Char('s') => prefs.update_active(|p| p.show_status_line = !p.show_status_line),
            KeyCode::Char('i') => prefs.update_active(|p| p.show_icons = !p.show_icons),
            KeyCode::Char('b') => {
                prefs.update_active(|p| p.show_download_count = !p.show_download_count)
            }
            KeyCode::Char('p') => prefs.cycle_profile(),
            KeyCode::Char('n') => self.open_prompt(PromptTarget::ProfileName, ""),
            KeyCode::Char('x') => {
                let name = prefs.active().name.clone();
                if !prefs.remove_profile(&name) {
                    self.ctx.notify(Toast::error("The last profile cannot be removed"));
                }
            }
            KeyCode::Char('w') => self.save_preferences(),
            KeyCode::Char('c') => self.export_preferences(),
            KeyCode::Char('v') => self.import_preferences(),
            _ => {}
        }
    }

    fn translations_key(&mut self, key: KeyEvent) {
        if self.list_key(&key) {
            return;
        }
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let store = &mut view.translations;
        match key.code {
            KeyCode::Char('[') | KeyCode::Char(']') => {
                let len = store.langs().len();
                let index = if key.code == KeyCode::Char(']') {
                    store.cursor.selected + 1
                } else {
                    store.cursor.selected.saturating_sub(1)
                };
                store.cursor.select(index, len);
            }
            KeyCode::Enter => {
                if let Some(lang) = store.langs().get(store.cursor.selected).cloned() {
                    self.open_translation(&lang);
                }
            }
            KeyCode::Char('n') => self.open_prompt(PromptTarget::TranslationLang, ""),
            KeyCode::Char('e') => self.open_prompt(PromptTarget::TranslationEntry, ""),
            KeyCode::Char('x') | KeyCode::Delete => {
                let key = store
                    .entry_list()
                    .get(store.entry_cursor.selected)
                    .map(|(k, _)| k.to_string());
                if let Some(key) = key {
                    store.remove_entry(&key);
                }
            }
            KeyCode::Char('w') => self.save_translations(),
            KeyCode::Char('D') => self.delete_translations(),
            KeyCode::Char('r') => self.fetch_translation_langs(),
            _ => {}
        }
    }

    // ---- mouse ----

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let (x, y) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.hit_areas.hit_test(x, y) {
                    Some(ClickAction::PaletteItem(index)) => {
                        self.drag.capture(index, x, y);
                        self.mark_dirty();
                    }
                    Some(action) if !self.drag.suppresses_click(now) => {
                        self.handle_click(action);
                        self.mark_dirty();
                    }
                    _ => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let target = self.hit_areas.drop_target_at(x, y);
                if self.drag.move_to(x, y, target) || self.drag.is_dragging() {
                    self.mark_dirty();
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.drag.is_dragging() {
                    return;
                }
                let target = self.hit_areas.drop_target_at(x, y);
                if let Some(drop) = self.drag.release(target, now) {
                    self.handle_drop(drop);
                }
                self.mark_dirty();
            }
            MouseEventKind::ScrollDown => {
                self.move_selection(true);
                self.mark_dirty();
            }
            MouseEventKind::ScrollUp => {
                self.move_selection(false);
                self.mark_dirty();
            }
            _ => {}
        }
    }

    fn handle_drop(&mut self, drop: DropEvent) {
        debug!(item = drop.palette_index, target = ?drop.target, "drop");
        match drop.target {
            DropTarget::GridSlot(slot) => self.recipes.place(slot, drop.palette_index),
            DropTarget::Output => {
                let item = self.recipes.palette.get(drop.palette_index).cloned();
                if item.is_some() {
                    self.recipes.set_output(item);
                }
            }
        }
    }

    pub fn handle_click(&mut self, action: ClickAction) {
        match action {
            ClickAction::SwitchScreen(screen) => self.switch_screen(screen),
            ClickAction::SelectSection(section) => {
                if let ScreenView::Settings(view) = &mut self.view {
                    view.section = section;
                }
            }
            ClickAction::SelectRow(index) => self.select_row(index),
            ClickAction::SelectDetailRow(index) => self.select_detail_row(index),
            ClickAction::Press(button) => self.press(button),
            // Captured on press; a click without a drag does nothing.
            ClickAction::PaletteItem(_) => {}
            ClickAction::GridSlot(slot) => {
                if self.recipes.focused_slot == slot {
                    self.recipes.clear_slot(slot);
                } else {
                    self.recipes.focused_slot = slot;
                }
            }
            ClickAction::OutputSlot => self.recipes.set_output(None),
            ClickAction::DismissToast(id) => self.ctx.toasts.dismiss(id),
        }
    }

    fn select_row(&mut self, index: usize) {
        match &mut self.view {
            ScreenView::Instances => {
                let len = self.instances.instances().len();
                self.instances.cursor.select(index, len);
            }
            ScreenView::Catalog(store) => {
                let len = store.entries().len();
                store.cursor.select(index, len);
            }
            ScreenView::Resources(store) => {
                let len = store.resources().len();
                store.cursor.select(index, len);
            }
            ScreenView::Downloads(cursor) => {
                cursor.select(index, self.ctx.downloads.operations().len());
            }
            ScreenView::Patches(store) => store.select(index),
            ScreenView::Transfer(view) => {
                view.pane = TransferPane::Import;
                view.import.select_launcher(index);
                view.instance_cursor = Default::default();
            }
            ScreenView::Settings(view) => match view.section {
                SettingsSection::General => {
                    let len = view.settings.keys().len();
                    view.settings.cursor.select(index, len);
                }
                SettingsSection::Translations => {
                    let lang = view.translations.langs().get(index).cloned();
                    if let Some(lang) = lang {
                        let len = view.translations.langs().len();
                        view.translations.cursor.select(index, len);
                        self.open_translation(&lang);
                    }
                }
                SettingsSection::Appearance => {
                    let name = self
                        .ctx
                        .preferences
                        .preferences()
                        .profiles
                        .get(index)
                        .map(|p| p.name.clone());
                    if let Some(name) = name {
                        self.ctx.preferences.set_active(&name);
                    }
                }
            },
            ScreenView::Performance(_) | ScreenView::Recipes | ScreenView::Sync(_) => {}
        }
    }

    fn select_detail_row(&mut self, index: usize) {
        match &mut self.view {
            ScreenView::Transfer(view) => {
                let id = view
                    .import
                    .current_launcher()
                    .and_then(|l| l.instances.get(index))
                    .map(|i| i.id.clone());
                if let Some(id) = id {
                    let len = view.import.current_launcher().map_or(0, |l| l.instances.len());
                    view.instance_cursor.select(index, len);
                    view.import.toggle_instance(&id);
                }
            }
            ScreenView::Settings(view) => {
                let len = view.translations.entry_list().len();
                view.translations.entry_cursor.select(index, len);
            }
            _ => {}
        }
    }

    fn press(&mut self, button: Button) {
        match button {
            Button::Refresh => match self.screen {
                Screen::Instances => self.fetch_instances(),
                Screen::Catalog => self.search_catalog(),
                Screen::Resources => self.fetch_resources(),
                Screen::Patches => self.fetch_patches(),
                Screen::Transfer => self.detect_launchers(),
                Screen::Settings => {
                    self.reload_settings();
                    self.fetch_translation_langs();
                }
                Screen::Performance | Screen::Downloads | Screen::Recipes | Screen::Sync => {}
            },
            Button::ToggleInstance => self.toggle_selected_instance(),
            Button::PreviousPage => self.catalog_page(false),
            Button::NextPage => self.catalog_page(true),
            Button::ToggleSource => self.toggle_catalog_source(),
            Button::InstallMod => self.install_selected_mod(),
            Button::ToggleResourceType => self.cycle_resource_filter(true),
            Button::ToggleMonitoring => self.toggle_monitoring(),
            Button::CancelOperation(id) => self.cancel_operation(&id),
            Button::ClearFinished => {
                self.ctx.downloads.clear_finished();
            }
            Button::CycleRecipeKind => self.recipes.cycle_kind(),
            Button::CycleFormat => self.recipes.cycle_format(),
            Button::ClearGrid => self.recipes.clear_grid(),
            Button::PreviewPatch => self.preview_patch(),
            Button::ApplyPatch => self.apply_patch(),
            Button::PreviewSync => self.preview_sync(),
            Button::ExecuteSync => self.execute_sync(),
            Button::StartImport => self.start_import(),
            Button::StartExport => self.start_export(),
            Button::Save => match &self.view {
                ScreenView::Settings(view) => match view.section {
                    SettingsSection::General => self.save_settings(),
                    SettingsSection::Appearance => self.save_preferences(),
                    SettingsSection::Translations => self.save_translations(),
                },
                _ => {}
            },
        }
    }
}
