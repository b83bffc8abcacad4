//! Recipe builder form.
//!
//! Purely local: every edit regenerates the preview text.

use crate::recipe::{self, ItemId, OutputFormat, RecipeError, RecipeForm, RecipeKind, GRID_SIZE};

const STARTER_PALETTE: [&str; 8] = [
    "oak_planks",
    "stick",
    "cobblestone",
    "iron_ingot",
    "gold_ingot",
    "diamond",
    "redstone",
    "string",
];

#[derive(Debug)]
pub struct RecipesStore {
    pub form: RecipeForm,
    pub format: OutputFormat,
    /// Items that can be dragged onto the grid.
    pub palette: Vec<ItemId>,
    /// Item id being typed for the palette or output.
    pub item_input: String,
    pub input_error: Option<String>,
    /// Grid slot under keyboard focus.
    pub focused_slot: usize,
    preview: String,
    validation: Option<RecipeError>,
}

impl Default for RecipesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipesStore {
    pub fn new() -> Self {
        let mut store = Self {
            form: RecipeForm::default(),
            format: OutputFormat::default(),
            palette: STARTER_PALETTE
                .iter()
                .filter_map(|id| ItemId::parse(id).ok())
                .collect(),
            item_input: String::new(),
            input_error: None,
            focused_slot: GRID_SIZE + 1,
            preview: String::new(),
            validation: None,
        };
        store.regenerate();
        store
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn validation(&self) -> Option<&RecipeError> {
        self.validation.as_ref()
    }

    fn regenerate(&mut self) {
        self.validation = self.form.validate().err();
        self.preview = recipe::generate(&self.form, self.format);
    }

    fn parse_input(&mut self) -> Option<ItemId> {
        match ItemId::parse(&self.item_input) {
            Ok(id) => {
                self.input_error = None;
                self.item_input.clear();
                Some(id)
            }
            Err(err) => {
                self.input_error = Some(err.to_string());
                None
            }
        }
    }

    /// Add the typed item to the palette.
    pub fn add_palette_item(&mut self) -> bool {
        let Some(id) = self.parse_input() else {
            return false;
        };
        if !self.palette.contains(&id) {
            self.palette.push(id);
        }
        true
    }

    /// Use the typed item as the recipe output.
    pub fn set_output_from_input(&mut self) -> bool {
        let Some(id) = self.parse_input() else {
            return false;
        };
        self.form.output = Some(id);
        self.regenerate();
        true
    }

    pub fn set_output(&mut self, item: Option<ItemId>) {
        self.form.output = item;
        self.regenerate();
    }

    /// Drop a palette item onto a grid slot.
    pub fn place(&mut self, slot: usize, palette_index: usize) {
        let Some(item) = self.palette.get(palette_index).cloned() else {
            return;
        };
        self.form.set_slot(slot, Some(item));
        self.focused_slot = slot.min(GRID_SIZE * GRID_SIZE - 1);
        self.regenerate();
    }

    pub fn clear_slot(&mut self, slot: usize) {
        self.form.set_slot(slot, None);
        self.regenerate();
    }

    pub fn clear_grid(&mut self) {
        self.form.clear_grid();
        self.regenerate();
    }

    pub fn set_kind(&mut self, kind: RecipeKind) {
        self.form.set_kind(kind);
        self.regenerate();
    }

    pub fn cycle_kind(&mut self) {
        self.set_kind(self.form.kind.next());
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
        self.regenerate();
    }

    pub fn cycle_format(&mut self) {
        self.set_format(self.format.next());
    }

    pub fn adjust_count(&mut self, delta: i32) {
        self.form.count = (self.form.count as i64 + delta as i64).clamp(1, 64) as u32;
        self.regenerate();
    }

    /// Cook time moves in steps of 20 ticks (one second).
    pub fn adjust_cook_time(&mut self, steps: i32) {
        if !self.form.kind.is_cooking() {
            return;
        }
        let ticks = self.form.cook_time as i64 + steps as i64 * 20;
        self.form.cook_time = ticks.clamp(20, 72_000) as u32;
        self.regenerate();
    }

    /// Experience moves in steps of 0.05.
    pub fn adjust_experience(&mut self, steps: i32) {
        if !self.form.kind.is_cooking() {
            return;
        }
        let hundredths = (self.form.experience * 100.0).round() as i64 + steps as i64 * 5;
        self.form.experience = hundredths.clamp(0, 10_000) as f64 / 100.0;
        self.regenerate();
    }

    pub fn set_recipe_id(&mut self, id: Option<String>) {
        self.form.id = id;
        self.regenerate();
    }

    pub fn move_focus(&mut self, d_row: isize, d_col: isize) {
        let size = GRID_SIZE as isize;
        let row = (self.focused_slot as isize / size + d_row).clamp(0, size - 1);
        let col = (self.focused_slot as isize % size + d_col).clamp(0, size - 1);
        self.focused_slot = (row * size + col) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette_index(store: &RecipesStore, id: &str) -> usize {
        let id = ItemId::parse(id).unwrap();
        store.palette.iter().position(|p| *p == id).unwrap()
    }

    #[test]
    fn test_preview_follows_every_edit() {
        let mut store = RecipesStore::new();
        assert!(store.preview().is_empty());
        assert_eq!(store.validation(), Some(&RecipeError::MissingOutput));

        let diamond = palette_index(&store, "diamond");
        store.place(4, diamond);
        store.item_input = "diamond_block".into();
        assert!(store.set_output_from_input());
        let json = store.preview().to_string();
        assert!(json.contains("minecraft:diamond_block"));
        assert!(store.validation().is_none());

        store.cycle_format();
        assert_ne!(store.preview(), json);
        assert!(store.preview().contains("ServerEvents.recipes"));
    }

    #[test]
    fn test_invalid_item_input() {
        let mut store = RecipesStore::new();
        store.item_input = "Not An Item".into();
        assert!(!store.add_palette_item());
        assert!(store.input_error.is_some());
        assert_eq!(store.item_input, "Not An Item");

        store.item_input = "create:andesite_alloy".into();
        let before = store.palette.len();
        assert!(store.add_palette_item());
        assert_eq!(store.palette.len(), before + 1);
        assert!(store.input_error.is_none());
    }

    #[test]
    fn test_count_and_cook_time_bounds() {
        let mut store = RecipesStore::new();
        store.adjust_count(-5);
        assert_eq!(store.form.count, 1);
        store.adjust_count(100);
        assert_eq!(store.form.count, 64);

        store.adjust_cook_time(1);
        assert_eq!(store.form.cook_time, 0, "shaped recipes have no cook time");
        store.set_kind(RecipeKind::Smoking);
        store.adjust_cook_time(-10);
        assert_eq!(store.form.cook_time, 20);
        store.adjust_experience(3);
        assert!((store.form.experience - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_focus_stays_in_grid() {
        let mut store = RecipesStore::new();
        store.move_focus(-5, -5);
        assert_eq!(store.focused_slot, 0);
        store.move_focus(1, 2);
        assert_eq!(store.focused_slot, 5);
    }
}
