//! Recipe code generation.
//!
//! A [`RecipeForm`] is turned into source text for one of three mod-loader
//! dialects. Generation is a pure function of the form and the format.

mod crafttweaker;
mod datapack;
mod item;
mod kubejs;
pub mod shaped;

pub use item::{ItemId, RecipeError, DEFAULT_NAMESPACE};
pub use shaped::ShapedLayout;

/// Width and height of the crafting grid.
pub const GRID_SIZE: usize = 3;

/// Row-major crafting grid.
pub type Grid = [Option<ItemId>; GRID_SIZE * GRID_SIZE];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecipeKind {
    #[default]
    Shaped,
    Shapeless,
    Smelting,
    Blasting,
    Smoking,
    CampfireCooking,
    Stonecutting,
}

impl RecipeKind {
    pub const ALL: [RecipeKind; 7] = [
        RecipeKind::Shaped,
        RecipeKind::Shapeless,
        RecipeKind::Smelting,
        RecipeKind::Blasting,
        RecipeKind::Smoking,
        RecipeKind::CampfireCooking,
        RecipeKind::Stonecutting,
    ];

    /// Vanilla recipe type id without namespace.
    pub fn as_str(self) -> &'static str {
        match self {
            RecipeKind::Shaped => "crafting_shaped",
            RecipeKind::Shapeless => "crafting_shapeless",
            RecipeKind::Smelting => "smelting",
            RecipeKind::Blasting => "blasting",
            RecipeKind::Smoking => "smoking",
            RecipeKind::CampfireCooking => "campfire_cooking",
            RecipeKind::Stonecutting => "stonecutting",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecipeKind::Shaped => "Shaped",
            RecipeKind::Shapeless => "Shapeless",
            RecipeKind::Smelting => "Smelting",
            RecipeKind::Blasting => "Blasting",
            RecipeKind::Smoking => "Smoking",
            RecipeKind::CampfireCooking => "Campfire",
            RecipeKind::Stonecutting => "Stonecutting",
        }
    }

    /// Kinds with a cook time and experience.
    pub fn is_cooking(self) -> bool {
        matches!(
            self,
            RecipeKind::Smelting
                | RecipeKind::Blasting
                | RecipeKind::Smoking
                | RecipeKind::CampfireCooking
        )
    }

    /// Kinds that read the whole grid. The rest take one input item.
    pub fn uses_grid(self) -> bool {
        matches!(self, RecipeKind::Shaped | RecipeKind::Shapeless)
    }

    /// Vanilla default cook time in ticks.
    pub fn default_cook_time(self) -> u32 {
        match self {
            RecipeKind::Smelting => 200,
            RecipeKind::Blasting | RecipeKind::Smoking => 100,
            RecipeKind::CampfireCooking => 600,
            _ => 0,
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Vanilla JSON datapack recipe.
    #[default]
    Datapack,
    /// KubeJS server script.
    KubeJs,
    /// CraftTweaker ZenScript.
    CraftTweaker,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Datapack,
        OutputFormat::KubeJs,
        OutputFormat::CraftTweaker,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Datapack => "Datapack JSON",
            OutputFormat::KubeJs => "KubeJS",
            OutputFormat::CraftTweaker => "CraftTweaker",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            OutputFormat::Datapack => "json",
            OutputFormat::KubeJs => "js",
            OutputFormat::CraftTweaker => "zs",
        }
    }

    pub fn next(self) -> Self {
        match self {
            OutputFormat::Datapack => OutputFormat::KubeJs,
            OutputFormat::KubeJs => OutputFormat::CraftTweaker,
            OutputFormat::CraftTweaker => OutputFormat::Datapack,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeForm {
    pub kind: RecipeKind,
    pub grid: Grid,
    pub output: Option<ItemId>,
    pub count: u32,
    /// Ticks; cooking kinds only.
    pub cook_time: u32,
    /// Cooking kinds only.
    pub experience: f64,
    /// Recipe name, e.g. `packdeck:compressed_cobble`.
    pub id: Option<String>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            kind: RecipeKind::Shaped,
            grid: Grid::default(),
            output: None,
            count: 1,
            cook_time: 0,
            experience: 0.0,
            id: None,
        }
    }
}

impl RecipeForm {
    pub fn new(kind: RecipeKind) -> Self {
        Self {
            kind,
            cook_time: kind.default_cook_time(),
            ..Self::default()
        }
    }

    /// Change kind, resetting the cook time to the new kind's default.
    pub fn set_kind(&mut self, kind: RecipeKind) {
        if self.kind != kind {
            self.kind = kind;
            self.cook_time = kind.default_cook_time();
        }
    }

    pub fn set_slot(&mut self, index: usize, item: Option<ItemId>) {
        if let Some(slot) = self.grid.get_mut(index) {
            *slot = item;
        }
    }

    pub fn clear_grid(&mut self) {
        self.grid = Grid::default();
    }

    /// Filled cells in grid order.
    pub fn ingredients(&self) -> impl Iterator<Item = &ItemId> {
        self.grid.iter().flatten()
    }

    /// The single input of cooking and stonecutting recipes: the first
    /// filled cell.
    pub fn primary_input(&self) -> Option<&ItemId> {
        self.ingredients().next()
    }

    /// Name used by dialects that require one.
    pub fn recipe_name(&self) -> String {
        if let Some(id) = self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return id.to_string();
        }
        match &self.output {
            Some(output) => format!("{}_{}", output.path().replace('/', "_"), self.kind.as_str()),
            None => self.kind.as_str().to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.output.is_none() {
            return Err(RecipeError::MissingOutput);
        }
        if self.primary_input().is_none() {
            return Err(RecipeError::MissingIngredients);
        }
        if !(1..=64).contains(&self.count) {
            return Err(RecipeError::InvalidCount);
        }
        Ok(())
    }
}

/// Render `form` in `format`. An incomplete form renders as an empty
/// string; [`RecipeForm::validate`] says what is missing.
pub fn generate(form: &RecipeForm, format: OutputFormat) -> String {
    if form.validate().is_err() {
        return String::new();
    }
    match format {
        OutputFormat::Datapack => datapack::generate(form),
        OutputFormat::KubeJs => kubejs::generate(form),
        OutputFormat::CraftTweaker => crafttweaker::generate(form),
    }
}
