//! Screen and input-mode types.

use std::fmt;

/// Top-level screens, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Instances,
    Catalog,
    Resources,
    Performance,
    Downloads,
    Recipes,
    Patches,
    Sync,
    Transfer,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 10] = [
        Screen::Instances,
        Screen::Catalog,
        Screen::Resources,
        Screen::Performance,
        Screen::Downloads,
        Screen::Recipes,
        Screen::Patches,
        Screen::Sync,
        Screen::Transfer,
        Screen::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Instances => "Instances",
            Screen::Catalog => "Mods",
            Screen::Resources => "Packs",
            Screen::Performance => "Performance",
            Screen::Downloads => "Downloads",
            Screen::Recipes => "Recipes",
            Screen::Patches => "Patches",
            Screen::Sync => "Sync",
            Screen::Transfer => "Import/Export",
            Screen::Settings => "Settings",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Digit shortcut: `1`..`9`, then `0` for the tenth tab.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        let index = if n == 0 { 9 } else { n - 1 };
        Self::ALL.get(index).copied()
    }
}

/// Identifies one mount of a screen. Results of requests started under an
/// older mount are dropped on arrival, since the stores they targeted are
/// gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MountId(u64);

impl MountId {
    pub fn next(self) -> Self {
        MountId(self.0 + 1)
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

/// Sections of the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsSection {
    #[default]
    General,
    Appearance,
    Translations,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 3] = [
        SettingsSection::General,
        SettingsSection::Appearance,
        SettingsSection::Translations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsSection::General => "General",
            SettingsSection::Appearance => "Appearance",
            SettingsSection::Translations => "Translations",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Which half of the import/export screen has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferPane {
    #[default]
    Import,
    Export,
}

/// What a text prompt feeds on Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTarget {
    /// Typed straight into the catalog's debouncer.
    CatalogSearch,
    ResourceInstall,
    RecipePaletteItem,
    RecipeOutput,
    RecipeId,
    SettingValue,
    PatchName,
    ExportProject,
    ExportPath,
    TranslationLang,
    /// `key=value`.
    TranslationEntry,
    ProfileName,
}

impl PromptTarget {
    pub fn label(self) -> &'static str {
        match self {
            PromptTarget::CatalogSearch => "Search mods",
            PromptTarget::ResourceInstall => "Modrinth slug or .zip path",
            PromptTarget::RecipePaletteItem => "Add item to palette",
            PromptTarget::RecipeOutput => "Output item",
            PromptTarget::RecipeId => "Recipe id (empty for none)",
            PromptTarget::SettingValue => "Value",
            PromptTarget::PatchName => "Patch name",
            PromptTarget::ExportProject => "Project id",
            PromptTarget::ExportPath => "Export to path",
            PromptTarget::TranslationLang => "New language code",
            PromptTarget::TranslationEntry => "key=value",
            PromptTarget::ProfileName => "New profile name",
        }
    }
}

/// A one-line text input in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub target: PromptTarget,
    pub buffer: String,
}

impl Prompt {
    pub fn new(target: PromptTarget, initial: impl Into<String>) -> Self {
        Self {
            target,
            buffer: initial.into(),
        }
    }
}
