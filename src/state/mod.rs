//! Feature view-state stores.
//!
//! Each store is plain data with `begin_*` methods that prepare a backend
//! request and an `apply` reducer for command results and event payloads.
//! Async work lives in [`crate::app::actions`]; the stores never await.

pub mod catalog;
pub mod downloads;
pub mod export;
pub mod import;
pub mod instances;
pub mod patches;
pub mod performance;
pub mod preferences;
pub mod recipes;
pub mod resources;
pub mod settings;
pub mod sync;
pub mod toasts;
pub mod translations;

pub use catalog::{CatalogMsg, CatalogStore, InstallState};
pub use downloads::{DownloadsMsg, DownloadsStore, Operation, OperationPhase};
pub use export::{ExportMsg, ExportStore};
pub use import::{ImportMsg, ImportRequest, ImportStore};
pub use instances::{InstancesMsg, InstancesStore, ToggleRequest};
pub use patches::{PatchTarget, PatchesMsg, PatchesStore};
pub use performance::{PerformanceMsg, PerformanceStore};
pub use preferences::{
    Density, PreferenceProfile, PreferencesMsg, PreferencesStore, ThemeMode, UiPreferences,
};
pub use recipes::RecipesStore;
pub use resources::{InstallSource, ResourcesMsg, ResourcesStore};
pub use settings::{SettingsMsg, SettingsStore};
pub use sync::{SyncMsg, SyncPair, SyncStore};
pub use toasts::{ActiveToast, Toast, ToastLevel, ToastStore};
pub use translations::{TranslationsMsg, TranslationsStore};

/// What the shell should do after a reducer ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Followup {
    #[default]
    Nothing,
    /// The view copy may be out of date; fetch it again.
    Refetch,
    RefetchWith(Toast),
    Notify(Toast),
}

impl Followup {
    pub fn toast(&self) -> Option<&Toast> {
        match self {
            Followup::RefetchWith(toast) | Followup::Notify(toast) => Some(toast),
            Followup::Nothing | Followup::Refetch => None,
        }
    }

    pub fn needs_refetch(&self) -> bool {
        matches!(self, Followup::Refetch | Followup::RefetchWith(_))
    }
}
