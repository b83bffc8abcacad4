//! Messages sent to the UI loop by spawned commands and event callbacks.

use super::types::MountId;
use crate::events::ConnectionState;
use crate::state::{
    CatalogMsg, DownloadsMsg, ExportMsg, ImportMsg, InstancesMsg, PatchesMsg, PerformanceMsg,
    PreferencesMsg, ResourcesMsg, SettingsMsg, SyncMsg, Toast, TranslationsMsg,
};

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Instances(InstancesMsg),
    Downloads(DownloadsMsg),
    Preferences(PreferencesMsg),
    /// For the store of whichever screen was mounted as `MountId`.
    Screen(MountId, ScreenMsg),
    /// Terminal result of an export, sync or mod install. Its toast is
    /// raised whatever screen is mounted; the store update follows the
    /// same mount rule as [`AppMessage::Screen`].
    Completed(MountId, ScreenMsg),
    Connection(ConnectionState),
    Notify(Toast),
}

/// Messages for per-screen stores.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenMsg {
    Catalog(CatalogMsg),
    Resources(ResourcesMsg),
    Performance(PerformanceMsg),
    Patches(PatchesMsg),
    Sync(SyncMsg),
    Import(ImportMsg),
    Export(ExportMsg),
    Settings(SettingsMsg),
    Translations(TranslationsMsg),
}

impl ScreenMsg {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ScreenMsg::Catalog(_) => "catalog",
            ScreenMsg::Resources(_) => "resources",
            ScreenMsg::Performance(_) => "performance",
            ScreenMsg::Patches(_) => "patches",
            ScreenMsg::Sync(_) => "sync",
            ScreenMsg::Import(_) => "import",
            ScreenMsg::Export(_) => "export",
            ScreenMsg::Settings(_) => "settings",
            ScreenMsg::Translations(_) => "translations",
        }
    }

    /// Toast a cross-cutting operation raises when it ends.
    pub fn completion_toast(&self) -> Option<Toast> {
        match self {
            ScreenMsg::Catalog(msg) => msg.completion_toast(),
            ScreenMsg::Sync(msg) => msg.completion_toast(),
            ScreenMsg::Export(msg) => msg.completion_toast(),
            _ => None,
        }
    }
}
