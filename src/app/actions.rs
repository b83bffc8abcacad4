//! Backend actions.
//!
//! Each action asks a store to prepare the request, then spawns the gateway
//! call. The result comes back as an [`AppMessage`] carrying the request
//! token (and the mount id for screen stores), so the reducer can drop it if
//! it is stale by the time it arrives.

use std::future::Future;

use tracing::{debug, error, info};

use super::{App, AppMessage, ScreenMsg, ScreenView};
use crate::api::SearchQuery;
use crate::error::CommandError;
use crate::state::preferences::SETTINGS_KEY;
use crate::state::{
    CatalogMsg, DownloadsMsg, ExportMsg, ImportMsg, InstallSource, InstancesMsg, PatchesMsg,
    PerformanceMsg, PreferencesMsg, ResourcesMsg, SettingsMsg, SyncMsg, Toast, TranslationsMsg,
};
use crate::store::RequestToken;

/// Log a failed command and turn it into the string stores keep.
fn failure(err: CommandError) -> String {
    error!(command = err.command(), code = err.error_code(), error = %err, "command failed");
    err.user_message()
}

fn outcome<T>(result: Result<T, CommandError>) -> Result<T, String> {
    result.map_err(failure)
}

impl App {
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppMessage> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(task.await);
        });
    }

    /// Spawn a call whose result belongs to the mounted screen's store.
    fn spawn_screen<F>(&self, task: F)
    where
        F: Future<Output = ScreenMsg> + Send + 'static,
    {
        let mount = self.mount;
        self.spawn(async move { AppMessage::Screen(mount, task.await) });
    }

    /// Spawn a cross-cutting operation whose outcome must reach the user
    /// even after its screen was left.
    fn spawn_completion<F>(&self, task: F)
    where
        F: Future<Output = ScreenMsg> + Send + 'static,
    {
        let mount = self.mount;
        self.spawn(async move { AppMessage::Completed(mount, task.await) });
    }

    // ---- instances ----

    pub fn fetch_instances(&mut self) {
        let token = self.instances.begin_fetch();
        let api = self.ctx.api.clone();
        self.spawn(async move {
            AppMessage::Instances(InstancesMsg::Loaded(token, outcome(api.list_instances().await)))
        });
    }

    pub fn toggle_selected_instance(&mut self) {
        let Some(id) = self.instances.selected().map(|i| i.id.clone()) else {
            return;
        };
        let Some(request) = self.instances.begin_toggle(&id) else {
            return;
        };
        info!(instance = %request.id, start = request.start, "toggling instance");
        let api = self.ctx.api.clone();
        self.spawn(async move {
            let result = if request.start {
                api.start_instance(&request.id).await
            } else {
                api.stop_instance(&request.id).await
            };
            AppMessage::Instances(InstancesMsg::ToggleFinished {
                id: request.id,
                result: outcome(result),
            })
        });
    }

    // ---- preferences ----

    pub fn load_preferences(&mut self) {
        let token = self.ctx.preferences.begin_load();
        let api = self.ctx.api.clone();
        self.spawn(async move {
            AppMessage::Preferences(PreferencesMsg::Loaded(token, outcome(api.get_settings().await)))
        });
    }

    pub fn save_preferences(&mut self) {
        let Some((token, value)) = self.ctx.preferences.begin_save() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn(async move {
            let result = api.update_setting(SETTINGS_KEY, value).await;
            AppMessage::Preferences(PreferencesMsg::Saved(token, outcome(result)))
        });
    }

    pub fn export_preferences(&mut self) {
        let toast = match self.ctx.preferences.export_json() {
            Ok(json) => match self.ctx.clipboard.set_text(&json) {
                Ok(()) => Toast::success("Preferences copied to clipboard"),
                Err(err) => Toast::error(err.user_message()),
            },
            Err(err) => Toast::error(format!("Could not serialize preferences: {}", err)),
        };
        self.ctx.notify(toast);
    }

    /// Replace the profiles with clipboard JSON and persist them.
    pub fn import_preferences(&mut self) {
        let text = match self.ctx.clipboard.get_text() {
            Ok(text) => text,
            Err(err) => {
                self.ctx.notify(Toast::error(err.user_message()));
                return;
            }
        };
        match self.ctx.preferences.import_json(&text) {
            Ok(()) => {
                self.ctx.notify(Toast::info("Preferences imported"));
                self.save_preferences();
            }
            Err(message) => self.ctx.notify(Toast::error(message)),
        }
    }

    // ---- downloads ----

    pub fn cancel_operation(&mut self, operation_id: &str) {
        if !self.ctx.downloads.begin_cancel(operation_id) {
            return;
        }
        let api = self.ctx.api.clone();
        let operation_id = operation_id.to_string();
        self.spawn(async move {
            let result = outcome(api.cancel_operation(&operation_id).await);
            AppMessage::Downloads(DownloadsMsg::CancelFinished { operation_id, result })
        });
    }

    // ---- catalog ----

    pub fn search_catalog(&mut self) {
        if let ScreenView::Catalog(store) = &mut self.view {
            let (token, query) = store.begin_search();
            self.spawn_search(token, query);
        }
    }

    pub(super) fn spawn_search(&self, token: RequestToken, query: SearchQuery) {
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            ScreenMsg::Catalog(CatalogMsg::SearchFinished(token, outcome(api.search_mods(&query).await)))
        });
    }

    pub fn catalog_page(&mut self, forward: bool) {
        if let ScreenView::Catalog(store) = &mut self.view {
            let request = if forward { store.next_page() } else { store.previous_page() };
            if let Some((token, query)) = request {
                self.spawn_search(token, query);
            }
        }
    }

    pub fn toggle_catalog_source(&mut self) {
        if let ScreenView::Catalog(store) = &mut self.view {
            let (token, query) = store.toggle_source();
            self.spawn_search(token, query);
        }
    }

    /// Install the highlighted mod into the selected instance.
    pub fn install_selected_mod(&mut self) {
        let Some(instance) = self.instances.selected().cloned() else {
            self.ctx.notify(Toast::error("Select an instance first"));
            return;
        };
        let ScreenView::Catalog(store) = &mut self.view else {
            return;
        };
        let Some(install) = store.begin_install(&instance) else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_completion(async move {
            let result = outcome(api.install_mod(&install).await);
            ScreenMsg::Catalog(CatalogMsg::InstallFinished { slug: install.slug, result })
        });
    }

    // ---- resources ----

    pub fn fetch_resources(&mut self) {
        let ScreenView::Resources(store) = &mut self.view else {
            return;
        };
        let token = store.begin_fetch();
        let (kind, scope) = (store.resource_type, store.scope.clone());
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            ScreenMsg::Resources(ResourcesMsg::Loaded(token, outcome(api.list_resources(kind, &scope).await)))
        });
    }

    pub fn toggle_selected_resource(&mut self) {
        let ScreenView::Resources(store) = &mut self.view else {
            return;
        };
        let Some(id) = store.selected().map(|r| r.id) else {
            return;
        };
        let Some(enabled) = store.begin_toggle(id) else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = outcome(api.toggle_resource(id, enabled).await);
            ScreenMsg::Resources(ResourcesMsg::ToggleFinished { id, enabled, result })
        });
    }

    pub fn remove_selected_resource(&mut self) {
        let ScreenView::Resources(store) = &mut self.view else {
            return;
        };
        let Some(id) = store.selected().map(|r| r.id) else {
            return;
        };
        if !store.begin_remove(id) {
            return;
        }
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = outcome(api.remove_resource(id).await);
            ScreenMsg::Resources(ResourcesMsg::RemoveFinished { id, result })
        });
    }

    pub fn install_resource(&mut self) {
        let ScreenView::Resources(store) = &mut self.view else {
            return;
        };
        let Some((token, source)) = store.begin_install() else {
            return;
        };
        let (kind, scope) = (store.resource_type, store.scope.clone());
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = match &source {
                InstallSource::Modrinth(slug) => {
                    api.install_resource_from_modrinth(slug, kind, &scope).await
                }
                InstallSource::LocalPath(path) => api.install_resource_local(path, kind, &scope).await,
            };
            ScreenMsg::Resources(ResourcesMsg::InstallFinished(token, outcome(result)))
        });
    }

    // ---- performance ----

    pub fn toggle_monitoring(&mut self) {
        let ScreenView::Performance(store) = &mut self.view else {
            return;
        };
        let api = self.ctx.api.clone();
        if let Some(instance_id) = store.begin_start() {
            self.spawn_screen(async move {
                let result = outcome(api.start_performance_monitoring(&instance_id).await);
                ScreenMsg::Performance(PerformanceMsg::StartFinished { instance_id, result })
            });
        } else if let Some(instance_id) = store.begin_stop() {
            self.spawn_screen(async move {
                let result = outcome(api.stop_performance_monitoring(&instance_id).await);
                ScreenMsg::Performance(PerformanceMsg::StopFinished { instance_id, result })
            });
        }
    }

    /// Stop monitoring for a screen that is going away. The result is only
    /// logged: its store no longer exists.
    pub(super) fn release_monitoring(&self, instance_id: String) {
        let api = self.ctx.api.clone();
        tokio::spawn(async move {
            if let Err(err) = api.stop_performance_monitoring(&instance_id).await {
                failure(err);
            } else {
                debug!(instance = %instance_id, "monitoring released");
            }
        });
    }

    // ---- patches ----

    pub fn fetch_patches(&mut self) {
        let ScreenView::Patches(store) = &mut self.view else {
            return;
        };
        let token = store.begin_fetch();
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            ScreenMsg::Patches(PatchesMsg::Loaded(token, outcome(api.list_patches().await)))
        });
    }

    pub fn preview_patch(&mut self) {
        let ScreenView::Patches(store) = &mut self.view else {
            return;
        };
        let Some((token, target)) = store.begin_preview() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api.preview_patch(&target.patch_id, &target.instance_id).await;
            ScreenMsg::Patches(PatchesMsg::Previewed(token, outcome(result)))
        });
    }

    pub fn apply_patch(&mut self) {
        let ScreenView::Patches(store) = &mut self.view else {
            return;
        };
        let Some((token, target)) = store.begin_apply() else {
            return;
        };
        info!(patch = %target.patch_id, instance = %target.instance_id, "applying patch");
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api.apply_patch(&target.patch_id, &target.instance_id).await;
            ScreenMsg::Patches(PatchesMsg::Applied(token, outcome(result)))
        });
    }

    pub fn create_snapshot(&mut self) {
        let ScreenView::Patches(store) = &mut self.view else {
            return;
        };
        let Some((token, instance_id)) = store.begin_snapshot() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api.create_snapshot(&instance_id).await;
            ScreenMsg::Patches(PatchesMsg::SnapshotCreated(token, outcome(result)))
        });
    }

    pub fn create_patch(&mut self) {
        let ScreenView::Patches(store) = &mut self.view else {
            return;
        };
        let Some((token, instance_id, snapshot_id, name)) = store.begin_create() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api.create_patch(&instance_id, &snapshot_id, &name).await;
            ScreenMsg::Patches(PatchesMsg::PatchCreated(token, outcome(result)))
        });
    }

    // ---- sync ----

    pub fn preview_sync(&mut self) {
        let ScreenView::Sync(store) = &mut self.view else {
            return;
        };
        let Some((token, pair)) = store.begin_preview() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api.preview_sync(&pair.source_id, &pair.target_id).await;
            ScreenMsg::Sync(SyncMsg::Previewed(token, outcome(result)))
        });
    }

    pub fn execute_sync(&mut self) {
        let ScreenView::Sync(store) = &mut self.view else {
            return;
        };
        let Some((token, pair)) = store.begin_execute() else {
            return;
        };
        info!(source = %pair.source_id, target = %pair.target_id, "executing sync");
        let api = self.ctx.api.clone();
        self.spawn_completion(async move {
            let result = api.execute_sync(&pair.source_id, &pair.target_id).await;
            ScreenMsg::Sync(SyncMsg::Executed(token, outcome(result)))
        });
    }

    // ---- import / export ----

    pub fn detect_launchers(&mut self) {
        let ScreenView::Transfer(view) = &mut self.view else {
            return;
        };
        let token = view.import.begin_detect();
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            ScreenMsg::Import(ImportMsg::Detected(token, outcome(api.detect_launchers().await)))
        });
    }

    pub fn start_import(&mut self) {
        let ScreenView::Transfer(view) = &mut self.view else {
            return;
        };
        let Some(request) = view.import.begin_import() else {
            return;
        };
        info!(launcher = %request.launcher_id, count = request.instance_ids.len(), "importing");
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api
                .import_launcher_instances(&request.launcher_id, &request.instance_ids)
                .await;
            ScreenMsg::Import(ImportMsg::Started(outcome(result)))
        });
    }

    pub fn start_export(&mut self) {
        let ScreenView::Transfer(view) = &mut self.view else {
            return;
        };
        let Some((project_id, path)) = view.export.begin_export() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_completion(async move {
            let result = api.export_project(&project_id, &path).await;
            ScreenMsg::Export(ExportMsg::Finished(outcome(result)))
        });
    }

    // ---- settings ----

    pub fn reload_settings(&mut self) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let token = view.settings.begin_reload();
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            ScreenMsg::Settings(SettingsMsg::Loaded(token, outcome(api.get_settings().await)))
        });
    }

    pub fn save_settings(&mut self) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let Some((token, mut settings)) = view.settings.begin_save() else {
            return;
        };
        // The preferences key is owned by the preferences store; the copy
        // in the settings map may predate a later preferences save.
        let prefs = &self.ctx.preferences;
        if prefs.load.data.is_some() || prefs.save.data.is_some() {
            if let Ok(value) = serde_json::to_value(prefs.preferences()) {
                settings.insert(SETTINGS_KEY.to_string(), value);
            }
        }
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            ScreenMsg::Settings(SettingsMsg::Saved(token, outcome(api.save_settings(&settings).await)))
        });
    }

    // ---- translations ----

    pub fn fetch_translation_langs(&mut self) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let token = view.translations.begin_fetch_langs();
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = api.list_custom_translation_langs().await;
            ScreenMsg::Translations(TranslationsMsg::LangsLoaded(token, outcome(result)))
        });
    }

    pub fn open_translation(&mut self, lang: &str) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let token = view.translations.open(lang);
        let api = self.ctx.api.clone();
        let lang = lang.to_string();
        self.spawn_screen(async move {
            let result = api.get_custom_translations(&lang).await;
            ScreenMsg::Translations(TranslationsMsg::EntriesLoaded(token, outcome(result)))
        });
    }

    pub fn save_translations(&mut self) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let Some((lang, entries)) = view.translations.begin_save() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = outcome(api.save_custom_translations(&lang, &entries).await);
            ScreenMsg::Translations(TranslationsMsg::Saved { lang, result })
        });
    }

    pub fn delete_translations(&mut self) {
        let ScreenView::Settings(view) = &mut self.view else {
            return;
        };
        let Some(lang) = view.translations.begin_delete() else {
            return;
        };
        let api = self.ctx.api.clone();
        self.spawn_screen(async move {
            let result = outcome(api.delete_custom_translations(&lang).await);
            ScreenMsg::Translations(TranslationsMsg::Deleted { lang, result })
        });
    }
}
