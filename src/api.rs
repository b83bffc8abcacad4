//! Typed facade over the launcher backend's command surface.
//!
//! Each method is one gateway call: command name, camelCase argument bag,
//! decoded result. Nothing is cached and nothing is retried.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::CommandError;
use crate::models::{
    decode_search_response, CatalogSource, DetectedLauncher, Instance, PatchApplyResult,
    PatchCompatibility, PatchSummary, Resource, ResourceScope, ResourceType, SearchPage,
    SettingsMap, SnapshotInfo, SyncPreview, SyncResult, TranslationEntries,
};
use crate::traits::{CommandGateway, CommandGatewayExt};

/// Parameters of one catalog search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub source: CatalogSource,
    pub minecraft_version: Option<String>,
    pub loader: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl SearchQuery {
    fn to_args(&self) -> Value {
        json!({
            "query": self.query,
            "minecraftVersion": self.minecraft_version,
            "loader": self.loader,
            "source": self.source.as_str(),
            "limit": self.limit,
            "offset": self.offset,
        })
    }
}

/// Target of a mod install.
#[derive(Debug, Clone, PartialEq)]
pub struct ModInstall {
    pub instance_id: String,
    pub slug: String,
    pub source: CatalogSource,
    pub minecraft_version: String,
    pub loader: String,
}

/// Typed backend client. Cheap to clone.
#[derive(Clone)]
pub struct BackendApi {
    gateway: Arc<dyn CommandGateway>,
}

impl BackendApi {
    pub fn new(gateway: Arc<dyn CommandGateway>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &Arc<dyn CommandGateway> {
        &self.gateway
    }

    // ---- instances ----

    pub async fn list_instances(&self) -> Result<Vec<Instance>, CommandError> {
        self.gateway.invoke_typed("list_instances", json!({})).await
    }

    pub async fn start_instance(&self, id: &str) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("start_instance", json!({ "id": id }))
            .await
    }

    pub async fn stop_instance(&self, id: &str) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("stop_instance", json!({ "id": id }))
            .await
    }

    // ---- resources ----

    pub async fn list_resources(
        &self,
        resource_type: ResourceType,
        scope: &ResourceScope,
    ) -> Result<Vec<Resource>, CommandError> {
        self.gateway
            .invoke_typed(
                "list_resources",
                json!({
                    "resourceType": resource_type.as_str(),
                    "instanceId": scope.instance_id(),
                }),
            )
            .await
    }

    pub async fn toggle_resource(&self, id: i64, enabled: bool) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("toggle_resource", json!({ "id": id, "enabled": enabled }))
            .await
    }

    pub async fn remove_resource(&self, id: i64) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("remove_resource", json!({ "id": id }))
            .await
    }

    pub async fn install_resource_from_modrinth(
        &self,
        slug: &str,
        resource_type: ResourceType,
        scope: &ResourceScope,
    ) -> Result<Resource, CommandError> {
        self.gateway
            .invoke_typed(
                "install_resource_from_modrinth",
                json!({
                    "slug": slug,
                    "resourceType": resource_type.as_str(),
                    "instanceId": scope.instance_id(),
                }),
            )
            .await
    }

    pub async fn install_resource_local(
        &self,
        path: &str,
        resource_type: ResourceType,
        scope: &ResourceScope,
    ) -> Result<Resource, CommandError> {
        self.gateway
            .invoke_typed(
                "install_resource_local",
                json!({
                    "path": path,
                    "resourceType": resource_type.as_str(),
                    "instanceId": scope.instance_id(),
                }),
            )
            .await
    }

    // ---- catalog ----

    pub async fn search_mods(&self, query: &SearchQuery) -> Result<SearchPage, CommandError> {
        let value = self.gateway.invoke("search_mods", query.to_args()).await?;
        decode_search_response(query.source, value).map_err(|e| CommandError::Decode {
            command: "search_mods".to_string(),
            message: e.to_string(),
        })
    }

    /// Start a mod install. Returns the operation id the backend reports
    /// progress under.
    pub async fn install_mod(&self, install: &ModInstall) -> Result<Option<String>, CommandError> {
        let value = self
            .gateway
            .invoke(
                "install_mod",
                json!({
                    "instanceId": install.instance_id,
                    "slug": install.slug,
                    "source": install.source.as_str(),
                    "minecraftVersion": install.minecraft_version,
                    "loader": install.loader,
                }),
            )
            .await?;
        Ok(operation_id_of(&value))
    }

    pub async fn cancel_operation(&self, operation_id: &str) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("cancel_operation", json!({ "operationId": operation_id }))
            .await
    }

    // ---- performance ----

    pub async fn start_performance_monitoring(&self, instance_id: &str) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit(
                "start_performance_monitoring",
                json!({ "instanceId": instance_id }),
            )
            .await
    }

    pub async fn stop_performance_monitoring(&self, instance_id: &str) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit(
                "stop_performance_monitoring",
                json!({ "instanceId": instance_id }),
            )
            .await
    }

    // ---- launcher import ----

    pub async fn detect_launchers(&self) -> Result<Vec<DetectedLauncher>, CommandError> {
        self.gateway.invoke_typed("detect_launchers", json!({})).await
    }

    /// Start an import. Returns the operation id its `import-progress`
    /// events carry, when the backend reports one.
    pub async fn import_launcher_instances(
        &self,
        launcher_id: &str,
        instance_ids: &[String],
    ) -> Result<Option<String>, CommandError> {
        let value = self
            .gateway
            .invoke(
                "import_launcher_instances",
                json!({ "launcherId": launcher_id, "instanceIds": instance_ids }),
            )
            .await?;
        Ok(operation_id_of(&value))
    }

    // ---- export ----

    /// Export a modpack project. Returns the written file path when the
    /// backend reports one.
    pub async fn export_project(
        &self,
        project_id: &str,
        path: &str,
    ) -> Result<Option<String>, CommandError> {
        let value = self
            .gateway
            .invoke(
                "export_project_to_stzhk",
                json!({ "projectId": project_id, "path": path }),
            )
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    // ---- sync ----

    pub async fn preview_sync(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<SyncPreview, CommandError> {
        self.gateway
            .invoke_typed(
                "preview_sync",
                json!({ "sourceId": source_id, "targetId": target_id }),
            )
            .await
    }

    pub async fn execute_sync(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<SyncResult, CommandError> {
        self.gateway
            .invoke_typed(
                "execute_sync",
                json!({ "sourceId": source_id, "targetId": target_id }),
            )
            .await
    }

    // ---- patches ----

    pub async fn list_patches(&self) -> Result<Vec<PatchSummary>, CommandError> {
        self.gateway.invoke_typed("list_patches", json!({})).await
    }

    pub async fn preview_patch(
        &self,
        patch_id: &str,
        instance_id: &str,
    ) -> Result<PatchCompatibility, CommandError> {
        self.gateway
            .invoke_typed(
                "preview_patch",
                json!({ "patchId": patch_id, "instanceId": instance_id }),
            )
            .await
    }

    pub async fn apply_patch(
        &self,
        patch_id: &str,
        instance_id: &str,
    ) -> Result<PatchApplyResult, CommandError> {
        self.gateway
            .invoke_typed(
                "apply_patch",
                json!({ "patchId": patch_id, "instanceId": instance_id }),
            )
            .await
    }

    pub async fn create_patch(
        &self,
        instance_id: &str,
        snapshot_id: &str,
        name: &str,
    ) -> Result<PatchSummary, CommandError> {
        self.gateway
            .invoke_typed(
                "create_patch",
                json!({ "instanceId": instance_id, "snapshotId": snapshot_id, "name": name }),
            )
            .await
    }

    pub async fn create_snapshot(&self, instance_id: &str) -> Result<SnapshotInfo, CommandError> {
        self.gateway
            .invoke_typed("create_snapshot", json!({ "instanceId": instance_id }))
            .await
    }

    // ---- settings ----

    pub async fn get_settings(&self) -> Result<SettingsMap, CommandError> {
        let value = self.gateway.invoke("get_settings", json!({})).await?;
        if value.is_null() {
            return Ok(SettingsMap::new());
        }
        serde_json::from_value(value).map_err(|e| CommandError::Decode {
            command: "get_settings".to_string(),
            message: e.to_string(),
        })
    }

    pub async fn save_settings(&self, settings: &SettingsMap) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("save_settings", json!({ "settings": settings }))
            .await
    }

    /// Read-modify-write of one key; the rest of the map is left as the
    /// backend has it.
    pub async fn update_setting(&self, key: &str, value: Value) -> Result<(), CommandError> {
        let mut settings = self.get_settings().await?;
        settings.insert(key.to_string(), value);
        self.save_settings(&settings).await
    }

    // ---- translations ----

    pub async fn list_custom_translation_langs(&self) -> Result<Vec<String>, CommandError> {
        self.gateway
            .invoke_typed("list_custom_translation_langs", json!({}))
            .await
    }

    pub async fn get_custom_translations(
        &self,
        lang: &str,
    ) -> Result<TranslationEntries, CommandError> {
        let value = self
            .gateway
            .invoke("get_custom_translations", json!({ "lang": lang }))
            .await?;
        if value.is_null() {
            return Ok(TranslationEntries::new());
        }
        serde_json::from_value(value).map_err(|e| CommandError::Decode {
            command: "get_custom_translations".to_string(),
            message: e.to_string(),
        })
    }

    pub async fn save_custom_translations(
        &self,
        lang: &str,
        entries: &TranslationEntries,
    ) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit(
                "save_custom_translations",
                json!({ "lang": lang, "entries": entries }),
            )
            .await
    }

    pub async fn delete_custom_translations(&self, lang: &str) -> Result<(), CommandError> {
        self.gateway
            .invoke_unit("delete_custom_translations", json!({ "lang": lang }))
            .await
    }
}

/// Pull an operation id out of a command result: either the bare string or
/// an object's `operation_id` / `operationId` field.
fn operation_id_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("operation_id")
            .or_else(|| map.get("operationId"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockGateway;

    fn api(gw: &MockGateway) -> BackendApi {
        BackendApi::new(Arc::new(gw.clone()))
    }

    #[tokio::test]
    async fn test_list_resources_sends_camel_case_args() {
        let gw = MockGateway::new();
        gw.respond("list_resources", json!([]));
        api(&gw)
            .list_resources(
                ResourceType::Shaderpack,
                &ResourceScope::Instance("inst-1".into()),
            )
            .await
            .unwrap();

        assert_eq!(
            gw.calls_to("list_resources")[0],
            json!({"resourceType": "shaderpack", "instanceId": "inst-1"})
        );
    }

    #[tokio::test]
    async fn test_update_setting_keeps_other_keys() {
        let gw = MockGateway::new();
        gw.respond("get_settings", json!({"javaPath": "/usr/bin/java"}));
        gw.respond("save_settings", Value::Null);
        api(&gw)
            .update_setting("ui_preferences", json!({"activeProfile": "Default"}))
            .await
            .unwrap();

        let saved = &gw.calls_to("save_settings")[0]["settings"];
        assert_eq!(saved["javaPath"], "/usr/bin/java");
        assert_eq!(saved["ui_preferences"]["activeProfile"], "Default");
    }

    #[tokio::test]
    async fn test_global_scope_sends_null_instance() {
        let gw = MockGateway::new();
        gw.respond("list_resources", json!([]));
        api(&gw)
            .list_resources(ResourceType::Resourcepack, &ResourceScope::Global)
            .await
            .unwrap();
        assert_eq!(gw.calls_to("list_resources")[0]["instanceId"], Value::Null);
    }

    #[tokio::test]
    async fn test_search_mods_decodes_source_shape() {
        let gw = MockGateway::new();
        gw.respond(
            "search_mods",
            json!({"data": [{"id": 1, "name": "JEI", "summary": "", "downloadCount": 5}]}),
        );
        let query = SearchQuery {
            query: "jei".into(),
            source: CatalogSource::CurseForge,
            minecraft_version: Some("1.20.1".into()),
            loader: None,
            limit: 20,
            offset: 40,
        };
        let page = api(&gw).search_mods(&query).await.unwrap();
        assert_eq!(page.entries[0].title, "JEI");

        let args = &gw.calls_to("search_mods")[0];
        assert_eq!(args["source"], "curseforge");
        assert_eq!(args["minecraftVersion"], "1.20.1");
        assert_eq!(args["offset"], 40);
    }

    #[tokio::test]
    async fn test_search_mods_bad_shape_is_decode_error() {
        let gw = MockGateway::new();
        gw.respond("search_mods", json!(42));
        let query = SearchQuery {
            query: "x".into(),
            source: CatalogSource::Modrinth,
            minecraft_version: None,
            loader: None,
            limit: 20,
            offset: 0,
        };
        let err = api(&gw).search_mods(&query).await.unwrap_err();
        assert!(matches!(err, CommandError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_install_mod_returns_operation_id() {
        let gw = MockGateway::new();
        gw.respond("install_mod", json!({"operation_id": "op-9"}));
        let install = ModInstall {
            instance_id: "i".into(),
            slug: "sodium".into(),
            source: CatalogSource::Modrinth,
            minecraft_version: "1.20.1".into(),
            loader: "fabric".into(),
        };
        assert_eq!(
            api(&gw).install_mod(&install).await.unwrap().as_deref(),
            Some("op-9")
        );
    }

    #[tokio::test]
    async fn test_get_settings_null_is_empty() {
        let gw = MockGateway::new();
        gw.respond("get_settings", Value::Null);
        assert!(api(&gw).get_settings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_passes_through() {
        let gw = MockGateway::new();
        gw.fail("list_patches", "patch dir missing");
        let err = api(&gw).list_patches().await.unwrap_err();
        assert_eq!(err.user_message(), "patch dir missing");
    }

    #[test]
    fn test_operation_id_of() {
        assert_eq!(operation_id_of(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(operation_id_of(&json!({"operationId": "x"})).as_deref(), Some("x"));
        assert_eq!(operation_id_of(&json!(null)), None);
        assert_eq!(operation_id_of(&json!("")), None);
    }
}
