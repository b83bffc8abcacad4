//! Transient view copies of backend-owned entities.
//!
//! Nothing here is a source of truth. Field names follow the backend's
//! snake_case output with camelCase aliases where the backend is known to
//! emit both.

mod catalog;
mod instance;
mod launcher;
mod patch;
mod resource;
mod sync;

pub use catalog::{
    decode_search_response, format_downloads, CatalogEntry, CatalogHit, CatalogSource,
    CurseForgeHit, CurseForgeLogo, ModrinthHit, SearchPage,
};
pub use instance::{Instance, InstanceStatus};
pub use launcher::{DetectedLauncher, LauncherInstance};
pub use patch::{
    CompatibilityStatus, PatchApplyResult, PatchCompatibility, PatchSummary, SnapshotInfo,
};
pub use resource::{is_resource_file_path, Resource, ResourceScope, ResourceType};
pub use sync::{SyncFile, SyncFileKind, SyncPreview, SyncResult};

use serde::Deserializer;

/// Flat key/value settings bag mirrored from the backend.
pub type SettingsMap = std::collections::BTreeMap<String, serde_json::Value>;

/// Custom translation overrides for one language: key to text.
pub type TranslationEntries = std::collections::BTreeMap<String, String>;

/// Deserialize an id given as either a string or an integer.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    }

    #[test]
    fn test_deserialize_id_string_and_number() {
        let a: WithId = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        let b: WithId = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(a.id, "abc");
        assert_eq!(b.id, "42");
    }

    #[test]
    fn test_deserialize_id_rejects_bool() {
        assert!(serde_json::from_str::<WithId>(r#"{"id": true}"#).is_err());
    }
}
