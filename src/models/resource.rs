//! Shader pack and resource pack models.

use serde::{Deserialize, Serialize};

/// Kind of installable resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    #[default]
    #[serde(alias = "shader")]
    Shaderpack,
    #[serde(alias = "resource")]
    Resourcepack,
}

impl ResourceType {
    pub const ALL: [ResourceType; 2] = [ResourceType::Shaderpack, ResourceType::Resourcepack];

    /// Value sent as `resourceType`.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Shaderpack => "shaderpack",
            ResourceType::Resourcepack => "resourcepack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Shaderpack => "Shader packs",
            ResourceType::Resourcepack => "Resource packs",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ResourceType::Shaderpack => ResourceType::Resourcepack,
            ResourceType::Resourcepack => ResourceType::Shaderpack,
        }
    }
}

/// Where a resource is installed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ResourceScope {
    #[default]
    Global,
    Instance(String),
}

impl ResourceScope {
    /// Value sent as `instanceId` (absent for global scope).
    pub fn instance_id(&self) -> Option<&str> {
        match self {
            ResourceScope::Global => None,
            ResourceScope::Instance(id) => Some(id),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ResourceScope::Global => "global".to_string(),
            ResourceScope::Instance(id) => format!("instance {}", id),
        }
    }
}

/// An installed resource, addressed by its numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    #[serde(alias = "resourceType")]
    pub resource_type: ResourceType,
    pub name: String,
    #[serde(default, alias = "fileName")]
    pub file_name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, alias = "instanceId")]
    pub instance_id: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// File extensions accepted for a local install.
const RESOURCE_EXTENSIONS: &[&str] = &[".zip", ".jar"];

/// Check if pasted text looks like a single resource archive path.
///
/// Terminals paste file paths as text when files are dropped onto them.
pub fn is_resource_file_path(text: &str) -> bool {
    let trimmed = text.trim().trim_matches(|c| c == '\'' || c == '"');
    if trimmed.is_empty() || trimmed.contains('\n') {
        return false;
    }
    let lower = trimmed.to_lowercase();
    RESOURCE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_deserialization() {
        let json = r#"{
            "id": 12,
            "resource_type": "shaderpack",
            "name": "Complementary",
            "file_name": "complementary.zip",
            "enabled": false
        }"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.id, 12);
        assert_eq!(resource.resource_type, ResourceType::Shaderpack);
        assert!(!resource.enabled);
        assert!(resource.instance_id.is_none());
    }

    #[test]
    fn test_enabled_defaults_to_true() {
        let json = r#"{"id": 1, "resourceType": "resourcepack", "name": "Faithful"}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert!(resource.enabled);
    }

    #[test]
    fn test_scope_instance_id() {
        assert_eq!(ResourceScope::Global.instance_id(), None);
        assert_eq!(
            ResourceScope::Instance("abc".into()).instance_id(),
            Some("abc")
        );
    }

    #[test]
    fn test_is_resource_file_path() {
        assert!(is_resource_file_path("/home/sam/Downloads/BSL_v8.2.zip"));
        assert!(is_resource_file_path("  '/path/with spaces/pack.ZIP'  "));
        assert!(!is_resource_file_path(""));
        assert!(!is_resource_file_path("/tmp/readme.txt"));
        assert!(!is_resource_file_path("a.zip\nb.zip"));
    }
}
