//! Modpack patch and snapshot models.

use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// A stored patch artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "baseInstance")]
    pub base_instance: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "modsAdded")]
    pub mods_added: usize,
    #[serde(default, alias = "modsRemoved")]
    pub mods_removed: usize,
    #[serde(default, alias = "configsChanged")]
    pub configs_changed: usize,
}

impl PatchSummary {
    /// `+3 -1 ~2` style change counts.
    pub fn change_label(&self) -> String {
        format!(
            "+{} -{} ~{}",
            self.mods_added, self.mods_removed, self.configs_changed
        )
    }
}

/// Result status of a compatibility preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityStatus {
    Compatible,
    CompatibleWithWarnings,
    Incompatible,
    AlreadyApplied,
}

impl CompatibilityStatus {
    pub fn label(self) -> &'static str {
        match self {
            CompatibilityStatus::Compatible => "compatible",
            CompatibilityStatus::CompatibleWithWarnings => "compatible with warnings",
            CompatibilityStatus::Incompatible => "incompatible",
            CompatibilityStatus::AlreadyApplied => "already applied",
        }
    }
}

/// Preview of a patch against one instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchCompatibility {
    pub status: CompatibilityStatus,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl PatchCompatibility {
    /// Errors always block; warnings never do.
    pub fn has_blocking_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether this preview allows the apply step.
    pub fn allows_apply(&self) -> bool {
        !self.has_blocking_errors()
            && matches!(
                self.status,
                CompatibilityStatus::Compatible | CompatibilityStatus::CompatibleWithWarnings
            )
    }
}

/// Outcome of `apply_patch`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchApplyResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "modsAdded")]
    pub mods_added: usize,
    #[serde(default, alias = "modsRemoved")]
    pub mods_removed: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// A captured baseline of an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, alias = "instanceId")]
    pub instance_id: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, alias = "modCount")]
    pub mod_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compat(status: CompatibilityStatus, errors: &[&str], warnings: &[&str]) -> PatchCompatibility {
        PatchCompatibility {
            status,
            errors: errors.iter().map(|s| s.to_string()).collect(),
            warnings: warnings.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_status_deserialization() {
        let value = json!({"status": "compatible_with_warnings", "warnings": ["old config"]});
        let c: PatchCompatibility = serde_json::from_value(value).unwrap();
        assert_eq!(c.status, CompatibilityStatus::CompatibleWithWarnings);
        assert!(c.errors.is_empty());
        assert_eq!(c.warnings.len(), 1);
    }

    #[test]
    fn test_warnings_alone_do_not_block() {
        assert!(compat(CompatibilityStatus::CompatibleWithWarnings, &[], &["w"]).allows_apply());
        assert!(compat(CompatibilityStatus::Compatible, &[], &[]).allows_apply());
    }

    #[test]
    fn test_errors_block_even_when_compatible() {
        assert!(!compat(CompatibilityStatus::Compatible, &["missing mod"], &[]).allows_apply());
    }

    #[test]
    fn test_incompatible_and_applied_block() {
        assert!(!compat(CompatibilityStatus::Incompatible, &[], &[]).allows_apply());
        assert!(!compat(CompatibilityStatus::AlreadyApplied, &[], &[]).allows_apply());
    }

    #[test]
    fn test_patch_summary_numeric_id() {
        let p: PatchSummary =
            serde_json::from_value(json!({"id": 4, "name": "Perf pack", "modsAdded": 3})).unwrap();
        assert_eq!(p.id, "4");
        assert_eq!(p.change_label(), "+3 -0 ~0");
    }
}
