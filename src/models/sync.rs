//! Settings sync preview and result models.

use serde::{Deserialize, Serialize};

/// How the backend classified one file of a sync preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFileKind {
    /// Present in source only; will be copied.
    New,
    /// Differs between source and target; will be overwritten.
    Changed,
    /// Identical on both sides.
    Unchanged,
    /// Excluded from sync (per-instance or machine-specific).
    Skipped,
    #[serde(other)]
    Other,
}

impl SyncFileKind {
    pub fn label(self) -> &'static str {
        match self {
            SyncFileKind::New => "new",
            SyncFileKind::Changed => "changed",
            SyncFileKind::Unchanged => "unchanged",
            SyncFileKind::Skipped => "skipped",
            SyncFileKind::Other => "other",
        }
    }

    /// Whether executing the sync writes this file.
    pub fn is_write(self) -> bool {
        matches!(self, SyncFileKind::New | SyncFileKind::Changed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncFile {
    pub path: String,
    #[serde(alias = "classification", alias = "category")]
    pub kind: SyncFileKind,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncPreview {
    #[serde(default)]
    pub files: Vec<SyncFile>,
}

impl SyncPreview {
    pub fn count(&self, kind: SyncFileKind) -> usize {
        self.files.iter().filter(|f| f.kind == kind).count()
    }

    /// Number of files the sync would write.
    pub fn write_count(&self) -> usize {
        self.files.iter().filter(|f| f.kind.is_write()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    #[serde(default)]
    pub copied: usize,
    #[serde(default)]
    pub skipped: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl SyncResult {
    pub fn summary(&self) -> String {
        if self.errors.is_empty() {
            format!("Synced {} files ({} skipped)", self.copied, self.skipped)
        } else {
            format!(
                "Synced {} files ({} skipped, {} errors)",
                self.copied,
                self.skipped,
                self.errors.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_counts() {
        let preview: SyncPreview = serde_json::from_value(json!({
            "files": [
                {"path": "options.txt", "kind": "changed"},
                {"path": "config/sodium.json", "classification": "new", "size": 120},
                {"path": "servers.dat", "kind": "skipped"},
                {"path": "config/x.toml", "kind": "unchanged"},
                {"path": "mystery", "kind": "quarantined"}
            ]
        }))
        .unwrap();
        assert_eq!(preview.write_count(), 2);
        assert_eq!(preview.count(SyncFileKind::Skipped), 1);
        assert_eq!(preview.count(SyncFileKind::Other), 1);
    }

    #[test]
    fn test_result_summary() {
        let ok = SyncResult { copied: 3, skipped: 1, errors: vec![] };
        assert_eq!(ok.summary(), "Synced 3 files (1 skipped)");
        let partial = SyncResult { copied: 2, skipped: 0, errors: vec!["locked".into()] };
        assert_eq!(partial.summary(), "Synced 2 files (0 skipped, 1 errors)");
    }
}
