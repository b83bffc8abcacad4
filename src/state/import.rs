//! Importing instances from other launchers.

use std::collections::BTreeSet;

use tracing::debug;

use super::{Followup, Toast};
use crate::events::ImportProgress;
use crate::models::DetectedLauncher;
use crate::store::{Loadable, RequestToken};
use crate::view_state::ListCursor;

#[derive(Debug, Clone, PartialEq)]
pub enum ImportMsg {
    Detected(RequestToken, Result<Vec<DetectedLauncher>, String>),
    /// The import command returned, with the operation id its progress
    /// events carry; progress keeps arriving as events.
    Started(Result<Option<String>, String>),
    Progress(ImportProgress),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRequest {
    pub launcher_id: String,
    pub instance_ids: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ImportStore {
    pub launchers: Loadable<Vec<DetectedLauncher>>,
    /// Selected launcher index.
    pub cursor: ListCursor,
    /// Instance ids of the selected launcher marked for import.
    pub selected: BTreeSet<String>,
    pub running: bool,
    /// Operation of the running import, once the backend reported it.
    pub operation_id: Option<String>,
    pub progress: Option<ImportProgress>,
    pub error: Option<String>,
}

impl ImportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launchers(&self) -> &[DetectedLauncher] {
        self.launchers.data.as_deref().unwrap_or(&[])
    }

    pub fn current_launcher(&self) -> Option<&DetectedLauncher> {
        self.launchers().get(self.cursor.selected)
    }

    pub fn begin_detect(&mut self) -> RequestToken {
        self.launchers.begin()
    }

    /// Move to another launcher; the instance selection belongs to one
    /// launcher only.
    pub fn select_launcher(&mut self, index: usize) {
        let len = self.launchers().len();
        if index != self.cursor.selected {
            self.selected.clear();
        }
        self.cursor.select(index, len);
    }

    pub fn toggle_instance(&mut self, instance_id: &str) {
        let known = self
            .current_launcher()
            .is_some_and(|l| l.instances.iter().any(|i| i.id == instance_id));
        if !known {
            return;
        }
        if !self.selected.remove(instance_id) {
            self.selected.insert(instance_id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        if let Some(launcher) = self.current_launcher() {
            let ids: Vec<String> = launcher.instances.iter().map(|i| i.id.clone()).collect();
            self.selected.extend(ids);
        }
    }

    pub fn begin_import(&mut self) -> Option<ImportRequest> {
        if self.running || self.selected.is_empty() {
            return None;
        }
        let launcher_id = self.current_launcher()?.id.clone();
        self.running = true;
        self.operation_id = None;
        self.progress = None;
        self.error = None;
        Some(ImportRequest {
            launcher_id,
            instance_ids: self.selected.iter().cloned().collect(),
        })
    }

    /// Whether `progress` belongs to the running import. Payloads without
    /// an id, or arriving before the start command returned, are accepted
    /// while an import runs.
    fn owns(&self, progress: &ImportProgress) -> bool {
        if !self.running {
            return false;
        }
        match (&self.operation_id, &progress.operation_id) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => true,
        }
    }

    /// Completion ratio of the current import by bytes, falling back to
    /// file count.
    pub fn ratio(&self) -> f64 {
        let Some(p) = &self.progress else {
            return 0.0;
        };
        let (done, total) = if p.total_bytes > 0 {
            (p.bytes_copied, p.total_bytes)
        } else {
            (p.current, p.total)
        };
        if total == 0 {
            0.0
        } else {
            (done as f64 / total as f64).clamp(0.0, 1.0)
        }
    }

    pub fn apply(&mut self, msg: ImportMsg) -> Followup {
        match msg {
            ImportMsg::Detected(token, result) => {
                if self.launchers.resolve(token, result).is_applied() {
                    let len = self.launchers().len();
                    self.cursor.clamp(len);
                    self.selected.clear();
                }
                Followup::Nothing
            }
            ImportMsg::Started(Ok(operation_id)) => {
                if self.running {
                    self.operation_id = operation_id;
                }
                Followup::Nothing
            }
            ImportMsg::Started(Err(message)) => {
                self.running = false;
                self.error = Some(message.clone());
                Followup::Notify(Toast::error(message))
            }
            ImportMsg::Progress(progress) => {
                if !self.owns(&progress) {
                    debug!(
                        phase = %progress.phase,
                        operation = ?progress.operation_id,
                        running = self.running,
                        "dropping import progress of another operation"
                    );
                    return Followup::Nothing;
                }
                let finished = progress.is_finished();
                let failed = progress.phase == "failed";
                self.progress = Some(progress);
                if !finished {
                    return Followup::Nothing;
                }
                self.running = false;
                self.operation_id = None;
                self.selected.clear();
                if failed {
                    self.error = Some("Import failed".to_string());
                    Followup::Notify(Toast::error("Import failed"))
                } else {
                    // New instances exist now.
                    Followup::RefetchWith(Toast::success("Import finished"))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LauncherInstance;

    fn launcher(id: &str, instances: &[&str]) -> DetectedLauncher {
        DetectedLauncher {
            id: id.to_string(),
            name: id.to_uppercase(),
            path: format!("/opt/{}", id),
            instances: instances
                .iter()
                .map(|i| LauncherInstance {
                    id: i.to_string(),
                    name: i.to_string(),
                    minecraft_version: None,
                    loader: None,
                })
                .collect(),
        }
    }

    fn detected() -> ImportStore {
        let mut store = ImportStore::new();
        let token = store.begin_detect();
        store.apply(ImportMsg::Detected(
            token,
            Ok(vec![launcher("prism", &["a", "b"]), launcher("multimc", &["c"])]),
        ));
        store
    }

    #[test]
    fn test_selection_is_per_launcher() {
        let mut store = detected();
        store.toggle_instance("a");
        store.toggle_instance("c");
        assert_eq!(store.selected.len(), 1, "c belongs to another launcher");

        store.select_launcher(1);
        assert!(store.selected.is_empty());
        store.select_all();
        assert_eq!(store.selected.iter().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn test_import_request_and_progress() {
        let mut store = detected();
        assert!(store.begin_import().is_none(), "nothing selected");
        store.select_all();
        let request = store.begin_import().unwrap();
        assert_eq!(request.launcher_id, "prism");
        assert_eq!(request.instance_ids, vec!["a".to_string(), "b".to_string()]);
        assert!(store.begin_import().is_none(), "already running");

        store.apply(ImportMsg::Progress(ImportProgress {
            phase: "copying".into(),
            bytes_copied: 25,
            total_bytes: 100,
            current_file: Some("mods/sodium.jar".into()),
            ..Default::default()
        }));
        assert_eq!(store.ratio(), 0.25);

        let followup = store.apply(ImportMsg::Progress(ImportProgress {
            phase: "completed".into(),
            ..Default::default()
        }));
        assert!(!store.running);
        assert_eq!(followup, Followup::RefetchWith(Toast::success("Import finished")));
    }

    #[test]
    fn test_progress_while_idle_is_dropped() {
        let mut store = detected();
        let followup = store.apply(ImportMsg::Progress(ImportProgress {
            operation_id: Some("someone-elses-op".into()),
            phase: "completed".into(),
            ..Default::default()
        }));
        assert_eq!(followup, Followup::Nothing);
        assert!(store.progress.is_none());
        assert!(store.error.is_none());
    }

    #[test]
    fn test_progress_of_other_operation_is_dropped() {
        let mut store = detected();
        store.select_all();
        store.begin_import().unwrap();
        store.apply(ImportMsg::Started(Ok(Some("import-1".into()))));
        assert_eq!(store.operation_id.as_deref(), Some("import-1"));

        let followup = store.apply(ImportMsg::Progress(ImportProgress {
            operation_id: Some("import-0".into()),
            phase: "completed".into(),
            ..Default::default()
        }));
        assert_eq!(followup, Followup::Nothing);
        assert!(store.running, "a leftover completion must not end this import");

        store.apply(ImportMsg::Progress(ImportProgress {
            operation_id: Some("import-1".into()),
            phase: "copying".into(),
            current: 1,
            total: 2,
            ..Default::default()
        }));
        assert_eq!(store.ratio(), 0.5);
        let followup = store.apply(ImportMsg::Progress(ImportProgress {
            operation_id: Some("import-1".into()),
            phase: "completed".into(),
            ..Default::default()
        }));
        assert!(followup.needs_refetch());
        assert!(!store.running);
        assert!(store.operation_id.is_none());
    }

    #[test]
    fn test_start_failure() {
        let mut store = detected();
        store.toggle_instance("a");
        store.begin_import();
        store.apply(ImportMsg::Started(Err("launcher locked".into())));
        assert!(!store.running);
        assert_eq!(store.error.as_deref(), Some("launcher locked"));
    }
}
