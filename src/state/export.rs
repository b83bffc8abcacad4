//! Modpack export.

use super::{Followup, Toast};
use crate::events::ExportProgress;

#[derive(Debug, Clone, PartialEq)]
pub enum ExportMsg {
    /// The export command returned, with the written path if known.
    Finished(Result<Option<String>, String>),
    Progress(ExportProgress),
}

impl ExportMsg {
    /// Toast for a finished export.
    pub fn completion_toast(&self) -> Option<Toast> {
        match self {
            ExportMsg::Finished(Ok(Some(path))) => Some(Toast::success(format!("Exported to {}", path))),
            ExportMsg::Finished(Ok(None)) => Some(Toast::success("Export finished")),
            ExportMsg::Finished(Err(message)) => {
                Some(Toast::error(format!("Export failed: {}", message)))
            }
            ExportMsg::Progress(_) => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ExportStore {
    pub project_id: String,
    pub path: String,
    pub running: bool,
    pub progress: Option<ExportProgress>,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ExportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(project_id, path)` to send.
    pub fn begin_export(&mut self) -> Option<(String, String)> {
        let project = self.project_id.trim();
        let path = self.path.trim();
        if self.running || project.is_empty() || path.is_empty() {
            return None;
        }
        let request = (project.to_string(), path.to_string());
        self.running = true;
        self.progress = None;
        self.output = None;
        self.error = None;
        Some(request)
    }

    pub fn ratio(&self) -> f64 {
        match &self.progress {
            Some(p) if p.total > 0 => (p.current as f64 / p.total as f64).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn apply(&mut self, msg: ExportMsg) -> Followup {
        match msg {
            ExportMsg::Progress(progress) => {
                if self.running {
                    self.progress = Some(progress);
                }
                Followup::Nothing
            }
            ExportMsg::Finished(result) => {
                self.running = false;
                match result {
                    Ok(output) => self.output = output,
                    Err(message) => self.error = Some(message),
                }
                Followup::Nothing
            }
        }
    }
}
