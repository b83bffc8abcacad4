//! Active downloads and long-running operations (app-wide).
//!
//! Updates for one operation are applied in arrival order; the last one
//! wins. A terminal event (completed, failed, cancelled) is final: later
//! progress for the same id is ignored.

use tracing::debug;

use super::{Followup, Toast};
use crate::events::{DownloadProgress, OperationEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum OperationPhase {
    Running,
    /// Cancel requested; waiting for the backend's terminal event.
    Cancelling,
    Completed,
    Failed(String),
    Cancelled,
}

impl OperationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationPhase::Completed | OperationPhase::Failed(_) | OperationPhase::Cancelled
        )
    }

    pub fn label(&self) -> &str {
        match self {
            OperationPhase::Running => "running",
            OperationPhase::Cancelling => "cancelling",
            OperationPhase::Completed => "done",
            OperationPhase::Failed(_) => "failed",
            OperationPhase::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub id: String,
    pub name: String,
    pub phase: OperationPhase,
    /// Backend-reported step, e.g. "downloading" or "extracting".
    pub stage: Option<String>,
    pub current: u64,
    pub total: u64,
    /// Bytes transferred so far.
    pub bytes: u64,
    /// Set for `download-progress` entries, whose counters are bytes.
    pub counts_bytes: bool,
    /// Bytes per second.
    pub speed: u64,
    /// Error from a rejected cancel request.
    pub cancel_error: Option<String>,
}

impl Operation {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: if name.is_empty() { id.to_string() } else { name.to_string() },
            phase: OperationPhase::Running,
            stage: None,
            current: 0,
            total: 0,
            bytes: 0,
            counts_bytes: false,
            speed: 0,
            cancel_error: None,
        }
    }

    /// Completion ratio in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.phase == OperationPhase::Completed {
            return 1.0;
        }
        if self.total == 0 {
            return 0.0;
        }
        (self.current as f64 / self.total as f64).clamp(0.0, 1.0)
    }

    pub fn is_active(&self) -> bool {
        !self.phase.is_terminal()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadsMsg {
    Operation(OperationEvent),
    Download(DownloadProgress),
    CancelFinished {
        operation_id: String,
        result: Result<(), String>,
    },
}

#[derive(Debug, Default)]
pub struct DownloadsStore {
    /// In creation order.
    operations: Vec<Operation>,
}

impl DownloadsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn get(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.operations.iter().filter(|o| o.is_active()).count()
    }

    /// Track an operation the shell started itself (e.g. a mod install),
    /// before its first event arrives.
    pub fn track(&mut self, id: &str, name: &str) {
        if self.get(id).is_none() {
            self.operations.push(Operation::new(id, name));
        }
    }

    /// Mark an operation as cancelling. Returns whether a cancel command
    /// should be sent.
    pub fn begin_cancel(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(op) if op.phase == OperationPhase::Running => {
                op.phase = OperationPhase::Cancelling;
                op.cancel_error = None;
                true
            }
            _ => false,
        }
    }

    /// Drop every operation that has reached a terminal phase.
    pub fn clear_finished(&mut self) -> usize {
        let before = self.operations.len();
        self.operations.retain(Operation::is_active);
        before - self.operations.len()
    }

    pub fn apply(&mut self, msg: DownloadsMsg) -> Followup {
        match msg {
            DownloadsMsg::Operation(event) => self.apply_operation(event),
            DownloadsMsg::Download(progress) => self.apply_download(progress),
            DownloadsMsg::CancelFinished { operation_id, result } => {
                if let (Err(message), Some(op)) = (result, self.get_mut(&operation_id)) {
                    if op.phase == OperationPhase::Cancelling {
                        op.phase = OperationPhase::Running;
                    }
                    op.cancel_error = Some(message);
                }
                Followup::Nothing
            }
        }
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Operation> {
        self.operations.iter_mut().find(|o| o.id == id)
    }

    /// Entry for `id`, created if unseen. `None` if it already finished.
    fn live_entry(&mut self, id: &str, name: &str) -> Option<&mut Operation> {
        let index = match self.operations.iter().position(|o| o.id == id) {
            Some(index) => index,
            None => {
                self.operations.push(Operation::new(id, name));
                self.operations.len() - 1
            }
        };
        let op = &mut self.operations[index];
        if op.phase.is_terminal() {
            debug!(operation = id, "ignoring update for finished operation");
            return None;
        }
        Some(op)
    }

    fn finish(&mut self, id: &str, phase: OperationPhase) -> Followup {
        let Some(op) = self.live_entry(id, "") else {
            return Followup::Nothing;
        };
        op.phase = phase.clone();
        let name = op.name.clone();
        match phase {
            OperationPhase::Completed => Followup::Notify(Toast::success(format!("{} finished", name))),
            OperationPhase::Failed(error) => {
                Followup::Notify(Toast::error(format!("{} failed: {}", name, error)))
            }
            OperationPhase::Cancelled => Followup::Notify(Toast::info(format!("{} cancelled", name))),
            _ => Followup::Nothing,
        }
    }

    fn apply_operation(&mut self, event: OperationEvent) -> Followup {
        match event {
            OperationEvent::Started { operation_id, name, total } => {
                if let Some(op) = self.live_entry(&operation_id, &name) {
                    if !name.is_empty() {
                        op.name = name;
                    }
                    op.total = total;
                }
                Followup::Nothing
            }
            OperationEvent::Progress {
                operation_id,
                phase,
                current,
                total,
                bytes,
                speed,
            } => {
                if let Some(op) = self.live_entry(&operation_id, "") {
                    op.current = current;
                    op.total = total;
                    op.bytes = bytes;
                    op.speed = speed;
                    if phase.is_some() {
                        op.stage = phase;
                    }
                }
                Followup::Nothing
            }
            OperationEvent::Completed { operation_id, .. } => {
                self.finish(&operation_id, OperationPhase::Completed)
            }
            OperationEvent::Failed { operation_id, error } => {
                self.finish(&operation_id, OperationPhase::Failed(error))
            }
            OperationEvent::Cancelled { operation_id } => {
                self.finish(&operation_id, OperationPhase::Cancelled)
            }
        }
    }

    fn apply_download(&mut self, progress: DownloadProgress) -> Followup {
        let key = progress.key().to_string();
        match progress.status.as_str() {
            "completed" | "done" => return self.finish(&key, OperationPhase::Completed),
            "failed" | "error" => {
                return self.finish(&key, OperationPhase::Failed("download failed".to_string()))
            }
            "cancelled" => return self.finish(&key, OperationPhase::Cancelled),
            _ => {}
        }
        if let Some(op) = self.live_entry(&key, &progress.name) {
            op.current = progress.downloaded;
            op.total = progress.total;
            op.bytes = progress.downloaded;
            op.counts_bytes = true;
            op.speed = progress.speed;
            if !progress.status.is_empty() {
                op.stage = Some(progress.status);
            }
        }
        Followup::Nothing
    }
}
