//! Typed payloads carried on the backend's event channels.

use serde::{Deserialize, Serialize};

use crate::models::InstanceStatus;

pub const PERFORMANCE_EVENT: &str = "performance-event";
pub const IMPORT_PROGRESS: &str = "import-progress";
pub const EXPORT_PROGRESS: &str = "export-progress";
pub const DOWNLOAD_PROGRESS: &str = "download-progress";
pub const OPERATION_EVENT: &str = "operation-event";
pub const INSTANCE_STATUS: &str = "instance-status";

/// Every channel name the crate subscribes to.
pub const ALL_CHANNELS: [&str; 6] = [
    PERFORMANCE_EVENT,
    IMPORT_PROGRESS,
    EXPORT_PROGRESS,
    DOWNLOAD_PROGRESS,
    OPERATION_EVENT,
    INSTANCE_STATUS,
];

/// One sample of a running instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    /// Unix time in milliseconds.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub tps: Option<f64>,
    #[serde(default)]
    pub mspt: Option<f64>,
    #[serde(default)]
    pub memory_used_mb: f64,
    #[serde(default)]
    pub memory_max_mb: f64,
    #[serde(default)]
    pub cpu_percent: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

/// A performance problem the backend's analyzer flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub category: String,
    #[serde(default)]
    pub severity: Severity,
    pub description: String,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// `performance-event` payload.
///
/// The `error` variant signals that monitoring itself failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PerformanceEvent {
    Started {
        instance_id: String,
    },
    Stopped {
        instance_id: String,
    },
    Snapshot {
        instance_id: String,
        snapshot: PerformanceSnapshot,
    },
    BottleneckDetected {
        instance_id: String,
        bottleneck: Bottleneck,
    },
    Error {
        instance_id: String,
        message: String,
    },
}

impl PerformanceEvent {
    pub fn instance_id(&self) -> &str {
        match self {
            PerformanceEvent::Started { instance_id }
            | PerformanceEvent::Stopped { instance_id }
            | PerformanceEvent::Snapshot { instance_id, .. }
            | PerformanceEvent::BottleneckDetected { instance_id, .. }
            | PerformanceEvent::Error { instance_id, .. } => instance_id,
        }
    }
}

/// `import-progress` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportProgress {
    #[serde(default)]
    pub operation_id: Option<String>,
    pub phase: String,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub bytes_copied: u64,
    #[serde(default)]
    pub total_bytes: u64,
    #[serde(default)]
    pub current_file: Option<String>,
}

impl ImportProgress {
    pub fn is_finished(&self) -> bool {
        matches!(self.phase.as_str(), "completed" | "done" | "failed" | "cancelled")
    }
}

/// `export-progress` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportProgress {
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    pub stage: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl ExportProgress {
    pub fn is_finished(&self) -> bool {
        matches!(self.stage.as_str(), "completed" | "done" | "finished")
    }
}

/// `download-progress` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadProgress {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub downloaded: u64,
    #[serde(default)]
    pub total: u64,
    /// Bytes per second.
    #[serde(default)]
    pub speed: u64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl DownloadProgress {
    /// Key the downloads store tracks this transfer under.
    pub fn key(&self) -> &str {
        self.operation_id.as_deref().unwrap_or(&self.id)
    }
}

/// `operation-event` payload: lifecycle of a long-running backend task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationEvent {
    Started {
        operation_id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        total: u64,
    },
    Progress {
        operation_id: String,
        #[serde(default)]
        phase: Option<String>,
        #[serde(default)]
        current: u64,
        #[serde(default)]
        total: u64,
        #[serde(default)]
        bytes: u64,
        #[serde(default)]
        speed: u64,
    },
    Completed {
        operation_id: String,
        #[serde(default)]
        message: Option<String>,
    },
    Failed {
        operation_id: String,
        error: String,
    },
    Cancelled {
        operation_id: String,
    },
}

impl OperationEvent {
    pub fn operation_id(&self) -> &str {
        match self {
            OperationEvent::Started { operation_id, .. }
            | OperationEvent::Progress { operation_id, .. }
            | OperationEvent::Completed { operation_id, .. }
            | OperationEvent::Failed { operation_id, .. }
            | OperationEvent::Cancelled { operation_id } => operation_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperationEvent::Completed { .. }
                | OperationEvent::Failed { .. }
                | OperationEvent::Cancelled { .. }
        )
    }
}

/// `instance-status` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceStatusEvent {
    pub instance_id: String,
    pub status: InstanceStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_performance_snapshot_event() {
        let evt: PerformanceEvent = serde_json::from_value(json!({
            "type": "snapshot",
            "instance_id": "a",
            "snapshot": {"timestamp": 1000, "tps": 19.8, "memory_used_mb": 2048.0, "cpu_percent": 35.5}
        }))
        .unwrap();
        match evt {
            PerformanceEvent::Snapshot { instance_id, snapshot } => {
                assert_eq!(instance_id, "a");
                assert_eq!(snapshot.tps, Some(19.8));
                assert_eq!(snapshot.mspt, None);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_performance_error_event() {
        let evt: PerformanceEvent = serde_json::from_value(json!({
            "type": "error", "instance_id": "b", "message": "agent crashed"
        }))
        .unwrap();
        assert_eq!(evt.instance_id(), "b");
    }

    #[test]
    fn test_bottleneck_event() {
        let evt: PerformanceEvent = serde_json::from_value(json!({
            "type": "bottleneck_detected",
            "instance_id": "a",
            "bottleneck": {"category": "memory", "severity": "high", "description": "GC pressure"}
        }))
        .unwrap();
        assert!(matches!(evt, PerformanceEvent::BottleneckDetected { .. }));
    }

    #[test]
    fn test_import_progress_defaults() {
        let p: ImportProgress = serde_json::from_value(json!({"phase": "copying", "current": 2, "total": 5})).unwrap();
        assert_eq!(p.bytes_copied, 0);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_download_progress_key() {
        let with_op: DownloadProgress =
            serde_json::from_value(json!({"id": "f1", "operation_id": "op"})).unwrap();
        let without: DownloadProgress = serde_json::from_value(json!({"id": "f1"})).unwrap();
        assert_eq!(with_op.key(), "op");
        assert_eq!(without.key(), "f1");
    }

    #[test]
    fn test_operation_event_terminal() {
        let evt: OperationEvent =
            serde_json::from_value(json!({"type": "cancelled", "operation_id": "x"})).unwrap();
        assert!(evt.is_terminal());
        assert_eq!(evt.operation_id(), "x");

        let evt: OperationEvent = serde_json::from_value(
            json!({"type": "progress", "operation_id": "x", "current": 3, "total": 10}),
        )
        .unwrap();
        assert!(!evt.is_terminal());
    }
}
