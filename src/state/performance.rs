//! Performance monitoring of one running instance.

use tracing::{debug, warn};

use super::{Followup, Toast};
use crate::events::{Bottleneck, PerformanceEvent, PerformanceSnapshot};
use crate::view_state::{PerformanceSummary, RingBuffer};

/// Default snapshot retention.
pub const DEFAULT_RETENTION: usize = 500;

/// Snapshots averaged for the header figures.
pub const SUMMARY_WINDOW: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceMsg {
    StartFinished {
        instance_id: String,
        result: Result<(), String>,
    },
    StopFinished {
        instance_id: String,
        result: Result<(), String>,
    },
    Event(PerformanceEvent),
}

#[derive(Debug)]
pub struct PerformanceStore {
    pub instance_id: Option<String>,
    pub monitoring: bool,
    /// A start or stop command is in flight.
    pub pending: bool,
    pub snapshots: RingBuffer<PerformanceSnapshot>,
    pub bottlenecks: Vec<Bottleneck>,
    pub error: Option<String>,
}

impl Default for PerformanceStore {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl PerformanceStore {
    pub fn new(retention: usize) -> Self {
        Self {
            instance_id: None,
            monitoring: false,
            pending: false,
            snapshots: RingBuffer::new(retention),
            bottlenecks: Vec::new(),
            error: None,
        }
    }

    /// Point the store at an instance. Switching instances discards
    /// everything collected for the previous one.
    pub fn bind(&mut self, instance_id: &str) {
        if self.instance_id.as_deref() == Some(instance_id) {
            return;
        }
        self.instance_id = Some(instance_id.to_string());
        self.monitoring = false;
        self.pending = false;
        self.snapshots.clear();
        self.bottlenecks.clear();
        self.error = None;
    }

    pub fn begin_start(&mut self) -> Option<String> {
        if self.monitoring || self.pending {
            return None;
        }
        let id = self.instance_id.clone()?;
        self.pending = true;
        self.error = None;
        Some(id)
    }

    pub fn begin_stop(&mut self) -> Option<String> {
        if !self.monitoring || self.pending {
            return None;
        }
        let id = self.instance_id.clone()?;
        self.pending = true;
        Some(id)
    }

    pub fn summary(&self) -> PerformanceSummary {
        PerformanceSummary::from_snapshots(self.snapshots.iter(), SUMMARY_WINDOW)
    }

    fn is_bound_to(&self, instance_id: &str) -> bool {
        self.instance_id.as_deref() == Some(instance_id)
    }

    pub fn apply(&mut self, msg: PerformanceMsg) -> Followup {
        match msg {
            PerformanceMsg::StartFinished { instance_id, result } => {
                if !self.is_bound_to(&instance_id) {
                    return Followup::Nothing;
                }
                self.pending = false;
                match result {
                    Ok(()) => self.monitoring = true,
                    Err(message) => self.error = Some(message),
                }
                Followup::Nothing
            }
            PerformanceMsg::StopFinished { instance_id, result } => {
                if !self.is_bound_to(&instance_id) {
                    return Followup::Nothing;
                }
                self.pending = false;
                match result {
                    Ok(()) => self.monitoring = false,
                    Err(message) => self.error = Some(message),
                }
                Followup::Nothing
            }
            PerformanceMsg::Event(event) => self.apply_event(event),
        }
    }

    fn apply_event(&mut self, event: PerformanceEvent) -> Followup {
        if !self.is_bound_to(event.instance_id()) {
            debug!(instance = event.instance_id(), "dropping performance event for other instance");
            return Followup::Nothing;
        }
        match event {
            PerformanceEvent::Started { .. } => {
                self.monitoring = true;
                self.error = None;
            }
            PerformanceEvent::Stopped { .. } => self.monitoring = false,
            PerformanceEvent::Snapshot { snapshot, .. } => {
                self.snapshots.push(snapshot);
            }
            PerformanceEvent::BottleneckDetected { bottleneck, .. } => {
                // Replace an existing report of the same category.
                self.bottlenecks.retain(|b| b.category != bottleneck.category);
                self.bottlenecks.push(bottleneck);
                self.bottlenecks.sort_by(|a, b| b.severity.cmp(&a.severity));
            }
            PerformanceEvent::Error { message, .. } => {
                warn!(error = %message, "performance monitoring failed");
                self.monitoring = false;
                self.pending = false;
                self.error = Some(message.clone());
                return Followup::Notify(Toast::error(format!("Monitoring stopped: {}", message)));
            }
        }
        Followup::Nothing
    }
}
