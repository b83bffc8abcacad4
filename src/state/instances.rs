//! Instance list with optimistic start/stop.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::Followup;
use crate::events::InstanceStatusEvent;
use crate::models::{Instance, InstanceStatus};
use crate::store::{Loadable, RequestToken};
use crate::view_state::ListCursor;

#[derive(Debug, Clone, PartialEq)]
pub enum InstancesMsg {
    Loaded(RequestToken, Result<Vec<Instance>, String>),
    /// A start/stop command returned.
    ToggleFinished {
        id: String,
        result: Result<(), String>,
    },
    Status(InstanceStatusEvent),
}

/// A start or stop the shell should send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    pub id: String,
    pub start: bool,
}

#[derive(Debug, Default)]
pub struct InstancesStore {
    pub list: Loadable<Vec<Instance>>,
    pub cursor: ListCursor,
    /// Error from the last start/stop, shown next to the list.
    pub action_error: Option<String>,
    /// Status before an optimistic toggle, for revert.
    pending: HashMap<String, InstanceStatus>,
}

impl InstancesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[Instance] {
        self.list.data.as_deref().unwrap_or(&[])
    }

    pub fn get(&self, id: &str) -> Option<&Instance> {
        self.instances().iter().find(|i| i.id == id)
    }

    pub fn selected(&self) -> Option<&Instance> {
        self.instances().get(self.cursor.selected)
    }

    pub fn begin_fetch(&mut self) -> RequestToken {
        self.list.begin()
    }

    /// Flip the selected instance optimistically and return the command to
    /// send. Nothing happens while a toggle for it is already in flight.
    pub fn begin_toggle(&mut self, id: &str) -> Option<ToggleRequest> {
        if self.pending.contains_key(id) {
            return None;
        }
        let instance = self.list.data_mut()?.iter_mut().find(|i| i.id == id)?;
        let start = !instance.status.is_running();
        self.pending.insert(id.to_string(), instance.status);
        instance.status = if start {
            InstanceStatus::Starting
        } else {
            InstanceStatus::Stopping
        };
        self.action_error = None;
        Some(ToggleRequest {
            id: id.to_string(),
            start,
        })
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    pub fn apply(&mut self, msg: InstancesMsg) -> Followup {
        match msg {
            InstancesMsg::Loaded(token, result) => {
                if self.list.resolve(token, result).is_applied() {
                    self.pending.clear();
                    let len = self.instances().len();
                    self.cursor.clamp(len);
                }
                Followup::Nothing
            }
            InstancesMsg::ToggleFinished { id, result } => {
                let previous = self.pending.remove(&id);
                match result {
                    Ok(()) => {
                        // Settle the optimistic state unless a status event
                        // already did.
                        if let Some(instance) = self.find_mut(&id) {
                            instance.status = match instance.status {
                                InstanceStatus::Starting => InstanceStatus::Running,
                                InstanceStatus::Stopping => InstanceStatus::Stopped,
                                other => other,
                            };
                        }
                        Followup::Nothing
                    }
                    Err(message) => {
                        if let (Some(prev), Some(instance)) = (previous, self.find_mut(&id)) {
                            instance.status = prev;
                        }
                        self.action_error = Some(message.clone());
                        Followup::Notify(super::Toast::error(message))
                    }
                }
            }
            InstancesMsg::Status(event) => match self.find_mut(&event.instance_id) {
                Some(instance) => {
                    debug!(instance = %event.instance_id, status = event.status.label(), "instance status");
                    instance.status = event.status;
                    self.pending.remove(&event.instance_id);
                    Followup::Nothing
                }
                None => {
                    warn!(instance = %event.instance_id, "status for unknown instance, refetching");
                    Followup::Refetch
                }
            },
        }
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Instance> {
        self.list.data_mut()?.iter_mut().find(|i| i.id == id)
    }
}
