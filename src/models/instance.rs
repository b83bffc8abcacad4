//! Launcher instance models.

use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// Lifecycle status of an instance as reported by the backend.
///
/// `Starting` and `Stopping` are also used locally as optimistic states
/// while a start/stop command is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    #[default]
    Stopped,
    Starting,
    Running,
    Stopping,
    Crashed,
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    pub fn is_running(self) -> bool {
        matches!(self, InstanceStatus::Running | InstanceStatus::Starting)
    }

    pub fn is_transitional(self) -> bool {
        matches!(self, InstanceStatus::Starting | InstanceStatus::Stopping)
    }

    pub fn label(self) -> &'static str {
        match self {
            InstanceStatus::Stopped => "stopped",
            InstanceStatus::Starting => "starting",
            InstanceStatus::Running => "running",
            InstanceStatus::Stopping => "stopping",
            InstanceStatus::Crashed => "crashed",
            InstanceStatus::Unknown => "unknown",
        }
    }
}

/// A configured Minecraft installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: InstanceStatus,
    #[serde(default)]
    pub loader: String,
    #[serde(default, alias = "minecraftVersion", alias = "version")]
    pub minecraft_version: String,
}

impl Instance {
    /// One-line description: `1.20.1 fabric`.
    pub fn version_label(&self) -> String {
        if self.loader.is_empty() {
            self.minecraft_version.clone()
        } else {
            format!("{} {}", self.minecraft_version, self.loader)
        }
    }
}
