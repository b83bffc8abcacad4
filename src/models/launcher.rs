//! Third-party launcher detection models.

use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// An instance found inside another launcher's data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherInstance {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "minecraftVersion")]
    pub minecraft_version: Option<String>,
    #[serde(default)]
    pub loader: Option<String>,
}

/// A launcher installation detected on this machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLauncher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub instances: Vec<LauncherInstance>,
}
