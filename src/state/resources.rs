//! Shader pack and resource pack management.

use tracing::debug;

use super::{Followup, Toast};
use crate::models::{Resource, ResourceScope, ResourceType};
use crate::store::{Loadable, RequestToken};
use crate::view_state::ListCursor;

#[derive(Debug, Clone, PartialEq)]
pub enum ResourcesMsg {
    Loaded(RequestToken, Result<Vec<Resource>, String>),
    ToggleFinished {
        id: i64,
        enabled: bool,
        result: Result<(), String>,
    },
    RemoveFinished {
        id: i64,
        result: Result<(), String>,
    },
    InstallFinished(RequestToken, Result<Resource, String>),
}

/// How a new resource is being installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallSource {
    Modrinth(String),
    LocalPath(String),
}

#[derive(Debug, Default)]
pub struct ResourcesStore {
    pub resource_type: ResourceType,
    pub scope: ResourceScope,
    pub list: Loadable<Vec<Resource>>,
    pub install: Loadable<Resource>,
    pub cursor: ListCursor,
    pub action_error: Option<String>,
    /// Slug or file path typed into the install field.
    pub install_input: String,
    removing: Vec<i64>,
}

impl ResourcesStore {
    pub fn new(resource_type: ResourceType, scope: ResourceScope) -> Self {
        Self {
            resource_type,
            scope,
            ..Self::default()
        }
    }

    pub fn resources(&self) -> &[Resource] {
        self.list.data.as_deref().unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<&Resource> {
        self.resources().get(self.cursor.selected)
    }

    pub fn begin_fetch(&mut self) -> RequestToken {
        self.list.begin()
    }

    /// Switch type or scope. The old list is dropped and any fetch still in
    /// flight for it becomes stale.
    pub fn set_filter(&mut self, resource_type: ResourceType, scope: ResourceScope) -> bool {
        if self.resource_type == resource_type && self.scope == scope {
            return false;
        }
        self.resource_type = resource_type;
        self.scope = scope;
        self.list.clear();
        self.cursor = ListCursor::new();
        true
    }

    /// Flip `enabled` locally; returns the value to send.
    pub fn begin_toggle(&mut self, id: i64) -> Option<bool> {
        let resource = self.list.data_mut()?.iter_mut().find(|r| r.id == id)?;
        resource.enabled = !resource.enabled;
        self.action_error = None;
        Some(resource.enabled)
    }

    pub fn begin_remove(&mut self, id: i64) -> bool {
        if self.removing.contains(&id) || !self.resources().iter().any(|r| r.id == id) {
            return false;
        }
        self.removing.push(id);
        self.action_error = None;
        true
    }

    pub fn is_removing(&self, id: i64) -> bool {
        self.removing.contains(&id)
    }

    /// Classify the install field: a path to an archive installs locally,
    /// anything else is treated as a Modrinth slug.
    pub fn begin_install(&mut self) -> Option<(RequestToken, InstallSource)> {
        let input = self.install_input.trim();
        if input.is_empty() {
            return None;
        }
        let source = if crate::models::is_resource_file_path(input) {
            InstallSource::LocalPath(input.trim_matches(|c| c == '\'' || c == '"').to_string())
        } else {
            InstallSource::Modrinth(input.to_string())
        };
        Some((self.install.begin(), source))
    }

    pub fn apply(&mut self, msg: ResourcesMsg) -> Followup {
        match msg {
            ResourcesMsg::Loaded(token, result) => {
                if self.list.resolve(token, result).is_applied() {
                    self.removing.clear();
                    let len = self.resources().len();
                    self.cursor.clamp(len);
                }
                Followup::Nothing
            }
            ResourcesMsg::ToggleFinished { id, enabled, result } => {
                if let Err(message) = result {
                    // Revert only if nothing else changed it since.
                    if let Some(resource) = self
                        .list
                        .data_mut()
                        .and_then(|list| list.iter_mut().find(|r| r.id == id))
                    {
                        if resource.enabled == enabled {
                            resource.enabled = !enabled;
                        }
                    }
                    self.action_error = Some(message);
                }
                Followup::Nothing
            }
            ResourcesMsg::RemoveFinished { id, result } => {
                self.removing.retain(|r| *r != id);
                match result {
                    Ok(()) => {
                        if let Some(list) = self.list.data_mut() {
                            list.retain(|r| r.id != id);
                        }
                        let len = self.resources().len();
                        self.cursor.clamp(len);
                        Followup::Nothing
                    }
                    Err(message) => {
                        self.action_error = Some(message);
                        Followup::Nothing
                    }
                }
            }
            ResourcesMsg::InstallFinished(token, result) => {
                let outcome = result.as_ref().map(|r| r.name.clone()).map_err(Clone::clone);
                if !self.install.resolve(token, result).is_applied() {
                    return Followup::Nothing;
                }
                match outcome {
                    Ok(name) => {
                        debug!(resource = %name, "resource installed");
                        self.install_input.clear();
                        // The backend owns placement and ids: refetch.
                        Followup::RefetchWith(Toast::success(format!("Installed {}", name)))
                    }
                    Err(message) => Followup::Notify(Toast::error(message)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: i64, enabled: bool) -> Resource {
        Resource {
            id,
            resource_type: ResourceType::Shaderpack,
            name: format!("pack-{}", id),
            file_name: format!("pack-{}.zip", id),
            enabled,
            version: None,
            source: None,
            instance_id: None,
        }
    }

    fn loaded(list: Vec<Resource>) -> ResourcesStore {
        let mut store = ResourcesStore::new(ResourceType::Shaderpack, ResourceScope::Global);
        let token = store.begin_fetch();
        store.apply(ResourcesMsg::Loaded(token, Ok(list)));
        store
    }

    #[test]
    fn test_toggle_is_optimistic_and_reverts_on_error() {
        let mut store = loaded(vec![resource(1, true)]);
        assert_eq!(store.begin_toggle(1), Some(false));
        assert!(!store.resources()[0].enabled);

        store.apply(ResourcesMsg::ToggleFinished {
            id: 1,
            enabled: false,
            result: Err("file locked".into()),
        });
        assert!(store.resources()[0].enabled);
        assert_eq!(store.action_error.as_deref(), Some("file locked"));
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut store = loaded(vec![resource(1, true)]);
        assert_eq!(store.begin_toggle(99), None);
    }

    #[test]
    fn test_remove_success_drops_entry() {
        let mut store = loaded(vec![resource(1, true), resource(2, true)]);
        assert!(store.begin_remove(2));
        assert!(!store.begin_remove(2));
        assert!(store.is_removing(2));

        store.apply(ResourcesMsg::RemoveFinished { id: 2, result: Ok(()) });
        assert_eq!(store.resources().len(), 1);
        assert!(!store.is_removing(2));
    }

    #[test]
    fn test_filter_change_drops_stale_fetch() {
        let mut store = loaded(vec![resource(1, true)]);
        let token = store.begin_fetch();
        assert!(store.set_filter(ResourceType::Resourcepack, ResourceScope::Global));
        store.apply(ResourcesMsg::Loaded(token, Ok(vec![resource(7, true)])));
        assert!(store.resources().is_empty());
        assert!(!store.set_filter(ResourceType::Resourcepack, ResourceScope::Global));
    }

    #[test]
    fn test_install_input_classification() {
        let mut store = loaded(vec![]);
        store.install_input = "complementary-reimagined".into();
        let (_, source) = store.begin_install().unwrap();
        assert_eq!(source, InstallSource::Modrinth("complementary-reimagined".into()));

        store.install_input = "'/home/me/BSL.zip'".into();
        let (_, source) = store.begin_install().unwrap();
        assert_eq!(source, InstallSource::LocalPath("/home/me/BSL.zip".into()));

        store.install_input = "   ".into();
        assert!(store.begin_install().is_none());
    }

    #[test]
    fn test_install_success_refetches() {
        let mut store = loaded(vec![]);
        store.install_input = "bsl".into();
        let (token, _) = store.begin_install().unwrap();
        let followup = store.apply(ResourcesMsg::InstallFinished(token, Ok(resource(5, true))));
        assert!(matches!(followup, Followup::RefetchWith(_)));
        assert!(store.install_input.is_empty());
    }
}
