//! Patches: preview against an instance, apply, create.

use tracing::debug;

use super::{Followup, Toast};
use crate::models::{PatchApplyResult, PatchCompatibility, PatchSummary, SnapshotInfo};
use crate::store::{Loadable, RequestToken};
use crate::view_state::ListCursor;

#[derive(Debug, Clone, PartialEq)]
pub enum PatchesMsg {
    Loaded(RequestToken, Result<Vec<PatchSummary>, String>),
    Previewed(RequestToken, Result<PatchCompatibility, String>),
    Applied(RequestToken, Result<PatchApplyResult, String>),
    SnapshotCreated(RequestToken, Result<SnapshotInfo, String>),
    PatchCreated(RequestToken, Result<PatchSummary, String>),
}

/// Patch and instance a preview or apply is issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchTarget {
    pub patch_id: String,
    pub instance_id: String,
}

#[derive(Debug, Default)]
pub struct PatchesStore {
    pub list: Loadable<Vec<PatchSummary>>,
    pub cursor: ListCursor,
    pub instance_id: Option<String>,
    pub preview: Loadable<PatchCompatibility>,
    pub apply_result: Loadable<PatchApplyResult>,
    pub snapshot: Loadable<SnapshotInfo>,
    pub create: Loadable<PatchSummary>,
    /// Name typed for a new patch.
    pub new_patch_name: String,
    previewed: Option<PatchTarget>,
    requested: Option<PatchTarget>,
}

impl PatchesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patches(&self) -> &[PatchSummary] {
        self.list.data.as_deref().unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<&PatchSummary> {
        self.patches().get(self.cursor.selected)
    }

    fn target(&self) -> Option<PatchTarget> {
        Some(PatchTarget {
            patch_id: self.selected()?.id.clone(),
            instance_id: self.instance_id.clone()?,
        })
    }

    pub fn begin_fetch(&mut self) -> RequestToken {
        self.list.begin()
    }

    pub fn select(&mut self, index: usize) {
        let len = self.patches().len();
        let before = self.cursor.selected;
        self.cursor.select(index, len);
        if self.cursor.selected != before {
            self.reset_preview();
        }
    }

    pub fn set_instance(&mut self, instance_id: Option<String>) {
        if self.instance_id != instance_id {
            self.instance_id = instance_id;
            self.reset_preview();
            self.snapshot.clear();
        }
    }

    fn reset_preview(&mut self) {
        self.preview.clear();
        self.apply_result.clear();
        self.previewed = None;
        self.requested = None;
    }

    pub fn begin_preview(&mut self) -> Option<(RequestToken, PatchTarget)> {
        let target = self.target()?;
        self.previewed = None;
        self.requested = Some(target.clone());
        self.apply_result.clear();
        Some((self.preview.begin(), target))
    }

    /// Apply is available only after a preview of the same patch and
    /// instance that reported no blocking problems.
    pub fn can_apply(&self) -> bool {
        let Some(compat) = &self.preview.data else {
            return false;
        };
        !self.preview.loading
            && !self.apply_result.loading
            && compat.allows_apply()
            && self.previewed.is_some()
            && self.previewed == self.target()
    }

    pub fn begin_apply(&mut self) -> Option<(RequestToken, PatchTarget)> {
        if !self.can_apply() {
            return None;
        }
        let target = self.previewed.clone()?;
        Some((self.apply_result.begin(), target))
    }

    pub fn begin_snapshot(&mut self) -> Option<(RequestToken, String)> {
        let instance_id = self.instance_id.clone()?;
        if self.snapshot.loading {
            return None;
        }
        Some((self.snapshot.begin(), instance_id))
    }

    /// Returns `(token, instance_id, snapshot_id, name)`.
    pub fn begin_create(&mut self) -> Option<(RequestToken, String, String, String)> {
        let snapshot = self.snapshot.data.as_ref()?;
        let name = self.new_patch_name.trim();
        if name.is_empty() || self.create.loading {
            return None;
        }
        let request = (snapshot.instance_id.clone(), snapshot.id.clone(), name.to_string());
        Some((self.create.begin(), request.0, request.1, request.2))
    }

    pub fn apply(&mut self, msg: PatchesMsg) -> Followup {
        match msg {
            PatchesMsg::Loaded(token, result) => {
                if self.list.resolve(token, result).is_applied() {
                    let len = self.patches().len();
                    self.cursor.clamp(len);
                }
                Followup::Nothing
            }
            PatchesMsg::Previewed(token, result) => {
                let ok = result.is_ok();
                if self.preview.resolve(token, result).is_applied() && ok {
                    // Only count the preview if the selection did not move
                    // while it was in flight.
                    if self.requested == self.target() {
                        self.previewed = self.requested.take();
                    } else {
                        debug!("patch selection changed during preview");
                    }
                }
                Followup::Nothing
            }
            PatchesMsg::Applied(token, result) => {
                let toast = match &result {
                    Ok(r) if r.success => Toast::success(format!(
                        "Patch applied: +{} -{} mods",
                        r.mods_added, r.mods_removed
                    )),
                    Ok(r) => Toast::error(format!("Patch failed: {}", r.errors.join("; "))),
                    Err(message) => Toast::error(format!("Patch failed: {}", message)),
                };
                if !self.apply_result.resolve(token, result).is_applied() {
                    return Followup::Nothing;
                }
                self.preview.clear();
                self.previewed = None;
                Followup::Notify(toast)
            }
            PatchesMsg::SnapshotCreated(token, result) => {
                let toast = match &result {
                    Ok(s) => Toast::success(format!("Snapshot {} created ({} mods)", s.id, s.mod_count)),
                    Err(message) => Toast::error(message.clone()),
                };
                if self.snapshot.resolve(token, result).is_applied() {
                    Followup::Notify(toast)
                } else {
                    Followup::Nothing
                }
            }
            PatchesMsg::PatchCreated(token, result) => {
                let outcome = result.as_ref().map(|p| p.name.clone()).map_err(Clone::clone);
                if !self.create.resolve(token, result).is_applied() {
                    return Followup::Nothing;
                }
                match outcome {
                    Ok(name) => {
                        self.new_patch_name.clear();
                        Followup::RefetchWith(Toast::success(format!("Created patch {}", name)))
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
    use crate::models::CompatibilityStatus;

    fn patch(id: &str) -> PatchSummary {
        PatchSummary {
            id: id.into(),
            name: id.to_uppercase(),
            ..Default::default()
        }
    }

    fn compat(status: CompatibilityStatus, errors: &[&str]) -> PatchCompatibility {
        PatchCompatibility {
            status,
            errors: errors.iter().map(|e| e.to_string()).collect(),
            warnings: vec![],
        }
    }

    fn loaded() -> PatchesStore {
        let mut store = PatchesStore::new();
        let token = store.begin_fetch();
        store.apply(PatchesMsg::Loaded(token, Ok(vec![patch("p1"), patch("p2")])));
        store.set_instance(Some("inst".into()));
        store
    }

    fn previewed(status: CompatibilityStatus, errors: &[&str]) -> PatchesStore {
        let mut store = loaded();
        let (token, _) = store.begin_preview().unwrap();
        store.apply(PatchesMsg::Previewed(token, Ok(compat(status, errors))));
        store
    }

    #[test]
    fn test_apply_requires_preview() {
        let mut store = loaded();
        assert!(!store.can_apply());
        assert!(store.begin_apply().is_none());
    }

    #[test]
    fn test_apply_allowed_for_compatible_statuses() {
        assert!(previewed(CompatibilityStatus::Compatible, &[]).can_apply());
        assert!(previewed(CompatibilityStatus::CompatibleWithWarnings, &[]).can_apply());
    }

    #[test]
    fn test_apply_blocked() {
        assert!(!previewed(CompatibilityStatus::Incompatible, &[]).can_apply());
        assert!(!previewed(CompatibilityStatus::AlreadyApplied, &[]).can_apply());
        assert!(!previewed(CompatibilityStatus::Compatible, &["missing dependency"]).can_apply());
    }

    #[test]
    fn test_moving_selection_invalidates_preview() {
        let mut store = previewed(CompatibilityStatus::Compatible, &[]);
        store.select(1);
        assert!(!store.can_apply());
        store.select(0);
        assert!(!store.can_apply());
    }

    #[test]
    fn test_instance_change_invalidates_preview() {
        let mut store = previewed(CompatibilityStatus::Compatible, &[]);
        store.set_instance(Some("other".into()));
        assert!(!store.can_apply());
    }

    #[test]
    fn test_apply_result() {
        let mut store = previewed(CompatibilityStatus::Compatible, &[]);
        let (token, target) = store.begin_apply().unwrap();
        assert_eq!(target.patch_id, "p1");
        let followup = store.apply(PatchesMsg::Applied(
            token,
            Ok(PatchApplyResult { success: true, mods_added: 2, mods_removed: 1, errors: vec![] }),
        ));
        assert_eq!(followup, Followup::Notify(Toast::success("Patch applied: +2 -1 mods")));
        assert!(!store.can_apply());
    }

    #[test]
    fn test_snapshot_then_create_patch() {
        let mut store = loaded();
        assert!(store.begin_create().is_none());
        let (token, instance) = store.begin_snapshot().unwrap();
        assert_eq!(instance, "inst");
        store.apply(PatchesMsg::SnapshotCreated(
            token,
            Ok(SnapshotInfo {
                id: "snap".into(),
                instance_id: "inst".into(),
                created_at: None,
                mod_count: 12,
            }),
        ));

        assert!(store.begin_create().is_none(), "name required");
        store.new_patch_name = "perf tweaks".into();
        let (token, instance, snapshot, name) = store.begin_create().unwrap();
        assert_eq!((instance.as_str(), snapshot.as_str(), name.as_str()), ("inst", "snap", "perf tweaks"));

        let followup = store.apply(PatchesMsg::PatchCreated(token, Ok(patch("p3"))));
        assert!(matches!(followup, Followup::RefetchWith(_)));
        assert!(store.new_patch_name.is_empty());
    }
}
