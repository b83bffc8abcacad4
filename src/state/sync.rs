//! Settings sync between two instances.
//!
//! `execute` is only offered after a successful preview of the exact
//! source/target pair; changing either side throws the preview away.

use super::{Followup, Toast};
use crate::models::{SyncPreview, SyncResult};
use crate::store::{Loadable, RequestToken};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncMsg {
    Previewed(RequestToken, Result<SyncPreview, String>),
    Executed(RequestToken, Result<SyncResult, String>),
}

impl SyncMsg {
    /// Toast for an executed sync. Previews raise none.
    pub fn completion_toast(&self) -> Option<Toast> {
        match self {
            SyncMsg::Executed(_, Ok(summary)) => {
                Some(Toast::success(format!("Sync finished: {}", summary.summary())))
            }
            SyncMsg::Executed(_, Err(message)) => Some(Toast::error(format!("Sync failed: {}", message))),
            SyncMsg::Previewed(..) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    pub source_id: String,
    pub target_id: String,
}

#[derive(Debug, Default)]
pub struct SyncStore {
    pub source_id: Option<String>,
    pub target_id: Option<String>,
    pub preview: Loadable<SyncPreview>,
    pub result: Loadable<SyncResult>,
    /// Pair the current preview was computed for.
    previewed: Option<SyncPair>,
}

impl SyncStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair(&self) -> Option<SyncPair> {
        let source_id = self.source_id.clone()?;
        let target_id = self.target_id.clone()?;
        if source_id == target_id {
            return None;
        }
        Some(SyncPair { source_id, target_id })
    }

    pub fn set_source(&mut self, id: Option<String>) {
        if self.source_id != id {
            self.source_id = id;
            self.invalidate();
        }
    }

    pub fn set_target(&mut self, id: Option<String>) {
        if self.target_id != id {
            self.target_id = id;
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        self.preview.clear();
        self.result.clear();
        self.previewed = None;
    }

    pub fn begin_preview(&mut self) -> Option<(RequestToken, SyncPair)> {
        let pair = self.pair()?;
        self.previewed = None;
        self.result.clear();
        Some((self.preview.begin(), pair))
    }

    /// Whether the confirm step is available.
    pub fn can_execute(&self) -> bool {
        !self.preview.loading
            && !self.result.loading
            && self.preview.data.is_some()
            && self.previewed.is_some()
            && self.previewed == self.pair()
    }

    pub fn begin_execute(&mut self) -> Option<(RequestToken, SyncPair)> {
        if !self.can_execute() {
            return None;
        }
        let pair = self.previewed.clone()?;
        Some((self.result.begin(), pair))
    }

    pub fn apply(&mut self, msg: SyncMsg) -> Followup {
        match msg {
            SyncMsg::Previewed(token, result) => {
                let ok = result.is_ok();
                if self.preview.resolve(token, result).is_applied() && ok {
                    self.previewed = self.pair();
                }
                Followup::Nothing
            }
            SyncMsg::Executed(token, result) => {
                if self.result.resolve(token, result).is_applied() {
                    // A preview describes the state before the sync ran.
                    self.preview.clear();
                    self.previewed = None;
                }
                Followup::Nothing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SyncFile, SyncFileKind};

    fn preview() -> SyncPreview {
        SyncPreview {
            files: vec![SyncFile {
                path: "options.txt".into(),
                kind: SyncFileKind::Changed,
                size: Some(10),
            }],
        }
    }

    fn paired() -> SyncStore {
        let mut store = SyncStore::new();
        store.set_source(Some("a".into()));
        store.set_target(Some("b".into()));
        store
    }

    #[test]
    fn test_execute_requires_successful_preview() {
        let mut store = paired();
        assert!(!store.can_execute());
        let (token, pair) = store.begin_preview().unwrap();
        assert_eq!(pair.source_id, "a");
        assert!(!store.can_execute());

        store.apply(SyncMsg::Previewed(token, Ok(preview())));
        assert!(store.can_execute());
        assert!(store.begin_execute().is_some());
    }

    #[test]
    fn test_failed_preview_blocks_execute() {
        let mut store = paired();
        let (token, _) = store.begin_preview().unwrap();
        store.apply(SyncMsg::Previewed(token, Err("target missing".into())));
        assert!(!store.can_execute());
        assert!(store.begin_execute().is_none());
    }

    #[test]
    fn test_changing_pair_discards_preview() {
        let mut store = paired();
        let (token, _) = store.begin_preview().unwrap();
        store.apply(SyncMsg::Previewed(token, Ok(preview())));
        store.set_target(Some("c".into()));
        assert!(store.preview.data.is_none());
        assert!(!store.can_execute());
    }

    #[test]
    fn test_preview_of_old_pair_resolving_late_is_dropped() {
        let mut store = paired();
        let (token, _) = store.begin_preview().unwrap();
        store.set_target(Some("c".into()));
        store.apply(SyncMsg::Previewed(token, Ok(preview())));
        assert!(!store.can_execute());
    }

    #[test]
    fn test_same_instance_on_both_sides() {
        let mut store = SyncStore::new();
        store.set_source(Some("a".into()));
        store.set_target(Some("a".into()));
        assert!(store.begin_preview().is_none());
    }

    #[test]
    fn test_execute_clears_preview() {
        let mut store = paired();
        let (token, _) = store.begin_preview().unwrap();
        store.apply(SyncMsg::Previewed(token, Ok(preview())));
        let (token, _) = store.begin_execute().unwrap();
        let followup = store.apply(SyncMsg::Executed(
            token,
            Ok(SyncResult { copied: 1, skipped: 0, errors: vec![] }),
        ));
        assert_eq!(followup, Followup::Nothing);
        assert!(store.result.data.is_some());
        assert!(!store.can_execute(), "needs a fresh preview");
    }
}
