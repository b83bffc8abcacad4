//! Mod catalog browsing and installation.
//!
//! The result set is replaced wholesale on every search. When the search
//! parameters change, the old entries are dropped before the new request
//! starts, and a late completion of the older request is discarded by its
//! stale token, so entries of a previous query never reappear.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Followup, Toast};
use crate::api::{ModInstall, SearchQuery};
use crate::models::{CatalogEntry, CatalogSource, Instance, SearchPage};
use crate::store::{Loadable, RequestToken};
use crate::view_state::{Debouncer, ListCursor, PageCursor};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogMsg {
    SearchFinished(RequestToken, Result<SearchPage, String>),
    InstallFinished {
        slug: String,
        result: Result<Option<String>, String>,
    },
}

impl CatalogMsg {
    /// Toast for a finished install request.
    pub fn completion_toast(&self) -> Option<Toast> {
        match self {
            CatalogMsg::InstallFinished { slug, result: Ok(_) } => {
                Some(Toast::info(format!("Installing {}", slug)))
            }
            CatalogMsg::InstallFinished { result: Err(message), .. } => Some(Toast::error(message.clone())),
            CatalogMsg::SearchFinished(..) => None,
        }
    }
}

/// Install state of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState {
    Requested,
    /// Accepted by the backend; progress arrives on the downloads store.
    Running(Option<String>),
    Failed(String),
}

#[derive(Debug)]
pub struct CatalogStore {
    pub input: Debouncer,
    pub source: CatalogSource,
    pub minecraft_version: Option<String>,
    pub loader: Option<String>,
    pub page: PageCursor,
    pub results: Loadable<SearchPage>,
    pub cursor: ListCursor,
    pub installs: HashMap<String, InstallState>,
    /// Parameters of the request whose results are (or will be) shown.
    last_query: Option<SearchQuery>,
}

impl CatalogStore {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            input: Debouncer::new(debounce),
            source: CatalogSource::default(),
            minecraft_version: None,
            loader: None,
            page: PageCursor::first(page_size),
            results: Loadable::new(),
            cursor: ListCursor::new(),
            installs: HashMap::new(),
            last_query: None,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        self.results
            .data
            .as_ref()
            .map_or(&[][..], |page| page.entries.as_slice())
    }

    pub fn total(&self) -> u64 {
        self.results.data.as_ref().map_or(0, |page| page.total)
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.entries().get(self.cursor.selected)
    }

    /// Filter the catalog to an instance's game version and loader.
    pub fn target_instance(&mut self, instance: Option<&Instance>) {
        self.minecraft_version = instance
            .map(|i| i.minecraft_version.clone())
            .filter(|v| !v.is_empty());
        self.loader = instance.map(|i| i.loader.clone()).filter(|l| !l.is_empty());
    }

    fn query_for(&self, query: String, page: PageCursor) -> SearchQuery {
        SearchQuery {
            query,
            source: self.source,
            minecraft_version: self.minecraft_version.clone(),
            loader: self.loader.clone(),
            limit: page.limit,
            offset: page.offset,
        }
    }

    fn start(&mut self, query: SearchQuery) -> (RequestToken, SearchQuery) {
        let same_search = self.last_query.as_ref().is_some_and(|q| {
            q.query == query.query
                && q.source == query.source
                && q.minecraft_version == query.minecraft_version
                && q.loader == query.loader
        });
        if !same_search {
            self.results.clear();
            self.cursor = ListCursor::new();
        }
        self.page = PageCursor {
            limit: query.limit,
            offset: query.offset,
        };
        self.last_query = Some(query.clone());
        debug!(query = %query.query, source = query.source.as_str(), offset = query.offset, "catalog search");
        (self.results.begin(), query)
    }

    /// New search from the first page with the current input.
    pub fn begin_search(&mut self) -> (RequestToken, SearchQuery) {
        let text = self.input.flush();
        let query = self.query_for(text, PageCursor::first(self.page.limit));
        self.start(query)
    }

    /// Called on every tick: starts a search once typing has paused.
    pub fn poll_input(&mut self, now: Instant) -> Option<(RequestToken, SearchQuery)> {
        let text = self.input.poll(now)?;
        let query = self.query_for(text, PageCursor::first(self.page.limit));
        Some(self.start(query))
    }

    pub fn toggle_source(&mut self) -> (RequestToken, SearchQuery) {
        self.source = self.source.toggle();
        self.begin_search()
    }

    pub fn next_page(&mut self) -> Option<(RequestToken, SearchQuery)> {
        if !self.page.has_next(self.total()) || self.results.loading {
            return None;
        }
        let base = self.last_query.as_ref()?.query.clone();
        let query = self.query_for(base, self.page.next());
        Some(self.start(query))
    }

    pub fn previous_page(&mut self) -> Option<(RequestToken, SearchQuery)> {
        if !self.page.has_previous() || self.results.loading {
            return None;
        }
        let base = self.last_query.as_ref()?.query.clone();
        let query = self.query_for(base, self.page.previous());
        Some(self.start(query))
    }

    /// Request an install of the selected entry into `instance`.
    pub fn begin_install(&mut self, instance: &Instance) -> Option<ModInstall> {
        let entry = self.selected()?.clone();
        if matches!(
            self.installs.get(&entry.id),
            Some(InstallState::Requested | InstallState::Running(_))
        ) {
            return None;
        }
        self.installs.insert(entry.id.clone(), InstallState::Requested);
        Some(ModInstall {
            instance_id: instance.id.clone(),
            slug: entry.id,
            source: entry.source,
            minecraft_version: instance.minecraft_version.clone(),
            loader: instance.loader.clone(),
        })
    }

    pub fn apply(&mut self, msg: CatalogMsg) -> Followup {
        match msg {
            CatalogMsg::SearchFinished(token, result) => {
                if self.results.resolve(token, result).is_applied() {
                    let len = self.entries().len();
                    self.cursor.clamp(len);
                }
                Followup::Nothing
            }
            // The toast is raised by the shell, mounted or not.
            CatalogMsg::InstallFinished { slug, result } => {
                let state = match result {
                    Ok(operation_id) => InstallState::Running(operation_id),
                    Err(message) => InstallState::Failed(message),
                };
                self.installs.insert(slug, state);
                Followup::Nothing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            icon_url: None,
            downloads: 0,
            source: CatalogSource::Modrinth,
        }
    }

    fn page(ids: &[&str], total: u64) -> SearchPage {
        SearchPage {
            entries: ids.iter().map(|id| entry(id)).collect(),
            total,
        }
    }

    fn store() -> CatalogStore {
        CatalogStore::new(20, Duration::from_millis(300))
    }

    #[test]
    fn test_new_query_discards_old_results_even_if_old_resolves_late() {
        let mut store = store();
        store.input.set("sodium", Instant::now());
        let (t1, _) = store.begin_search();
        store.apply(CatalogMsg::SearchFinished(t1, Ok(page(&["sodium"], 1))));

        store.input.set("iris", Instant::now());
        let (t_slow, _) = store.begin_search();
        assert!(store.entries().is_empty());

        store.input.set("lithium", Instant::now());
        let (t_new, _) = store.begin_search();
        store.apply(CatalogMsg::SearchFinished(t_new, Ok(page(&["lithium"], 1))));
        store.apply(CatalogMsg::SearchFinished(t_slow, Ok(page(&["iris"], 1))));

        let ids: Vec<&str> = store.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["lithium"]);
    }

    #[test]
    fn test_paging_keeps_query_and_moves_offset() {
        let mut store = store();
        store.input.set("jei", Instant::now());
        let (t, _) = store.begin_search();
        store.apply(CatalogMsg::SearchFinished(t, Ok(page(&["a"], 45))));

        let (_, q) = store.next_page().unwrap();
        assert_eq!(q.query, "jei");
        assert_eq!(q.offset, 20);
        assert!(store.next_page().is_none(), "loading blocks paging");
    }

    #[test]
    fn test_source_toggle_restarts_from_first_page() {
        let mut store = store();
        store.page = store.page.next();
        let (_, q) = store.toggle_source();
        assert_eq!(q.source, CatalogSource::CurseForge);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn test_debounced_input_triggers_search() {
        let mut store = store();
        let t0 = Instant::now();
        store.input.push_char('a', t0);
        assert!(store.poll_input(t0 + Duration::from_millis(100)).is_none());
        let (_, q) = store.poll_input(t0 + Duration::from_millis(400)).unwrap();
        assert_eq!(q.query, "a");
    }

    #[test]
    fn test_install_flow() {
        let mut store = store();
        let (t, _) = store.begin_search();
        store.apply(CatalogMsg::SearchFinished(t, Ok(page(&["sodium"], 1))));
        let instance = Instance {
            id: "inst".into(),
            name: "Inst".into(),
            status: Default::default(),
            loader: "fabric".into(),
            minecraft_version: "1.20.1".into(),
        };

        let install = store.begin_install(&instance).unwrap();
        assert_eq!(install.slug, "sodium");
        assert_eq!(install.loader, "fabric");
        assert!(store.begin_install(&instance).is_none());

        store.apply(CatalogMsg::InstallFinished {
            slug: "sodium".into(),
            result: Err("no compatible version".into()),
        });
        assert_eq!(
            store.installs.get("sodium"),
            Some(&InstallState::Failed("no compatible version".into()))
        );
        assert!(store.begin_install(&instance).is_some());
    }

    #[test]
    fn test_target_instance_sets_filters() {
        let mut store = store();
        let instance = Instance {
            id: "x".into(),
            name: "X".into(),
            status: Default::default(),
            loader: String::new(),
            minecraft_version: "1.21".into(),
        };
        store.target_instance(Some(&instance));
        assert_eq!(store.minecraft_version.as_deref(), Some("1.21"));
        assert_eq!(store.loader, None);
    }
}
