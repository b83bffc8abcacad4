//! Application shell.
//!
//! [`App`] owns the process-wide [`AppContext`], the stores that outlive a
//! screen (instances, recipes) and the store of the mounted screen. Spawned
//! commands and event callbacks report back through [`AppMessage`]s that the
//! run loop feeds into [`App::handle_message`].

pub mod actions;
pub mod context;
pub mod handlers;
pub mod messages;
pub mod subscriptions;
pub mod types;

pub use context::AppContext;
pub use messages::{AppMessage, ScreenMsg};
pub use types::{MountId, Prompt, PromptTarget, Screen, SettingsSection, TransferPane};

use std::time::Instant;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::events::{ConnectionState, SubscriptionSet};
use crate::models::{ResourceScope, ResourceType};
use crate::state::{
    CatalogMsg, CatalogStore, ExportStore, Followup, ImportStore, InstancesStore, PatchesStore,
    PerformanceStore, RecipesStore, ResourcesStore, SettingsStore, SyncStore, TranslationsStore,
};
use crate::ui::interaction::{DragState, HitAreaRegistry};
use crate::view_state::ListCursor;

/// Stores of the import/export screen.
#[derive(Debug, Default)]
pub struct TransferView {
    pub import: ImportStore,
    pub export: ExportStore,
    pub pane: TransferPane,
    /// Row within the selected launcher's instances.
    pub instance_cursor: ListCursor,
}

/// Stores of the settings screen.
#[derive(Debug, Default)]
pub struct SettingsView {
    pub settings: SettingsStore,
    pub translations: TranslationsStore,
    pub section: SettingsSection,
}

/// The mounted screen and the store it owns. Screens backed by app-level
/// stores carry nothing.
#[derive(Debug)]
pub enum ScreenView {
    Instances,
    Catalog(CatalogStore),
    Resources(ResourcesStore),
    Performance(PerformanceStore),
    Downloads(ListCursor),
    Recipes,
    Patches(PatchesStore),
    Sync(SyncStore),
    Transfer(Box<TransferView>),
    Settings(Box<SettingsView>),
}

pub struct App {
    pub ctx: AppContext,
    pub screen: Screen,
    pub mount: MountId,
    pub view: ScreenView,
    pub instances: InstancesStore,
    pub recipes: RecipesStore,
    pub prompt: Option<Prompt>,
    pub connection: ConnectionState,
    pub hit_areas: HitAreaRegistry,
    pub drag: DragState,
    /// Last known frame size, for mouse hit tests before the first draw.
    pub viewport: (u16, u16),
    pub should_quit: bool,
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    screen_subscriptions: SubscriptionSet,
    global_subscriptions: SubscriptionSet,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            ctx,
            screen: Screen::Instances,
            mount: MountId::default(),
            view: ScreenView::Instances,
            instances: InstancesStore::new(),
            recipes: RecipesStore::new(),
            prompt: None,
            connection: ConnectionState::Connecting,
            hit_areas: HitAreaRegistry::new(),
            drag: DragState::default(),
            viewport: (0, 0),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_tx,
            message_rx: Some(message_rx),
            screen_subscriptions: SubscriptionSet::new(),
            global_subscriptions: SubscriptionSet::new(),
        }
    }

    /// Subscribe the global stores, load preferences and mount the first
    /// screen (which fetches instances). Must run inside a tokio runtime.
    pub fn start(&mut self) {
        info!(backend = %self.ctx.config.backend_url, "starting shell");
        self.subscribe_global();
        self.load_preferences();
        self.mount_screen();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.unmount_screen();
        self.global_subscriptions.dispose_all();
        self.should_quit = true;
    }

    /// Live subscriptions owned by the mounted screen.
    pub fn screen_subscription_count(&self) -> usize {
        self.screen_subscriptions.len()
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        if screen == self.screen {
            return;
        }
        self.unmount_screen();
        self.screen = screen;
        self.mount_screen();
        self.mark_dirty();
    }

    fn mount_screen(&mut self) {
        self.mount = self.mount.next();
        self.prompt = None;
        self.drag.cancel();
        let selected = self.instances.selected().cloned();
        debug!(screen = self.screen.title(), mount = %self.mount, "mount");

        self.view = match self.screen {
            Screen::Instances => ScreenView::Instances,
            Screen::Catalog => {
                let config = &self.ctx.config;
                let mut store = CatalogStore::new(config.page_size, config.search_debounce());
                store.target_instance(selected.as_ref());
                ScreenView::Catalog(store)
            }
            Screen::Resources => {
                ScreenView::Resources(ResourcesStore::new(ResourceType::default(), ResourceScope::Global))
            }
            Screen::Performance => {
                let mut store = PerformanceStore::new(self.ctx.config.snapshot_retention);
                let running = self
                    .instances
                    .instances()
                    .iter()
                    .find(|i| i.status.is_running())
                    .or(selected.as_ref());
                if let Some(instance) = running {
                    store.bind(&instance.id);
                }
                ScreenView::Performance(store)
            }
            Screen::Downloads => ScreenView::Downloads(ListCursor::new()),
            Screen::Recipes => ScreenView::Recipes,
            Screen::Patches => {
                let mut store = PatchesStore::new();
                store.set_instance(selected.as_ref().map(|i| i.id.clone()));
                ScreenView::Patches(store)
            }
            Screen::Sync => {
                let mut store = SyncStore::new();
                store.set_source(selected.as_ref().map(|i| i.id.clone()));
                ScreenView::Sync(store)
            }
            Screen::Transfer => {
                let mut view = TransferView::default();
                if let Some(instance) = &selected {
                    view.export.project_id = instance.id.clone();
                }
                ScreenView::Transfer(Box::new(view))
            }
            Screen::Settings => ScreenView::Settings(Box::default()),
        };

        self.subscribe_screen();
        self.load_screen();
    }

    fn unmount_screen(&mut self) {
        if let ScreenView::Performance(store) = &self.view {
            if store.monitoring {
                if let Some(id) = store.instance_id.clone() {
                    self.release_monitoring(id);
                }
            }
        }
        let disposed = self.screen_subscriptions.len();
        self.screen_subscriptions.dispose_all();
        debug!(screen = self.screen.title(), mount = %self.mount, disposed, "unmount");
    }

    /// Initial fetches of the mounted screen.
    fn load_screen(&mut self) {
        match self.screen {
            Screen::Instances => self.fetch_instances(),
            Screen::Catalog => self.search_catalog(),
            Screen::Resources => self.fetch_resources(),
            Screen::Patches => self.fetch_patches(),
            Screen::Transfer => self.detect_launchers(),
            Screen::Settings => {
                self.reload_settings();
                self.fetch_translation_langs();
            }
            Screen::Performance | Screen::Downloads | Screen::Recipes | Screen::Sync => {}
        }
    }

    /// Periodic work: expire toasts and fire debounced searches.
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);
        let before = self.ctx.toasts.visible().len();
        self.ctx.toasts.expire(now);
        if self.ctx.toasts.visible().len() != before {
            self.mark_dirty();
        }
        if let ScreenView::Catalog(store) = &mut self.view {
            if let Some((token, query)) = store.poll_input(now) {
                self.spawn_search(token, query);
                self.mark_dirty();
            }
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Instances(msg) => {
                let followup = self.instances.apply(msg);
                if followup.needs_refetch() {
                    self.fetch_instances();
                }
                self.notify_followup(&followup);
            }
            AppMessage::Downloads(msg) => {
                let followup = self.ctx.downloads.apply(msg);
                self.notify_followup(&followup);
            }
            AppMessage::Preferences(msg) => {
                let followup = self.ctx.preferences.apply(msg);
                self.notify_followup(&followup);
            }
            AppMessage::Screen(mount, msg) => {
                if mount != self.mount {
                    debug!(kind = msg.kind(), %mount, current = %self.mount, "dropping result for unmounted screen");
                    return;
                }
                self.apply_screen(msg);
            }
            AppMessage::Completed(mount, msg) => {
                if let Some(toast) = msg.completion_toast() {
                    self.ctx.notify(toast);
                }
                // An accepted mod install shows up in downloads before its first event.
                if let ScreenMsg::Catalog(CatalogMsg::InstallFinished { slug, result: Ok(Some(operation_id)) }) = &msg {
                    self.ctx.downloads.track(operation_id, slug);
                }
                if mount != self.mount {
                    debug!(kind = msg.kind(), %mount, current = %self.mount, "operation finished after its screen was left");
                    return;
                }
                self.apply_screen(msg);
            }
            AppMessage::Connection(state) => {
                if state != self.connection {
                    info!(state = %state.label(), "event channel");
                }
                self.connection = state;
            }
            AppMessage::Notify(toast) => self.ctx.notify(toast),
        }
    }

    fn apply_screen(&mut self, msg: ScreenMsg) {
        let kind = msg.kind();
        let followup = match (&mut self.view, msg) {
            (ScreenView::Catalog(store), ScreenMsg::Catalog(msg)) => store.apply(msg),
            (ScreenView::Resources(store), ScreenMsg::Resources(msg)) => store.apply(msg),
            (ScreenView::Performance(store), ScreenMsg::Performance(msg)) => store.apply(msg),
            (ScreenView::Patches(store), ScreenMsg::Patches(msg)) => store.apply(msg),
            (ScreenView::Sync(store), ScreenMsg::Sync(msg)) => store.apply(msg),
            (ScreenView::Transfer(view), ScreenMsg::Import(msg)) => view.import.apply(msg),
            (ScreenView::Transfer(view), ScreenMsg::Export(msg)) => view.export.apply(msg),
            (ScreenView::Settings(view), ScreenMsg::Settings(msg)) => view.settings.apply(msg),
            (ScreenView::Settings(view), ScreenMsg::Translations(msg)) => view.translations.apply(msg),
            (_, msg) => {
                warn!(kind = msg.kind(), screen = self.screen.title(), "message does not match mounted screen");
                return;
            }
        };
        if followup.needs_refetch() {
            match kind {
                "resources" => self.fetch_resources(),
                "patches" => self.fetch_patches(),
                "translations" => self.fetch_translation_langs(),
                "settings" => self.reload_settings(),
                "import" => self.fetch_instances(),
                _ => {}
            }
        }
        self.notify_followup(&followup);
    }

    fn notify_followup(&mut self, followup: &Followup) {
        if let Some(toast) = followup.toast() {
            self.ctx.notify(toast.clone());
        }
    }
}
