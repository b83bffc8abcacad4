//! Process-wide state, owned by the shell and passed down explicitly.

use std::sync::Arc;
use std::time::Instant;

use crate::adapters::{ArboardClipboard, HttpGateway, InMemoryClipboard, ReqwestHttpClient};
use crate::api::BackendApi;
use crate::config::DeckConfig;
use crate::events::EventHub;
use crate::state::{DownloadsStore, PreferencesStore, Toast, ToastStore};
use crate::traits::{ClipboardProvider, CommandGateway};

pub struct AppContext {
    pub config: DeckConfig,
    pub api: BackendApi,
    pub hub: EventHub,
    pub downloads: DownloadsStore,
    pub preferences: PreferencesStore,
    pub toasts: ToastStore,
    pub clipboard: Box<dyn ClipboardProvider>,
}

impl AppContext {
    pub fn new(
        config: DeckConfig,
        gateway: Arc<dyn CommandGateway>,
        hub: EventHub,
        clipboard: Box<dyn ClipboardProvider>,
    ) -> Self {
        let toasts = ToastStore::new(config.toast_ttl());
        Self {
            api: BackendApi::new(gateway),
            hub,
            downloads: DownloadsStore::new(),
            preferences: PreferencesStore::new(),
            toasts,
            clipboard,
            config,
        }
    }

    /// Production wiring: HTTP gateway and the system clipboard.
    pub fn connect(config: DeckConfig, hub: EventHub) -> Self {
        let gateway = HttpGateway::new(ReqwestHttpClient::new(), config.backend_url.clone());
        Self::new(config, Arc::new(gateway), hub, Box::new(ArboardClipboard::new()))
    }

    /// Wiring for tests: any gateway, an in-memory clipboard.
    pub fn with_gateway(config: DeckConfig, gateway: Arc<dyn CommandGateway>) -> Self {
        Self::new(config, gateway, EventHub::new(), Box::new(InMemoryClipboard::new()))
    }

    pub fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast, Instant::now());
    }
}
