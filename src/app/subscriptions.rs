//! Event subscriptions.
//!
//! Global stores subscribe once at start. Screen stores subscribe on mount
//! and their subscriptions are disposed on unmount; a payload published
//! after that reaches nobody.

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use super::{App, AppMessage, Screen, ScreenMsg};
use crate::events::payloads::{
    DOWNLOAD_PROGRESS, EXPORT_PROGRESS, IMPORT_PROGRESS, INSTANCE_STATUS, OPERATION_EVENT,
    PERFORMANCE_EVENT,
};
use crate::events::{
    DownloadProgress, EventHub, ExportProgress, ImportProgress, InstanceStatusEvent,
    OperationEvent, PerformanceEvent, Subscription,
};
use crate::state::{DownloadsMsg, ExportMsg, ImportMsg, InstancesMsg, PerformanceMsg};

/// Forward decoded payloads of `channel` into the message loop.
fn forward<T, F>(hub: &EventHub, tx: &UnboundedSender<AppMessage>, channel: &'static str, wrap: F) -> Subscription
where
    T: serde::de::DeserializeOwned,
    F: Fn(T) -> AppMessage + Send + Sync + 'static,
{
    let tx = tx.clone();
    hub.subscribe_typed(channel, move |payload: T| {
        trace!(channel, "event");
        let _ = tx.send(wrap(payload));
    })
}

impl App {
    pub(super) fn subscribe_global(&mut self) {
        let hub = self.ctx.hub.clone();
        let tx = &self.message_tx;
        let subs = [
            forward(&hub, tx, OPERATION_EVENT, |e: OperationEvent| {
                AppMessage::Downloads(DownloadsMsg::Operation(e))
            }),
            forward(&hub, tx, DOWNLOAD_PROGRESS, |p: DownloadProgress| {
                AppMessage::Downloads(DownloadsMsg::Download(p))
            }),
            forward(&hub, tx, INSTANCE_STATUS, |e: InstanceStatusEvent| {
                AppMessage::Instances(InstancesMsg::Status(e))
            }),
        ];
        for sub in subs {
            self.global_subscriptions.push(sub);
        }
    }

    pub(super) fn subscribe_screen(&mut self) {
        let hub = self.ctx.hub.clone();
        let tx = &self.message_tx;
        let mount = self.mount;
        let subs = match self.screen {
            Screen::Performance => vec![forward(&hub, tx, PERFORMANCE_EVENT, move |e: PerformanceEvent| {
                AppMessage::Screen(mount, ScreenMsg::Performance(PerformanceMsg::Event(e)))
            })],
            Screen::Transfer => vec![
                forward(&hub, tx, IMPORT_PROGRESS, move |p: ImportProgress| {
                    AppMessage::Screen(mount, ScreenMsg::Import(ImportMsg::Progress(p)))
                }),
                forward(&hub, tx, EXPORT_PROGRESS, move |p: ExportProgress| {
                    AppMessage::Screen(mount, ScreenMsg::Export(ExportMsg::Progress(p)))
                }),
            ],
            _ => Vec::new(),
        };
        for sub in subs {
            self.screen_subscriptions.push(sub);
        }
    }
}
