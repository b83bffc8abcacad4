//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! let gateway = scripted_gateway();
//! let (mut app, mut rx) = test_app(gateway.clone());
//! app.start();
//! drain(&mut app, &mut rx).await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use packdeck::adapters::MockGateway;
use packdeck::app::{App, AppContext, AppMessage};
use packdeck::config::DeckConfig;
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

/// Quiet period after which [`drain`] assumes no more messages are coming.
const DRAIN_QUIET: Duration = Duration::from_millis(100);

/// Short debounce and small pages keep the catalog tests quick.
pub fn test_config() -> DeckConfig {
    DeckConfig::default()
        .with_search_debounce_ms(20)
        .with_page_size(2)
}

/// An app over `gateway`, with the message receiver handed to the test.
pub fn test_app(gateway: MockGateway) -> (App, UnboundedReceiver<AppMessage>) {
    let ctx = AppContext::with_gateway(test_config(), Arc::new(gateway));
    let mut app = App::new(ctx);
    let rx = app.message_rx.take().expect("fresh app has a receiver");
    (app, rx)
}

/// Feed every message that arrives until the channel goes quiet.
pub async fn drain(app: &mut App, rx: &mut UnboundedReceiver<AppMessage>) -> usize {
    let mut count = 0;
    while let Ok(Some(msg)) = tokio::time::timeout(DRAIN_QUIET, rx.recv()).await {
        app.handle_message(msg);
        count += 1;
    }
    count
}

/// Render one frame, which also registers the hit areas.
pub fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test backend");
    terminal
        .draw(|f| packdeck::ui::render(f, app))
        .expect("draw");
    terminal.backend().buffer().clone()
}

pub fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
