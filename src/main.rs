use packdeck::app::{App, AppContext, AppMessage};
use packdeck::cli::{parse_args, run_cli_command, CliCommand, TuiOptions};
use packdeck::config::DeckConfig;
use packdeck::events::{EventHub, EventTransport};
use packdeck::logging;
use packdeck::terminal::{setup_panic_hook, DeckTerminal, TerminalManager};
use packdeck::ui;

use std::time::Instant;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{info, warn};

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        CliCommand::RunTui(options) => options,
        command => {
            let code = run_cli_command(&command).unwrap_or(0);
            std::process::exit(code);
        }
    };

    color_eyre::install()?;
    let config = load_config(&options)?;

    if let Some(dir) = DeckConfig::data_dir() {
        if let Err(e) = logging::init(&dir, config.dev_mode) {
            eprintln!("Warning: logging disabled: {}", e);
        }
    }

    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

/// Defaults, then the config file, then the environment, then flags.
fn load_config(options: &TuiOptions) -> Result<DeckConfig> {
    let path = options.config.clone().or_else(DeckConfig::default_path);
    let base = match &path {
        Some(path) => DeckConfig::load(path)?,
        None => DeckConfig::default(),
    };
    let mut config = base.from_env();
    if let Some(backend) = &options.backend {
        config.backend_url = backend.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn run(config: DeckConfig) -> Result<()> {
    let hub = EventHub::new();
    let transport = EventTransport::spawn(config.transport(), hub.clone());

    let mut app = App::new(AppContext::connect(config, hub));
    forward_connection_state(&transport, app.message_tx.clone());

    let mut manager = TerminalManager::new()?;
    let size = manager.terminal().size()?;
    app.handle_resize(size.width, size.height);
    app.start();

    let result = run_app(manager.terminal(), &mut app).await;

    transport.shutdown();
    manager.restore();
    info!("packdeck stopped");
    result
}

/// Mirror the transport's connection state into the message loop.
fn forward_connection_state(transport: &EventTransport, tx: mpsc::UnboundedSender<AppMessage>) {
    let mut rx = transport.state_receiver();
    tokio::spawn(async move {
        let _ = tx.send(AppMessage::Connection(rx.borrow().clone()));
        while rx.changed().await.is_ok() {
            let state = rx.borrow().clone();
            if tx.send(AppMessage::Connection(state)).is_err() {
                break;
            }
        }
    });
}

async fn run_app(terminal: &mut DeckTerminal, app: &mut App) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut ticker = tokio::time::interval(app.ctx.config.tick_rate());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // Owned here so select! can borrow it alongside `app`.
    let Some(mut message_rx) = app.message_rx.take() else {
        warn!("message receiver already taken");
        return Ok(());
    };

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = ticker.tick() => {
                app.tick(Instant::now());
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse, Instant::now()),
                    Some(Ok(Event::Resize(width, height))) => app.handle_resize(width, height),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(error = %e, "terminal event stream failed");
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            Some(msg) = message_rx.recv() => {
                app.handle_message(msg);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
