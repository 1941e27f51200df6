//! tally-tui: keyboard-driven terminal UI for categorizing transactions.
//!
//! Responsibilities:
//! - Parse arguments, initialize file logging and load settings.
//! - Enter the terminal, run the event loop and restore the terminal.
//!
//! Does NOT handle:
//! - Key resolution or state changes (see `tally_tui::app`).
//! - Executing invocations (see `tally_tui::runtime`).
//!
//! Invariants:
//! - `load_dotenv()` runs before settings are read.
//! - Logs go to a daily rolling file; the terminal is never written to by tracing.
//! - Each loop iteration draws once, then handles exactly one event.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::EventStream;
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::channel;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing_appender::non_blocking;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tally_config::ConfigLoader;
use tally_config::constants::DEFAULT_CHANNEL_CAPACITY;
use tally_tui::cli::Cli;
use tally_tui::runtime::{Collaborator, DemoCollaborator, tasks, terminal::TerminalGuard};
use tally_tui::{App, Event, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.log_dir)
        .with_context(|| format!("failed to create log directory {}", cli.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(&cli.log_dir, "tally-tui.log");
    // The guard must live for all of main() so buffered logs are flushed.
    let (writer, _guard) = non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    let settings = ConfigLoader::new()
        .load_dotenv()
        .context("failed to load .env")?
        .with_config_path(cli.config_path.clone())
        .load()
        .context("failed to load settings")?;
    tracing::info!(tick_ms = settings.tick_ms, match_mode = ?settings.picker_match_mode, "Settings loaded");

    let mut app = App::new(&settings).context("failed to build key and command tables")?;
    let collaborator: Arc<dyn Collaborator> = Arc::new(
        DemoCollaborator::new(Duration::from_millis(cli.latency_ms))
            .context("embedded demo data is invalid")?,
    );

    let tracker = TaskTracker::new();
    let shutdown = CancellationToken::new();
    let (tx, mut rx) = channel::<Event>(DEFAULT_CHANNEL_CAPACITY);

    let mut stdout = std::io::stdout();
    let terminal_guard = TerminalGuard::enter(&mut stdout).context("failed to set up terminal")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let size = terminal.size()?;
    app.handle_event(Event::Resize(size.width, size.height));

    let tx_input = tx.clone();
    let input_shutdown = shutdown.clone();
    tracker.spawn(async move {
        let mut reader = EventStream::new();
        loop {
            let next = tokio::select! {
                _ = input_shutdown.cancelled() => break,
                next = reader.next() => next,
            };
            match next {
                Some(Ok(event)) => {
                    let Some(event) = Event::from_terminal(event) else {
                        continue;
                    };
                    if tx_input.send(event).await.is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Terminal input failed");
                    break;
                }
                None => break,
            }
        }
    });

    tasks::dispatch(app.startup_requests(), &collaborator, &tx, &tracker);

    let mut tick = tokio::time::interval(Duration::from_millis(settings.tick_ms));
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        let event = tokio::select! {
            Some(event) = rx.recv() => event,
            _ = tick.tick() => Event::Tick,
        };
        let requests = app.handle_event(event);
        tasks::dispatch(requests, &collaborator, &tx, &tracker);

        if app.should_quit() {
            tracing::info!("Quit requested");
            break;
        }
    }

    shutdown.cancel();
    tracker.close();
    // In-flight requests may still post completions; keep draining so they never block.
    while !tracker.is_empty() {
        tokio::select! {
            _ = tracker.wait() => break,
            _ = rx.recv() => {}
        }
    }

    drop(terminal_guard);
    terminal.show_cursor()?;
    Ok(())
}
