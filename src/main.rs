//! Conversation TUI - start conversations in an Open Collective from the terminal
//!
//! A Ratatui-based form that validates a new conversation locally and creates
//! it through the conversations service.
//!
//! Usage: `conversation-tui [COLLECTIVE_ID]`. Without an argument the collective
//! comes from `CONVERSATIONS_COLLECTIVE_ID` or the config file.

mod api;
mod app;
mod config;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use api::ConversationClient;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conversation_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = TuiConfig::load_with_env()?;
    let collective_id = match std::env::args().nth(1) {
        Some(id) => {
            // Remember the collective for the next run
            if config.collective_id.as_deref() != Some(id.as_str()) {
                config.collective_id = Some(id.clone());
                if let Err(err) = config.save() {
                    tracing::warn!("Failed to save config: {err:#}");
                }
            }
            id
        }
        None => config.collective_id.clone().ok_or_else(|| {
            anyhow!("No collective given. Usage: conversation-tui <COLLECTIVE_ID>")
        })?,
    };

    let client = ConversationClient::new(config.api_address(), config.request_timeout())?;
    tracing::info!(
        "Using conversations service at {} for collective {collective_id}",
        client.address()
    );

    let mut app = App::new(
        Arc::new(client),
        &collective_id,
        config.suggested_tags().to_vec(),
    );
    app.load_collective();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Pick up collective lookups and mutation results
        app.poll_background();

        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll in a blocking task so spawned requests keep running
        let next = tokio::task::spawn_blocking(|| -> io::Result<Option<Event>> {
            if event::poll(Duration::from_millis(100))? {
                Ok(Some(event::read()?))
            } else {
                Ok(None)
            }
        })
        .await??;

        if let Some(Event::Key(key)) = next {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            // Global quit: Ctrl+C
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }
            app.handle_key(key)?;
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
