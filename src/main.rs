// src/main.rs

use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    ExecutableCommand,
    event::{self, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{Stdout, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use vanguard_glass::app::{App, ServiceStatus};
use vanguard_glass::config::Settings;
use vanguard_glass::core::client::ScanClient;
use vanguard_glass::core::lifecycle::{ScanCompletion, ScanController};
use vanguard_glass::{logging, ui};

const TICK_RATE: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let log_path = logging::initialize_logging()?;

    let settings = Settings::from_env().wrap_err("invalid configuration")?;
    info!(api_url = %settings.api_url, log = %log_path.display(), "Starting up.");

    let client = ScanClient::new(&settings.api_url).wrap_err("could not create the scan client")?;
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<ScanCompletion>();
    let controller = ScanController::new(Arc::new(client.clone()), completion_tx);
    let mut app = App::new(controller, settings.min_scanning_display);

    let (health_tx, mut health_rx) = oneshot::channel();
    tokio::spawn(async move {
        let status = match client.health().await {
            Ok(health) => ServiceStatus::Online(health),
            Err(e) => {
                warn!(error = %e, "Scanning service health probe failed.");
                ServiceStatus::Unreachable
            }
        };
        let _ = health_tx.send(status);
    });

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, &mut completion_rx, &mut health_rx).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    info!("Shut down.");
    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    completions: &mut mpsc::UnboundedReceiver<ScanCompletion>,
    health: &mut oneshot::Receiver<ServiceStatus>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key);
            }
        }

        while let Ok(completion) = completions.try_recv() {
            app.on_scan_completion(completion);
        }
        if let Ok(status) = health.try_recv() {
            app.set_service_status(status);
        }
        app.on_tick();
    }
    Ok(())
}
