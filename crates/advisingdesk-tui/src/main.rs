//! Advising Desk - a terminal viewer for the student advising backend.
//!
//! Lists students, advisors and degree progress from the advising REST API,
//! with search, a standing filter and a per-student detail view.

mod app;
mod config;
mod ui;
mod utils;

#[cfg(test)]
mod testing;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use advisingdesk_core::models::ConnectionStatus;
use advisingdesk_core::{AdvisingApi, ApiClient};

use app::{App, AppState, Tab};
use config::Config;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Prefix of the daily log files in the cache directory
const LOG_FILE_PREFIX: &str = "advisingdesk.log";

const USAGE: &str = "\
Usage: advisingdesk [OPTIONS]

Options:
  --check            Check the backend connection and print its health report
  --dump <ENDPOINT>  Print the raw JSON of an endpoint (e.g. students, /api/advisors)
  -h, --help         Show this help

Environment:
  ADVISINGDESK_API_URL  Backend base URL (default http://localhost:5000)
  RUST_LOG              Log filter (default warn)";

/// What the binary was asked to do.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run,
    Check,
    Dump(String),
    Help,
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::Run),
        [flag] if flag == "--check" => Ok(Command::Check),
        [flag] if flag == "-h" || flag == "--help" => Ok(Command::Help),
        [flag] if flag == "--dump" => bail!("--dump requires an endpoint, e.g. --dump students"),
        [flag, endpoint] if flag == "--dump" => Ok(Command::Dump(normalize_endpoint(endpoint))),
        _ => bail!("Unrecognized arguments: {}\n\n{}", args.join(" "), USAGE),
    }
}

/// `students` and `/api/students` both name the same endpoint.
fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_start_matches('/');
    if trimmed.starts_with("api/") {
        format!("/{}", trimmed)
    } else {
        format!("/api/{}", trimmed)
    }
}

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr for the one-shot commands.
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

/// Log to a daily file while the TUI owns the terminal.
fn init_file_tracing(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.cache_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;
    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load()?;
    let client = ApiClient::new(&config.api_base_url, config.request_timeout())
        .with_context(|| format!("Invalid backend URL {}", config.api_base_url))?;

    match command {
        Command::Check => {
            init_cli_tracing();
            check_connection(&client).await
        }
        Command::Dump(endpoint) => {
            init_cli_tracing();
            dump_endpoint(&client, &endpoint).await
        }
        Command::Run | Command::Help => run_tui(config, client).await,
    }
}

/// Print the health report, and the database info when connected.
async fn check_connection(client: &ApiClient) -> Result<()> {
    eprintln!("Checking {}...", client.base_url());

    let report = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    let status = ConnectionStatus::from_report(&report);
    if !status.is_connected() {
        bail!("{}", status.label());
    }
    eprintln!("{}", status.label());

    match client.info().await {
        Ok(info) => println!("{}", serde_json::to_string_pretty(&info)?),
        Err(e) => warn!(error = %e, "Error loading database info"),
    }
    Ok(())
}

/// Print an endpoint's raw JSON to stdout.
async fn dump_endpoint(client: &ApiClient, endpoint: &str) -> Result<()> {
    eprintln!("Fetching {}...", endpoint);
    let value = client
        .raw(endpoint)
        .await
        .with_context(|| format!("Failed to fetch {}", endpoint))?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn run_tui(config: Config, client: ApiClient) -> Result<()> {
    let _log_guard = init_file_tracing(&config)?;
    info!(base_url = client.base_url(), "Advising Desk starting");

    let initial_tab = config
        .last_tab
        .as_deref()
        .and_then(Tab::from_key)
        .unwrap_or(Tab::Students);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Arc::new(client), initial_tab);
    app.start_bootstrap();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = Config::remember_tab(app.current_tab.key()) {
        warn!(error = %e, "Failed to save config");
    }

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Advising Desk shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases as well
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key).await? {
                    return Ok(());
                }
            }
        }

        // Apply completed background loads
        app.check_background_tasks().await;

        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
