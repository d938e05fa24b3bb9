//! trinav - A keyboard-driven browser for Trino catalogs in the terminal
//!
//! This is the main entry point for the trinav application.
//! The actual logic is in the library modules for better testability.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::ExecutableCommand;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trinav::api::HttpClient;
use trinav::app::{Action, App, AppEvent};
use trinav::config::environment::ENV_VAR;
use trinav::config::{Environment, config_dir, load_settings};
use trinav::loader::Loader;
use trinav::ui::render::render;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TRINAV_LOG";

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Browse Trino catalogs, schemas and tables from the terminal
#[derive(Parser, Debug)]
#[command(name = "trinav", version, about)]
struct Args {
    /// Explorer API base URL; overrides the environment's URL
    #[arg(long)]
    url: Option<String>,

    /// API environment (falls back to TRINAV_ENV, then the config default)
    #[arg(long, value_enum)]
    env: Option<Environment>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log file (default ~/.trinav/trinav.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file (default ~/.trinav/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref()).context("loading settings")?;
    let env_var = std::env::var(ENV_VAR).ok();
    let environment =
        Environment::resolve(args.env, env_var.as_deref(), settings.default_environment)?;
    let base_url = settings.base_url(environment, args.url.as_deref())?;
    let timeout = Duration::from_secs(args.timeout.unwrap_or(settings.request_timeout_secs));

    let log_file = match args.log_file {
        Some(path) => path,
        None => config_dir()?.join("trinav.log"),
    };
    init_logging(&log_file)?;
    info!(%environment, %base_url, ?timeout, "starting trinav");

    if !io::stdout().is_terminal() {
        eprintln!("trinav requires a real terminal.");
        return Ok(());
    }

    let client = HttpClient::new(base_url.clone(), timeout)?;
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let loader = Loader::new(Arc::new(client), events_tx);
    let app = App::new(base_url, settings.stale_responses);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, app, &loader, events_rx).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "info".into()))
        .init();
    Ok(())
}

/// Enter raw mode and the alternate screen
fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Leave the alternate screen and give the shell its cursor back
fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Restore the terminal before the default hook prints a panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        default_hook(info);
    }));
}

/// Drive the main event loop.
///
/// Draws from `App` state, then waits for either terminal input or a
/// finished background load, and hands the resulting action to the loader.
async fn run_app(
    terminal: &mut Tui,
    mut app: App,
    loader: &Loader,
    mut loads: UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut input = EventStream::new();
    for action in app.startup() {
        loader.run(action);
    }

    while app.running {
        terminal.draw(|frame| render(frame, &app))?;

        let event = tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Some(Ok(Event::Resize(_, _))) => AppEvent::Resize,
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = loads.recv() => event,
        };

        match app.handle_event(event)? {
            Action::Quit => app.running = false,
            action => {
                loader.run(action);
            }
        }
    }

    info!("exiting");
    Ok(())
}
