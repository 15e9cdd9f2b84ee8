//! appfetch - main entry point
//!
//! Dispatches between the TUI (default), headless `install`, and `list`.

use std::io::stdout;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use appfetch::app::App;
use appfetch::catalog::{Catalog, InstallAction};
use appfetch::cli::{Cli, Commands};
use appfetch::engine::{DispatchEngine, LogEvent, default_downloads_dir};
use appfetch::error::{AppError, Result};
use appfetch::platform::Platform;
use appfetch::runner::SystemCommandRunner;
use appfetch::transfer::HttpTransfer;

/// Initialize the tracing subscriber.
///
/// Quiet by default so the TUI stays clean; RUST_LOG overrides.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point.
fn main() -> Result<()> {
    // Parse CLI arguments first so --help works without a subscriber.
    let cli = Cli::parse_args();
    init_tracing();
    debug!("CLI arguments parsed");

    let platform = cli.platform.or_else(Platform::detect).ok_or_else(|| {
        AppError::general("unsupported host platform; pass --platform windows|linux|mac")
    })?;
    let downloads_dir = cli.downloads_dir.unwrap_or_else(default_downloads_dir);
    let catalog = Catalog::builtin();

    match cli.command {
        Some(Commands::List) => {
            run_list(&catalog, platform);
            Ok(())
        }
        Some(Commands::Install { apps, report_json }) => {
            run_headless(catalog, platform, downloads_dir, apps, report_json)
        }
        None => run_tui(catalog, platform, downloads_dir),
    }
}

/// Print the catalog with per-platform availability.
fn run_list(catalog: &Catalog, platform: Platform) {
    println!("Catalog ({} applications), platform: {}", catalog.len(), platform.label());
    println!();
    for entry in catalog.entries() {
        let method = match entry.action_for(platform) {
            Some(InstallAction::DirectDownload { url }) => {
                format!("download from {}", url.host_str().unwrap_or("<unknown host>"))
            }
            Some(InstallAction::PackageManagerRef { manager, package }) => {
                format!("{manager}: {package}")
            }
            None => "not supported".to_string(),
        };
        println!("  {:<24} {method}", entry.name);
    }
}

/// Run the engine without the TUI, printing the log stream to stdout.
fn run_headless(
    catalog: Catalog,
    platform: Platform,
    downloads_dir: std::path::PathBuf,
    apps: Vec<String>,
    report_json: Option<std::path::PathBuf>,
) -> Result<()> {
    info!(count = apps.len(), %platform, "running headless install");

    let engine = DispatchEngine::new(
        catalog,
        HttpTransfer::new(),
        SystemCommandRunner::new(platform),
        downloads_dir,
    );
    let (worker, events) = engine.spawn_run(apps, platform)?;

    for event in events {
        match event {
            LogEvent::Message(line) => println!("{line}"),
            LogEvent::Completed(_) => {}
        }
    }

    let report = worker
        .join()
        .map_err(|_| AppError::general("installation worker panicked"))?;

    if let Some(path) = report_json {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Run the TUI front end.
fn run_tui(
    catalog: Catalog,
    platform: Platform,
    downloads_dir: std::path::PathBuf,
) -> Result<()> {
    debug!("initializing terminal for TUI mode");

    enable_raw_mode().map_err(|e| AppError::terminal(format!("failed to enable raw mode: {e}")))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| AppError::terminal(format!("failed to enter alternate screen: {e}")))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("failed to create terminal: {e}")))?;

    let mut app = App::new(catalog, platform, downloads_dir);
    let result = app.run(&mut terminal);

    // Always attempt cleanup, even if the app failed.
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}
