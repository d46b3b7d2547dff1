//! docdir — interactive listing page (Ratatui TUI)
//!
//! Search box with a debounced suggestion dropdown, a filter panel bound to
//! the query parameters, and the matching doctor cards. Logs go to a file so
//! they do not corrupt the terminal.
//!
//! Usage:
//!   cargo run -p docdir-tui -- --offline
//!   cargo run -p docdir-tui -- --query '?symptom=tooth&sort=fees'

mod app;
mod ui;

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use docdir_contracts::{config::DirectoryConfig, error::DirectoryResult, query::QueryParams};
use docdir_core::Listing;
use docdir_mapping::TomlSymptomMapping;
use docdir_remote::Sources;

use crate::app::{App, Control};

/// Poll interval of the draw loop; also bounds how late suggestions appear.
const TICK_MS: u64 = 50;

#[derive(Parser)]
#[command(name = "docdir-tui", about = "Interactive doctor directory")]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML symptom → specialty table (overrides the config's mapping_path).
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Use the built-in fixture doctors and symptoms instead of the network.
    #[arg(long)]
    offline: bool,

    /// Restore a shared state, e.g. '?specialty=Dentist&sort=fees'.
    #[arg(long)]
    query: Option<String>,

    /// Where to write logs. RUST_LOG controls the level.
    #[arg(long, default_value = "docdir-tui.log")]
    log_file: PathBuf,
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> io::Result<()> {
    let log_file = Arc::new(File::create(path)?);
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_ansi(false)
        .with_target(false)
        .with_writer(log_file)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn build_listing(cli: &Cli, cfg: &DirectoryConfig) -> DirectoryResult<Listing> {
    let mapping_path = cli.mapping.clone().or_else(|| cfg.mapping_path.clone());
    let mapping = TomlSymptomMapping::load(mapping_path.as_deref())?;
    let params = cli.query.as_deref().map(QueryParams::parse).unwrap_or_default();
    Ok(Listing::new(Arc::new(mapping)).with_params(params))
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    // Configuration problems are reported before the terminal is taken over.
    let setup = DirectoryConfig::load(cli.config.as_deref()).and_then(|cfg| {
        let listing = build_listing(&cli, &cfg)?;
        let sources = Sources::from_config(&cfg, cli.offline)?;
        Ok((cfg, listing, sources))
    });
    let (cfg, listing, sources) = match setup {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("docdir-tui error: {}", e);
            std::process::exit(1);
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(listing, &sources, &cfg, runtime.handle().clone());
    info!(offline = cli.offline, params = %app.listing.params(), "listing page started");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    loop {
        app.poll();
        terminal.draw(|f| ui::ui(f, &app))?;

        if event::poll(Duration::from_millis(TICK_MS))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) == Control::Quit {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    info!(params = %app.listing.params(), "listing page closed");
    Ok(())
}
