// crates/tradeboard-client/src/main.rs

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::{io, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tradeboard_client::config::ClientConfig;
use tradeboard_client::network::{DataSource, DataWorker};
use tradeboard_client::{ui, App, Theme};
use tradeboard_core::{Action, Dashboard, Effect};

const DEFAULT_LOG_FILE: &str = "tradeboard.log";

#[derive(Parser)]
#[clap(name = "tradeboard")]
#[clap(about = "Terminal dashboard for stock trade records")]
struct Cli {
    /// Base URL of the trade API (e.g. http://localhost:8000/api)
    #[clap(short, long, conflicts_with = "dataset")]
    api_url: Option<String>,

    /// Read-only JSON or CSV dataset
    #[clap(short, long)]
    dataset: Option<PathBuf>,

    /// TOML config file (defaults to $TRADEBOARD_CONFIG)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

impl Cli {
    /// Flags override everything loaded from file and environment.
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.api_url {
            config.api_url = Some(url.clone());
        }
        if let Some(path) = &self.dataset {
            config.dataset = Some(path.clone());
            config.api_url = None;
        }
        config
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    // stdout belongs to the TUI, so logs only ever go to a file.
    let path = match (&cli.log_file, cli.debug) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(DEFAULT_LOG_FILE),
        (None, false) => return Ok(()),
    };
    let file = File::create(&path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let default_level = if cli.debug { "tradeboard=debug" } else { "tradeboard=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    init_logging(&cli)?;

    let config = cli.apply(ClientConfig::load(cli.config.as_deref())?);
    let source = config.data_source()?;
    info!(source = %source.describe(), editable = source.is_editable(), "Starting tradeboard");

    let dashboard = Dashboard::new(source.is_editable()).with_group_order(config.group_order);
    let app = App::new(dashboard, source.describe(), Theme::from(config.theme))
        .with_export_dir(config.export_dir.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let res = run_app(&mut terminal, app, source).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    source: DataSource,
) -> Result<()> {
    // Channels between the UI loop and the data worker
    let (effect_tx, effect_rx) = mpsc::unbounded_channel::<Effect>();
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    app.set_effect_sender(effect_tx);

    // Spawn data worker
    let worker = DataWorker::new(source, action_tx);
    let worker_handle = tokio::spawn(worker.run(effect_rx));

    // Initial fetch
    app.dispatch(Action::Refresh);

    loop {
        // Draw UI
        terminal.draw(|f| ui::draw(f, &app))?;

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Apply completions from the worker, one at a time
        while let Ok(action) = action_rx.try_recv() {
            app.dispatch(action);
        }

        if app.should_quit {
            break;
        }
    }

    // Cleanup
    worker_handle.abort();
    info!("Shutting down");
    Ok(())
}
