use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

use procdash::app::App;
use procdash::config::{self, load_config, load_config_from_path};
use procdash::event::{Event, EventHandler};
use procdash::ui;

#[derive(Parser)]
#[command(name = "procdash", about = "Terminal dashboard for a remote process-stats server")]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stats server base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    base_url: Option<String>,

    /// Refresh rate in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Theme: dark, light
    #[arg(long)]
    theme: Option<String>,

    /// Write tracing output to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(ref path) = cli.log_file {
        init_tracing(path)?;
    }
    let config = load_config_for_cli(&cli);

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let tick_rate = Duration::from_millis(config.general.refresh_rate_ms);
    let mut events = EventHandler::new(tick_rate);
    let mut app = App::new(config, events.sender());

    // First fetch happens immediately, before the first tick.
    app.begin_fetch();
    terminal.draw(|frame| ui::draw(frame, &mut app))?;

    while app.running {
        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Press {
                        let action = app.map_key(key);
                        app.dispatch(action);
                    }
                }
                Event::Tick => app.on_tick(),
                Event::Resize => {}
                Event::Stats { seq, result } => app.apply_stats(seq, result),
                Event::Kill { pid, result } => app.apply_kill(pid, result),
            }
            terminal.draw(|frame| ui::draw(frame, &mut app))?;
        }
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref url) = cli.base_url {
        config.server.base_url = url.clone();
    }
    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }

    config
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}
