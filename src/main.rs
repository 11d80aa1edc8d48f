use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use pychain::app::App;
use pychain::config::{self, Overrides};
use pychain::core::Route;
use pychain::infrastructure::{HttpLedger, RuntimeBridge, RuntimeCommand};
use pychain::ui;

#[derive(Debug, Parser)]
#[command(
    name = "pychain",
    version,
    about = "Pychain: browse the chain, send coins and mine from the terminal"
)]
struct Args {
    /// Ledger backend base URL (e.g. http://localhost:5000)
    #[arg(long)]
    api_url: Option<String>,

    /// Timestamp units per millisecond (1000000 for nanosecond timestamps)
    #[arg(long)]
    time_unit: Option<i64>,

    /// Location to open at start (/, /blockchain, /conduct-transaction, /transaction-pool)
    #[arg(long, default_value = "/")]
    route: String,

    /// Write logs here instead of the default data directory
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(path: Option<PathBuf>) -> Result<()> {
    // The terminal belongs to the UI, so logs only go to a file
    let Some(path) = path else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.clone().or_else(config::log_path))?;

    let config = config::load()?.with_overrides(Overrides {
        api_url: args.api_url,
        time_unit: args.time_unit,
    })?;
    let route = Route::from_location(&args.route)
        .ok_or_else(|| anyhow!("unknown route {:?}", args.route))?;
    info!(api_url = config.base_url(), time_unit = config.time_unit, "starting");

    let ledger = HttpLedger::new(&config)?;
    let runtime = RuntimeBridge::new(Arc::new(ledger))?;
    let app = App::new(Arc::new(config), route);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime)?;
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            info!("quit");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Hand results to the app and queued commands to the worker
fn pump_background(app: &mut App, runtime: &RuntimeBridge) -> Result<()> {
    for event in runtime.poll_events() {
        app.apply_event(event);
    }
    for command in app.take_commands() {
        runtime.send(command)?;
    }
    Ok(())
}
