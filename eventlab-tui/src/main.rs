//! EventLab TUI — six-panel event impact dashboard with vim-style navigation.
//!
//! Panels:
//! 1. Filters — asset and event multiselect
//! 2. Summary — per-asset means, colour gradient per column
//! 3. Speed — mean time to peak per asset
//! 4. Paths — synthetic price path overlay around the announcement
//! 5. Detail — every filtered row
//! 6. Help — keyboard shortcuts

mod app;
mod input;
mod persistence;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use eventlab_core::{load_results, DashboardConfig, LoadError};

use crate::app::AppState;

/// Env var naming a log file; without it the TUI does not log.
const LOG_ENV: &str = "EVENTLAB_LOG";

#[derive(Parser)]
#[command(name = "eventlab-tui", about = "Event impact dashboard")]
struct Args {
    /// Results file (.xlsx, .csv, .parquet); overrides the config
    #[arg(long)]
    data: Option<PathBuf>,

    /// Config file (default: ./eventlab.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not read or write saved selections
    #[arg(long)]
    no_persist: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging() {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = match DashboardConfig::discover(args.config.as_deref(), &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load before touching the terminal: a missing or unreadable file halts
    // with instructions on a normal screen.
    let data_file = args.data.clone().unwrap_or_else(|| config.data_file.clone());
    let loaded = match load_results(&data_file, &config.load_options()) {
        Ok(l) => l,
        Err(e) => {
            report_load_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let persist = config.tui.persist && !args.no_persist;
    let state_path = persist.then(persistence::default_state_path);
    let mut app = AppState::new(loaded, config.ranking, state_path.clone());
    if let Some(path) = &state_path {
        match persistence::load(path) {
            Ok(state) => {
                persistence::apply(&mut app, state);
            }
            Err(e) => app.push_error(format!("Saved state ignored: {e:#}")),
        }
    }

    match run(&mut app, Duration::from_millis(config.tui.tick_ms.max(1))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn report_load_error(err: &LoadError) {
    log::error!("{err}");
    eprintln!("error: {err}");
    for line in err.remedy() {
        eprintln!("  {line}");
    }
}

/// Log to the file named by `EVENTLAB_LOG`, if any.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", PathBuf::from(&path).display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(app: &mut AppState, tick: Duration) -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, app, tick);

    // Save state before exit
    if let Some(path) = &app.state_path {
        if let Err(e) = persistence::save(path, &persistence::extract(app)) {
            log::warn!("could not save state to {}: {e:#}", path.display());
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    tick: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
