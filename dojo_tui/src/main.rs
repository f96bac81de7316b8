//! dojo_tui - Terminal front end for DuskDojo

mod app;
mod ui;

use app::App;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dojo_core::config::load_skill_catalog;
use dojo_core::{ConfigError, DojoConfig, Route};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

const TICK_RATE: Duration = Duration::from_millis(30);

#[derive(Parser, Debug)]
#[command(name = "dojo_tui", version, about = "Train a warrior in the dusk dojo")]
struct Args {
    /// Game constants (TOML); built-in values are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word list for the typing dojo, one word per line
    #[arg(long)]
    words: Option<PathBuf>,

    /// Skill tree catalog (TOML); the built-in catalog is used when omitted
    #[arg(long)]
    skills: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Log destination; the terminal itself is taken by the UI
    #[arg(long, default_value = "dojo_tui.log")]
    log_file: PathBuf,
}

#[derive(Error, Debug)]
enum LaunchError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

fn main() -> Result<(), LaunchError> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dojo_core=info,dojo_tui=info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let mut config = match &args.config {
        Some(path) => DojoConfig::load(path)?,
        None => DojoConfig::default(),
    };
    if let Some(words) = args.words {
        config.typing.words_path = Some(words);
    }

    config.validate()?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting dojo");

    let mut app = App::new(config, rng);
    if let Some(path) = &args.skills {
        app.skills = load_skill_catalog(path)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("terminal loop failed: {}", e);
    }
    result.map_err(LaunchError::from)
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        app.should_quit = true;
                    } else if app.is_typing() {
                        match key.code {
                            KeyCode::Char(c) => app.on_char(c),
                            KeyCode::Backspace => app.on_backspace(),
                            KeyCode::Enter => app.on_enter(),
                            KeyCode::Esc => app.on_escape(),
                            _ => {}
                        }
                    } else {
                        match key.code {
                            KeyCode::Char('q') => app.should_quit = true,
                            KeyCode::Char('?') => app.toggle_help(),
                            KeyCode::Up | KeyCode::Char('k') => app.on_up(),
                            KeyCode::Down | KeyCode::Char('j') => app.on_down(),
                            KeyCode::Left | KeyCode::Char('h') => app.on_left(),
                            KeyCode::Right | KeyCode::Char('l') => app.on_right(),
                            KeyCode::Char('+') | KeyCode::PageUp => app.on_plus(),
                            KeyCode::Char('-') | KeyCode::PageDown => app.on_minus(),
                            KeyCode::Enter => app.on_enter(),
                            KeyCode::Char(' ') => app.on_space(),
                            KeyCode::Esc => app.on_escape(),
                            KeyCode::Char('t') => app.go(Route::Training),
                            KeyCode::Char('s') => app.go(Route::Skills),
                            KeyCode::Char('p') => app.go(Route::Dashboard),
                            KeyCode::Char(c) => {
                                if let Some(digit) = c.to_digit(10) {
                                    app.on_digit(digit);
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => {
                    app.on_pointer(mouse.column, mouse.row);
                }
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= TICK_RATE {
            app.tick(elapsed);
            last_tick = Instant::now();
        }
    }

    Ok(())
}
