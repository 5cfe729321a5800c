use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use env_logger::{Env, Target};
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use asteroids::app::App;
use asteroids::config::Config;
use asteroids::event::EventHandler;
use asteroids::ui;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Open the log file, falling back to the temp dir and then to discarding
/// output. Returns the path actually used, if any.
fn open_log_target(preferred: &Path) -> (Box<dyn Write + Send>, Option<PathBuf>) {
    let fallback = std::env::temp_dir().join(preferred.file_name().unwrap_or(OsStr::new("asteroids.log")));
    for path in [preferred.to_path_buf(), fallback] {
        if let Ok(file) = File::create(&path) {
            return (Box::new(file), Some(path));
        }
    }
    (Box::new(io::sink()), None)
}

fn init_logger(config: &Config) {
    let preferred = config.log_path();
    let (target, used) = open_log_target(&preferred);
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(target))
        .init();
    match used {
        Some(path) if path != preferred => {
            warn!("cannot write {}, logging to {}", preferred.display(), path.display());
        }
        Some(_) => {}
        None => eprintln!("cannot open a log file, logging disabled"),
    }
}

/// Best-effort teardown: every step runs even if an earlier one fails.
fn restore_terminal<W: Write>(out: &mut W, release_events: bool) {
    if release_events {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(out, LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}

fn run(terminal: &mut Term, app: &mut App, fps: u32) -> anyhow::Result<()> {
    let mut events = EventHandler::new(fps);
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let frame = events.next_frame().context("reading terminal input")?;
        for key in frame.keys {
            app.on_key(key);
        }
        if app.should_quit {
            return Ok(());
        }
        app.on_frame(frame.dt);
    }
}

/// Everything between raw mode on and raw mode off
fn play(app: &mut App, config: &Config, release_events: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("enabling key release events")?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")?;
    terminal.clear()?;
    run(&mut terminal, app, config.target_fps)
}

fn main() -> anyhow::Result<()> {
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logger(&config);
    let config = match loaded {
        Ok(_) => config,
        Err(err) => {
            warn!("configuration rejected: {err}");
            return Err(err).context("loading configuration");
        }
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting at {} fps with seed {seed}", config.target_fps);
    info!("simulation config: {:?}", config.simulation);

    enable_raw_mode().context("enabling raw mode")?;
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    info!("key release events: {release_events}");

    let mut app = App::new(&config, seed, release_events);
    let result = play(&mut app, &config, release_events);
    restore_terminal(&mut io::stdout(), release_events);

    match &result {
        Ok(()) => info!("quit after {} frames, best score {}", app.frame_count, app.best_score),
        Err(err) => warn!("exiting on error: {err:#}"),
    }
    result
}
