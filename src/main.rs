//! Super Platformer entry point
//!
//! Sets up logging and the terminal, then runs one tick and one render per
//! frame until the session ends.

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};

use super_platformer::audio::AudioManager;
use super_platformer::input::KeyTracker;
use super_platformer::renderer::TerminalRenderer;
use super_platformer::{Game, Settings};

fn init_logging(settings: &Settings) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = &settings.log_file {
        match File::create(path) {
            Ok(file) => {
                builder
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .filter_level(log::LevelFilter::Info)
                    .parse_default_env();
            }
            Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
        }
    }

    builder.init();
}

fn main() -> std::io::Result<()> {
    // The log target comes from the settings, so report how loading went
    // only once the logger is installed
    let config_path = Settings::config_path();
    let (settings, outcome) = Settings::read_from(&config_path);
    init_logging(&settings);
    log::info!("Super Platformer starting...");
    outcome.log(&config_path);

    let audio = AudioManager::detect(&settings);
    let mut game = Game::new(&settings, audio)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key release events where the terminal supports them
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let frame_time = Duration::from_secs(1) / settings.target_fps;
    let result = run(&mut out, &rx, &mut game, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let state = game.state();
    log::info!(
        "Session over: level {}, score {}, coins {}",
        state.current_level,
        state.player.score,
        state.player.coins
    );
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    game: &mut Game,
    frame_time: Duration,
) -> std::io::Result<()> {
    let mut keys = KeyTracker::new();
    let mut renderer = TerminalRenderer::new(out);

    while game.is_running() {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            keys.handle_event(&ev);
        }
        if keys.is_interrupted() {
            log::info!("Interrupted");
            break;
        }

        game.step(&keys.sample());
        game.render(&mut renderer);

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}
