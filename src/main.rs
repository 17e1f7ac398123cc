//! HANGMAN - terminal word guessing for one player or competing teams
//!
//! Guess the word before the drawing is finished.

mod app;
mod config;
mod game;
mod logging;
mod sound;
mod tui;

use anyhow::Context;
use app::AppCoordinator;
use config::Options;
use crossterm::event::{self, Event, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sound::{SoundBoard, TerminalBell};
use std::time::{Duration, Instant};
use tui::Tui;

/// Event loop tick: drives deferred round endings
const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let options = Options::from_env();
    let (_log_guard, log_dir) =
        logging::setup(options.log_dir.as_deref()).context("failed to set up logging")?;
    tracing::info!(
        theme = %options.theme,
        mode = %options.mode,
        difficulty = %options.difficulty,
        sound = options.sound_enabled,
        dictionary = %options.dictionary,
        log_dir = %log_dir.display(),
        "starting"
    );

    let sound = SoundBoard::new(options.sound_enabled, Box::new(TerminalBell));
    let mut coordinator = AppCoordinator::new(&options, sound, StdRng::from_os_rng());

    // Initialize terminal
    let mut terminal = Tui::new().context("failed to open terminal")?;
    terminal.enter().context("failed to prepare terminal")?;

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    coordinator.on_key(key.code, key.modifiers, Instant::now());
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            coordinator.tick(Instant::now());
            last_tick = Instant::now();
        }

        if coordinator.should_quit {
            break;
        }
    }

    tracing::info!("exiting");
    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}
