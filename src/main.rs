//! Terminal blockfall runner.
//!
//! Reads keys with crossterm, forwards commands to the game actor and redraws
//! the latest published snapshot about every frame.

use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockfall::input::{command_for_key, should_quit};
use blockfall::runtime::{GameConfig, GameRuntime};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env().context("invalid configuration")?;
    init_logging(config.log_path.as_deref())?;
    info!(rows = config.rows, cols = config.cols, seed = ?config.seed, "starting");

    let runtime = GameRuntime::start(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &runtime);

    // Always try to restore terminal state.
    let _ = term.exit();

    let state = runtime.shutdown()?;
    info!(
        episode = state.episode(),
        pieces = state.pieces_spawned(),
        "exiting"
    );
    result
}

/// Log to a file only; stdout belongs to the game.
fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {path}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, runtime: &GameRuntime) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS);
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&runtime.latest(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Drain input until the next frame is due.
        let deadline = Instant::now() + frame;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = command_for_key(key) {
                        if let Err(e) = runtime.send(command) {
                            warn!(error = %e, command = command.as_str(), "dropped command");
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
    }
}
