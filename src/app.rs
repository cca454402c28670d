use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;

use crate::config;
use crate::game::{Game, Status};
use crate::input::{self, Input};
use crate::maze::Maze;
use crate::render::Renderer;
use crate::terminal::TerminalGuard;

pub struct Settings {
    pub maze: PathBuf,
    pub config: Option<PathBuf>,
    pub tick: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub status: Status,
    pub score: u32,
}

impl Outcome {
    pub fn message(&self) -> String {
        let verdict = match self.status {
            Status::Won => "You won!",
            Status::Lost => "Game over.",
            Status::Quit | Status::Running => "Bye.",
        };
        format!("{} Final score: {}", verdict, self.score)
    }
}

/// Loads everything, takes over the terminal and plays one session.
///
/// Load failures are returned before the terminal is touched.
pub fn play(settings: &Settings) -> Result<Outcome> {
    let glyphs = config::load_glyphs(settings.config.as_deref())?;
    let maze = Maze::load(&settings.maze)?;
    let mut game = Game::new(maze)
        .with_context(|| format!("cannot start game from {}", settings.maze.display()))?;
    let mut renderer = Renderer::new(glyphs);

    let guard = TerminalGuard::acquire().context("failed to prepare terminal")?;
    let (tx, rx) = mpsc::channel();
    let _reader = input::spawn_reader(tx);

    let mut stdout = io::stdout();
    let status = run_loop(
        &mut game,
        &mut renderer,
        &rx,
        &mut stdout,
        || guard.size(),
        settings.tick,
        &mut rand::thread_rng(),
    )?;

    let outcome = Outcome {
        status,
        score: game.player().score,
    };
    if matches!(status, Status::Won | Status::Lost) {
        let banner = format!("{} Press any key to exit.", outcome.message());
        renderer.draw_banner(&mut stdout, &game, &banner)?;
        if wait_for_key(&rx).is_none() {
            tracing::warn!("input closed before the exit key");
        }
    }
    tracing::info!("session ended: {:?}, score {}", outcome.status, outcome.score);
    Ok(outcome)
}

/// Blocks until a key is pressed after this call.
///
/// Keys still queued from play are discarded first. Returns `None` if the
/// reader has gone away.
pub fn wait_for_key(inputs: &Receiver<Input>) -> Option<Input> {
    while inputs.try_recv().is_ok() {}
    inputs.recv().ok()
}

/// Runs ticks at a fixed cadence until the game leaves [`Status::Running`].
///
/// Each tick takes at most one queued input and never waits for one. The
/// frame is redrawn after every tick except a quitting one.
pub fn run_loop<W, V, R>(
    game: &mut Game,
    renderer: &mut Renderer,
    inputs: &Receiver<Input>,
    out: &mut W,
    mut viewport: V,
    tick: Duration,
    rng: &mut R,
) -> io::Result<Status>
where
    W: Write,
    V: FnMut() -> io::Result<(u16, u16)>,
    R: Rng,
{
    renderer.draw(out, game, viewport()?)?;

    loop {
        let status = game.tick(input::poll(inputs), rng);
        if status == Status::Quit {
            return Ok(status);
        }

        renderer.draw(out, game, viewport()?)?;
        if status != Status::Running {
            return Ok(status);
        }

        thread::sleep(tick);
    }
}
