use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maze_chase::app::{self, Settings};
use maze_chase::config::{self, DEFAULT_MAZE_PATH};
use maze_chase::logging;

/// Eat every dot in the maze without getting caught by a ghost.
#[derive(Parser, Debug)]
#[command(name = "maze-chase", version)]
struct Cli {
    /// Glyph config (JSON). Defaults to ./config.json when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maze file: `#` wall, `.` dot, `P` player, `G` ghost
    #[arg(long, default_value = DEFAULT_MAZE_PATH)]
    maze: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (_log_guard, log_path) = logging::init().context("failed to set up logging")?;

    let settings = Settings {
        maze: cli.maze,
        config: cli.config,
        tick: config::tick_interval(),
    };

    let outcome = match app::play(&settings) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!("{:#}", err);
            return Err(err.context(format!("see {} for details", log_path.display())));
        }
    };

    println!("{}", outcome.message());
    Ok(())
}
