use rand::Rng;

use crate::error::LoadError;
use crate::ghost::Ghost;
use crate::input::Input;
use crate::maze::{Maze, Tile};
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Won,
    Lost,
    Quit,
}

/// One play session: the maze, everything on it, and where the game stands.
#[derive(Debug)]
pub struct Game {
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    dots_left: usize,
    status: Status,
}

impl Game {
    /// Places the player and ghosts on their spawn markers.
    ///
    /// The first `P` in scan order is the player; every `G` is a ghost.
    pub fn new(maze: Maze) -> Result<Self, LoadError> {
        let spawns = maze.find_tile(Tile::PlayerSpawn);
        let Some(&spawn) = spawns.first() else {
            return Err(LoadError::NoPlayer);
        };
        if spawns.len() > 1 {
            tracing::warn!(
                "maze has {} player spawns, using ({}, {})",
                spawns.len(),
                spawn.row,
                spawn.col
            );
        }

        let ghosts: Vec<Ghost> = maze
            .find_tile(Tile::GhostSpawn)
            .into_iter()
            .map(Ghost::new)
            .collect();
        if ghosts.is_empty() {
            tracing::warn!("maze has no ghost spawns");
        }

        let dots_left = maze.count(Tile::Dot);
        tracing::info!(
            "loaded {}x{} maze with {} dots and {} ghosts",
            maze.height(),
            maze.width(),
            dots_left,
            ghosts.len()
        );

        Ok(Self {
            player: Player::new(spawn),
            ghosts,
            dots_left,
            status: Status::Running,
            maze,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn dots_left(&self) -> usize {
        self.dots_left
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Advances the game by one tick.
    ///
    /// Phases run in order: input, end check, ghosts, collision, scoring.
    /// Quitting or reaching an end state stops the tick before later phases.
    /// Ticking a finished game does nothing.
    pub fn tick(&mut self, input: Option<Input>, rng: &mut impl Rng) -> Status {
        if self.status != Status::Running {
            return self.status;
        }

        match input {
            Some(Input::Quit) => {
                self.status = Status::Quit;
                return self.status;
            }
            Some(Input::Move(direction)) => self.player.step(&self.maze, direction),
            Some(Input::Ignored) | None => {}
        }

        if let Some(end) = self.outcome() {
            tracing::info!("game over: {:?}, score {}", end, self.player.score);
            self.status = end;
            return self.status;
        }

        self.move_ghosts(rng);
        self.detect_collision();
        self.score();

        self.status
    }

    fn outcome(&self) -> Option<Status> {
        if self.dots_left == 0 {
            Some(Status::Won)
        } else if !self.player.is_alive() {
            Some(Status::Lost)
        } else {
            None
        }
    }

    fn move_ghosts(&mut self, rng: &mut impl Rng) {
        for ghost in &mut self.ghosts {
            ghost.wander(&self.maze, rng);
        }
    }

    /// At most one life is lost per tick, however many ghosts overlap.
    fn detect_collision(&mut self) {
        if let Some(idx) = self.ghosts.iter().position(|g| g.pos == self.player.pos) {
            self.player.lose_life();
            tracing::debug!(
                "ghost {} caught the player at ({}, {}), {} lives left",
                idx,
                self.player.pos.row,
                self.player.pos.col,
                self.player.lives
            );
        }
    }

    fn score(&mut self) {
        let pos = self.player.pos;
        if self.maze.tile_at(pos) != Tile::Dot {
            return;
        }
        self.maze.set_tile(pos, Tile::Empty);
        self.dots_left -= 1;
        self.player.collect_dot();
        debug_assert_eq!(self.dots_left, self.maze.count(Tile::Dot));
        tracing::debug!("dot eaten, {} left", self.dots_left);
    }
}
