use crate::maze::{Maze, Pos};
use crate::movement::{self, Direction};

pub const STARTING_LIVES: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub lives: u32,
    pub score: u32,
}

impl Player {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            lives: STARTING_LIVES,
            score: 0,
        }
    }

    pub fn step(&mut self, maze: &Maze, direction: Direction) {
        self.pos = movement::step(maze, self.pos, Some(direction));
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn collect_dot(&mut self) {
        self.score += 1;
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}
