use crate::maze::{Maze, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Draw order used by wandering ghosts.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Right,
        Direction::Left,
    ];

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Moves one cell from `from`, wrapping around the edges of the maze.
///
/// A wall at the destination cancels the move and `from` is returned, as
/// does a missing direction. Players and ghosts both move through here.
pub fn step(maze: &Maze, from: Pos, direction: Option<Direction>) -> Pos {
    let Some(direction) = direction else {
        return from;
    };
    let (dr, dc) = direction.delta();
    let to = Pos {
        row: wrap(from.row, dr, maze.height()),
        col: wrap(from.col, dc, maze.width()),
    };
    if maze.is_wall(to) {
        from
    } else {
        to
    }
}

fn wrap(value: usize, delta: isize, len: usize) -> usize {
    (value as isize + delta).rem_euclid(len as isize) as usize
}
