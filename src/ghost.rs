use rand::seq::SliceRandom;
use rand::Rng;

use crate::maze::{Maze, Pos};
use crate::movement::{self, Direction};

/// A ghost takes one uniformly random step per tick and remembers nothing
/// about previous steps or about the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub pos: Pos,
}

impl Ghost {
    pub fn new(pos: Pos) -> Self {
        Self { pos }
    }

    pub fn wander(&mut self, maze: &Maze, rng: &mut impl Rng) {
        let direction = Direction::ALL.choose(rng).copied();
        self.pos = movement::step(maze, self.pos, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn boxed_in_ghost_never_moves() {
        let maze = Maze::from_rows(["###", "#G#", "###"]).unwrap();
        let mut ghost = Ghost::new(Pos::new(1, 1));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            ghost.wander(&maze, &mut rng);
            assert_eq!(ghost.pos, Pos::new(1, 1));
        }
    }

    #[test]
    fn zero_rng_always_draws_up() {
        let maze = Maze::from_rows(["...", ".G.", "..."]).unwrap();
        let mut ghost = Ghost::new(Pos::new(1, 1));
        let mut rng = StepRng::new(0, 0);
        ghost.wander(&maze, &mut rng);
        assert_eq!(ghost.pos, Pos::new(0, 1));
        ghost.wander(&maze, &mut rng);
        assert_eq!(ghost.pos, Pos::new(2, 1));
    }

    #[test]
    fn reaches_every_neighbour_eventually() {
        let maze = Maze::from_rows([".....", ".....", "..G..", ".....", "....."]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let mut ghost = Ghost::new(Pos::new(2, 2));
            ghost.wander(&maze, &mut rng);
            seen.insert(ghost.pos);
        }
        let expected: HashSet<_> = [
            Pos::new(1, 2),
            Pos::new(3, 2),
            Pos::new(2, 1),
            Pos::new(2, 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(seen, expected);
    }
}
