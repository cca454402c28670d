use std::fs;
use std::path::Path;

use crate::error::LoadError;

pub const WALL: char = '#';
pub const DOT: char = '.';
pub const PLAYER: char = 'P';
pub const GHOST: char = 'G';
pub const SPACE: char = ' ';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Dot,
    Empty,
    PlayerSpawn,
    GhostSpawn,
}

impl Tile {
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            WALL => Tile::Wall,
            DOT => Tile::Dot,
            PLAYER => Tile::PlayerSpawn,
            GHOST => Tile::GhostSpawn,
            _ => Tile::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Wall => WALL,
            Tile::Dot => DOT,
            Tile::PlayerSpawn => PLAYER,
            Tile::GhostSpawn => GHOST,
            Tile::Empty => SPACE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular grid of raw maze symbols.
///
/// Rows are kept verbatim so that [`Maze::find`] can match any character,
/// while [`Maze::tile_at`] classifies a cell through [`Tile::from_symbol`].
/// Every row has the same width; ragged input is rejected when parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Maze {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, LoadError> {
        Self::from_rows(text.lines())
    }

    pub fn from_rows<I, S>(lines: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rows: Vec<Vec<char>> = lines
            .into_iter()
            .map(|line| {
                let line = line.as_ref();
                line.strip_suffix('\r').unwrap_or(line).chars().collect()
            })
            .collect();
        // Blank lines at the end of a file are not part of the grid.
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(LoadError::EmptyMaze),
        };
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(LoadError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        Ok(Self { rows, width })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height() && pos.col < self.width
    }

    /// Positions holding `symbol`, top-to-bottom then left-to-right.
    pub fn find(&self, symbol: char) -> Vec<Pos> {
        self.scan(|ch| ch == symbol)
    }

    pub fn find_tile(&self, tile: Tile) -> Vec<Pos> {
        self.scan(|ch| Tile::from_symbol(ch) == tile)
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&ch| Tile::from_symbol(ch) == tile)
            .count()
    }

    pub fn get(&self, pos: Pos) -> Option<Tile> {
        self.rows
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .map(|&ch| Tile::from_symbol(ch))
    }

    /// Panics if `pos` lies outside the grid.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        match self.get(pos) {
            Some(tile) => tile,
            None => self.out_of_bounds(pos),
        }
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile_at(pos) == Tile::Wall
    }

    /// Panics if `pos` lies outside the grid.
    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if !self.contains(pos) {
            self.out_of_bounds(pos);
        }
        self.rows[pos.row][pos.col] = tile.symbol();
    }

    /// Text form of the maze: walls and dots only, one line per row.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height());
        for row in &self.rows {
            for &ch in row {
                out.push(match Tile::from_symbol(ch) {
                    Tile::Wall => WALL,
                    Tile::Dot => DOT,
                    _ => SPACE,
                });
            }
            out.push('\n');
        }
        out
    }

    fn scan(&self, matches: impl Fn(char) -> bool) -> Vec<Pos> {
        let mut found = Vec::new();
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, &ch) in cells.iter().enumerate() {
                if matches(ch) {
                    found.push(Pos { row, col });
                }
            }
        }
        found
    }

    fn out_of_bounds(&self, pos: Pos) -> ! {
        panic!(
            "cell ({}, {}) outside {}x{} maze",
            pos.row,
            pos.col,
            self.height(),
            self.width
        )
    }
}
