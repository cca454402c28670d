use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::config::Glyphs;
use crate::game::{Game, Status};
use crate::maze::{Pos, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Glyph {
    Player,
    Ghost,
    Death,
    Wall,
    Dot,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Empty,
    color: Color::Reset,
};

/// Draws a [`Game`] onto any writer with cursor-addressed escape sequences.
///
/// The grid is centred in the viewport with a HUD line above it. Only cells
/// that changed since the previous frame are written, except on the first
/// frame and after the viewport moves the grid.
pub struct Renderer {
    glyphs: Glyphs,
    cell_w: usize,
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(glyphs: Glyphs) -> Self {
        let cell_w = glyphs
            .all()
            .iter()
            .map(|g| UnicodeWidthStr::width(*g))
            .max()
            .unwrap_or(1)
            .max(1);
        Self {
            glyphs,
            cell_w,
            last: Vec::new(),
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    /// Terminal columns taken by one maze cell.
    pub fn cell_width(&self) -> usize {
        self.cell_w
    }

    /// Draws one frame. `viewport` is the terminal size as `(columns, rows)`.
    pub fn draw(
        &mut self,
        out: &mut impl Write,
        game: &Game,
        viewport: (u16, u16),
    ) -> io::Result<()> {
        let maze = game.maze();
        let (width, height) = (maze.width(), maze.height());
        let (cols, lines) = (width * self.cell_w, height + 2);
        let (term_w, term_h) = viewport;

        out.queue(MoveTo(0, 0))?;

        // Grids that do not fit in u16 can never fit on screen either.
        let fits = u16::try_from(cols)
            .ok()
            .zip(u16::try_from(lines).ok())
            .filter(|&(w, h)| w <= term_w && h <= term_h);
        let Some((needed_w, needed_h)) = fits else {
            out.queue(Clear(ClearType::All))?;
            out.queue(Print(format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                cols, lines, term_w, term_h
            )))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        };

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 1;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.last.len() != width * height {
            self.last = vec![BLANK; width * height];
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = format!(
            "Score: {}  Lives: {}  Dots: {}  (q to quit)",
            game.player().score,
            game.player().lives,
            game.dots_left()
        );
        if self.needs_full || hud != self.last_hud {
            out.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            out.queue(SetForegroundColor(Color::White))?;
            out.queue(Clear(ClearType::CurrentLine))?;
            out.queue(Print(&hud))?;
            out.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for row in 0..height {
            for col in 0..width {
                let cell = cell_for(game, Pos { row, col });
                let idx = row * width + col;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, row, col, cell)?;
                }
            }
        }
        self.needs_full = false;

        out.flush()
    }

    /// Writes a closing message on the line below the grid.
    pub fn draw_banner(&self, out: &mut impl Write, game: &Game, text: &str) -> io::Result<()> {
        let height = u16::try_from(game.maze().height()).unwrap_or(u16::MAX);
        let row = self.origin_y.saturating_add(height);
        out.queue(MoveTo(self.origin_x, row))?;
        out.queue(SetForegroundColor(Color::White))?;
        out.queue(Print(text))?;
        out.queue(ResetColor)?;
        out.flush()
    }

    fn draw_cell(
        &self,
        out: &mut impl Write,
        row: usize,
        col: usize,
        cell: Cell,
    ) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => &self.glyphs.player,
            Glyph::Ghost => &self.glyphs.ghost,
            Glyph::Death => &self.glyphs.death,
            Glyph::Wall => &self.glyphs.wall,
            Glyph::Dot => &self.glyphs.dot,
            Glyph::Empty => &self.glyphs.space,
        };
        // `draw` only gets here once the whole grid fits in the viewport.
        let x = self.origin_x + (col * self.cell_w) as u16;
        let y = self.origin_y + row as u16;
        out.queue(MoveTo(x, y))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text.as_str());
        for _ in w..self.cell_w {
            out.queue(Print(' '))?;
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    if pos == game.player().pos {
        if game.status() == Status::Lost {
            return Cell {
                glyph: Glyph::Death,
                color: Color::Red,
            };
        }
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if game.ghosts().iter().any(|g| g.pos == pos) {
        return Cell {
            glyph: Glyph::Ghost,
            color: Color::Red,
        };
    }
    match game.maze().tile_at(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Dot => Cell {
            glyph: Glyph::Dot,
            color: Color::White,
        },
        Tile::Empty | Tile::PlayerSpawn | Tile::GhostSpawn => BLANK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use crate::maze::Maze;
    use crate::movement::Direction;
    use rand::rngs::mock::StepRng;

    fn game() -> Game {
        Game::new(Maze::from_rows(["#####", "#P.G#", "#####"]).unwrap()).unwrap()
    }

    fn frame(renderer: &mut Renderer, game: &Game, viewport: (u16, u16)) -> String {
        let mut out = Vec::new();
        renderer.draw(&mut out, game, viewport).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cell_width_follows_widest_glyph() {
        assert_eq!(Renderer::new(Glyphs::ascii()).cell_width(), 1);
        assert_eq!(Renderer::new(Glyphs::emoji()).cell_width(), 2);
    }

    #[test]
    fn first_frame_draws_everything() {
        let mut renderer = Renderer::new(Glyphs::ascii());
        let text = frame(&mut renderer, &game(), (80, 24));
        assert!(text.contains("Score: 0  Lives: 1  Dots: 1"));
        assert_eq!(text.matches('#').count(), 12);
        assert!(text.contains('P'));
        assert!(text.contains('G'));
        assert!(text.contains('.'));
    }

    #[test]
    fn unchanged_frame_writes_no_cells() {
        let mut renderer = Renderer::new(Glyphs::ascii());
        let game = game();
        frame(&mut renderer, &game, (80, 24));
        let text = frame(&mut renderer, &game, (80, 24));
        assert!(!text.contains('#'));
        assert!(!text.contains("Score"));
    }

    #[test]
    fn moved_player_redraws_changed_cells_only() {
        let mut renderer = Renderer::new(Glyphs::ascii());
        let mut game = game();
        frame(&mut renderer, &game, (80, 24));
        game.tick(Some(Input::Move(Direction::Right)), &mut StepRng::new(0, 0));
        let text = frame(&mut renderer, &game, (80, 24));
        assert!(text.contains('P'));
        assert!(!text.contains('#'));
        assert!(text.contains("Score: 1"));
    }

    #[test]
    fn tiny_viewport_shows_a_warning() {
        let mut renderer = Renderer::new(Glyphs::ascii());
        let text = frame(&mut renderer, &game(), (3, 3));
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn grid_wider_than_any_terminal_is_too_small() {
        let row = format!("P{}", ".".repeat(70_000));
        let game = Game::new(Maze::from_rows([row]).unwrap()).unwrap();
        let mut renderer = Renderer::new(Glyphs::ascii());
        let text = frame(&mut renderer, &game, (u16::MAX, 24));
        assert!(text.contains("Terminal too small. Need at least 70001x3"));
        assert!(!text.contains('P'));
    }

    #[test]
    fn wide_glyphs_are_padded() {
        let glyphs = Glyphs {
            wall: "##".into(),
            ..Glyphs::ascii()
        };
        let mut renderer = Renderer::new(glyphs);
        let text = frame(&mut renderer, &game(), (80, 24));
        assert!(text.contains("P "));
    }
}
