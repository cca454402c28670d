//! A terminal maze chase: eat every dot before a wandering ghost catches you.
//!
//! The game core ([`maze`], [`movement`], [`player`], [`ghost`], [`game`]) is
//! free of terminal I/O. [`input`], [`render`] and [`terminal`] connect it to
//! a real terminal, and [`app`] runs the fixed-cadence loop.
pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod ghost;
pub mod input;
pub mod logging;
pub mod maze;
pub mod movement;
pub mod player;
pub mod render;
pub mod terminal;

pub use error::LoadError;
pub use game::{Game, Status};
pub use maze::{Maze, Pos, Tile};
pub use movement::Direction;
