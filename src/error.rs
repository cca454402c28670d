use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a game from starting.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read maze file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("maze is empty")]
    EmptyMaze,

    #[error("maze row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze has no player spawn ('P')")]
    NoPlayer,
}
