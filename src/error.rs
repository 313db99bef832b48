//! Error types for the engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by board, engine and match operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move: cell ({row}, {column}) is already occupied")]
    InvalidMove { row: usize, column: usize },

    #[error("cell ({row}, {column}) is out of bounds (must be 0-2)")]
    OutOfBounds { row: usize, column: usize },

    #[error("game already over")]
    IllegalWhenOver,

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("engine asked to move outside its own turn")]
    NotEngineTurn,

    #[error("board string has {got} cells, expected {expected}")]
    InvalidBoardLength { expected: usize, got: usize },

    #[error("invalid character '{character}' at cell {position}")]
    InvalidCellCharacter { character: char, position: usize },
}

/// Errors raised while loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
