//! Tic-tac-toe game state: players, cells, lines and the 3x3 board.

pub mod board;
pub mod types;

pub use board::Board;
pub use types::{Cell, Line, Move, Outcome, Player, LINES, NUM_CELLS, SIZE};
