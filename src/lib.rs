//! Tic-tac-toe engine with an optimal-play adversary.
//!
//! [`games::tictactoe`] holds the board model, [`engine`] the decision engine
//! (random or alpha-beta minimax), the match controller and the bot arena.

pub mod engine;
pub mod error;
pub mod games;

pub use engine::bot_strategy::{DecisionEngine, Policy};
pub use engine::controller::{GameMode, MatchController, MatchState};
pub use error::{ConfigError, GameError, Result};
pub use games::tictactoe::{Board, Cell, Line, Move, Outcome, Player};
