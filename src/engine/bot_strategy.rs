//! The decision engine and the bot strategies built on it.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::engine::minimax::{
    alpha_beta_search, RootOrientation, SearchParams, SearchResult, SearchSides,
};
use crate::error::{GameError, Result};
use crate::games::tictactoe::{Board, Move, Player};

/// Move selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Uniform choice among legal moves.
    Random,
    /// Exhaustive alpha-beta minimax.
    #[default]
    Optimal,
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" | "0" => Ok(Policy::Random),
            "optimal" | "minimax" | "1" => Ok(Policy::Optimal),
            other => Err(format!("unknown policy '{other}' (expected 'random' or 'optimal')")),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Random => write!(f, "random"),
            Policy::Optimal => write!(f, "optimal"),
        }
    }
}

/// Selects moves on behalf of `controlled_player`. Holds configuration only;
/// nothing carries over between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEngine {
    pub policy: Policy,
    pub controlled_player: Player,
    pub params: SearchParams,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(Policy::Optimal, Player::Second)
    }
}

impl DecisionEngine {
    pub fn new(policy: Policy, controlled_player: Player) -> Self {
        Self {
            policy,
            controlled_player,
            params: SearchParams::default(),
        }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    /// Pick a move using the thread-local RNG for the random policy.
    pub fn select_move(&self, board: &Board) -> Result<Move> {
        self.select_move_with_rng(board, &mut rand::thread_rng())
    }

    /// Pick a move, drawing random-policy choices from `rng` so selection is
    /// reproducible under a seeded generator.
    pub fn select_move_with_rng<R: Rng + ?Sized>(
        &self,
        board: &Board,
        rng: &mut R,
    ) -> Result<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        match self.policy {
            Policy::Random => {
                let mv = *moves.choose(rng).ok_or(GameError::NoLegalMoves)?;
                tracing::debug!(player = ?self.controlled_player, %mv, "random move selected");
                Ok(mv)
            }
            Policy::Optimal => {
                let result = self.search(board)?;
                // A decided board still has empty cells but nothing to search.
                result.best_move.ok_or(GameError::IllegalWhenOver)
            }
        }
    }

    /// Run the minimax search regardless of policy and return the score as
    /// well as the move.
    pub fn search(&self, board: &Board) -> Result<SearchResult> {
        if board.is_full() {
            return Err(GameError::NoLegalMoves);
        }
        let sides = SearchSides::new(self.controlled_player, self.params.root_orientation);
        let t0 = Instant::now();
        let result = alpha_beta_search(board, sides, self.params.parallel_root);
        tracing::debug!(
            player = ?self.controlled_player,
            best_move = ?result.best_move,
            score = result.score,
            nodes = result.nodes,
            elapsed_us = t0.elapsed().as_micros() as u64,
            "minimax search complete"
        );
        Ok(result)
    }
}

/// A bot strategy picks a move for whichever side is to move. Used by the
/// arena, where one strategy may play either seat.
pub trait BotStrategy: Send + Sync {
    fn choose_move(&self, board: &Board, to_move: Player, rng: &mut dyn RngCore) -> Result<Move>;
}

/// Picks a uniformly random legal move.
pub struct RandomStrategy;

impl BotStrategy for RandomStrategy {
    fn choose_move(&self, board: &Board, to_move: Player, rng: &mut dyn RngCore) -> Result<Move> {
        DecisionEngine::new(Policy::Random, to_move).select_move_with_rng(board, rng)
    }
}

/// Wraps the minimax engine as a BotStrategy. Defaults to the side-to-move
/// orientation so the strategy plays either seat optimally.
pub struct MinimaxStrategy {
    pub params: SearchParams,
}

impl MinimaxStrategy {
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new(SearchParams {
            root_orientation: RootOrientation::SideToMove,
            parallel_root: false,
        })
    }
}

impl BotStrategy for MinimaxStrategy {
    fn choose_move(&self, board: &Board, to_move: Player, rng: &mut dyn RngCore) -> Result<Move> {
        DecisionEngine::new(Policy::Optimal, to_move)
            .with_params(self.params)
            .select_move_with_rng(board, rng)
    }
}
