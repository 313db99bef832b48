//! Match controller: turn order, move dispatch and game-over detection for a
//! single game, with an optional engine opponent.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::engine::bot_strategy::{DecisionEngine, Policy};
use crate::error::{GameError, Result};
use crate::games::tictactoe::{Board, Move, Outcome, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    HumanVsHuman,
    #[default]
    HumanVsEngine,
}

impl GameMode {
    pub fn toggled(self) -> GameMode {
        match self {
            GameMode::HumanVsHuman => GameMode::HumanVsEngine,
            GameMode::HumanVsEngine => GameMode::HumanVsHuman,
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human_vs_human" | "pvp" => Ok(GameMode::HumanVsHuman),
            "human_vs_engine" | "engine" | "minimax" => Ok(GameMode::HumanVsEngine),
            other => Err(format!("unknown mode '{other}' (expected 'pvp' or 'engine')")),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::HumanVsHuman => write!(f, "human vs human"),
            GameMode::HumanVsEngine => write!(f, "human vs engine"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    AwaitingMove(Player),
    Over(Outcome),
}

pub struct MatchController {
    board: Board,
    current_player: Player,
    state: MatchState,
    mode: GameMode,
    engine: DecisionEngine,
    rng: StdRng,
}

impl MatchController {
    pub fn new(mode: GameMode, engine: DecisionEngine) -> Self {
        Self::with_rng(mode, engine, StdRng::from_entropy())
    }

    /// Controller whose random-policy engine moves are reproducible.
    pub fn with_seed(mode: GameMode, engine: DecisionEngine, seed: u64) -> Self {
        Self::with_rng(mode, engine, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mode: GameMode, engine: DecisionEngine, rng: StdRng) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::First,
            state: MatchState::AwaitingMove(Player::First),
            mode,
            engine,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DecisionEngine {
        &mut self.engine
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, MatchState::Over(_))
    }

    /// True when the presentation layer should call [`Self::engine_turn`].
    pub fn is_engine_turn(&self) -> bool {
        self.mode == GameMode::HumanVsEngine
            && self.state == MatchState::AwaitingMove(self.engine.controlled_player)
    }

    /// Apply a move for the current player and advance the turn.
    pub fn submit_move(&mut self, row: usize, column: usize) -> Result<MatchState> {
        if self.is_over() {
            return Err(GameError::IllegalWhenOver);
        }

        let player = self.current_player;
        self.board.apply_move(row, column, player)?;
        self.current_player = player.opponent();
        tracing::debug!(?player, row, column, "move applied");

        let outcome = self.board.outcome();
        self.state = if outcome.is_terminal() {
            tracing::info!(%outcome, moves = self.board.occupied_count(), "game over");
            MatchState::Over(outcome)
        } else {
            MatchState::AwaitingMove(self.current_player)
        };
        Ok(self.state)
    }

    /// Ask the engine for a move and play it.
    pub fn engine_turn(&mut self) -> Result<Move> {
        if self.is_over() {
            return Err(GameError::IllegalWhenOver);
        }
        if !self.is_engine_turn() {
            return Err(GameError::NotEngineTurn);
        }

        let mv = self.engine.select_move_with_rng(&self.board, &mut self.rng)?;
        tracing::info!(policy = %self.engine.policy, %mv, "engine move");
        self.submit_move(mv.row, mv.column)?;
        Ok(mv)
    }

    /// Start a fresh game. Mode and engine configuration are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::First;
        self.state = MatchState::AwaitingMove(Player::First);
        tracing::debug!(mode = %self.mode, policy = %self.engine.policy, "game reset");
    }

    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> GameMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.engine.policy = policy;
    }
}
