//! Engine and match configuration, loaded from TOML.
//!
//! ```toml
//! [engine]
//! policy = "optimal"            # or "random"
//! controlled_player = "second"  # or "first"
//! root_orientation = "fixed"    # or "side_to_move"
//! parallel_root = false
//!
//! [match]
//! mode = "human_vs_engine"      # or "human_vs_human"
//! seed = 42                     # optional; entropy when absent
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::engine::bot_strategy::{DecisionEngine, Policy};
use crate::engine::controller::{GameMode, MatchController};
use crate::engine::minimax::{RootOrientation, SearchParams};
use crate::error::ConfigError;
use crate::games::tictactoe::Player;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default = "default_controlled_player")]
    pub controlled_player: Player,
    #[serde(default)]
    pub root_orientation: RootOrientation,
    #[serde(default)]
    pub parallel_root: bool,
}

fn default_controlled_player() -> Player {
    Player::Second
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            controlled_player: default_controlled_player(),
            root_orientation: RootOrientation::default(),
            parallel_root: false,
        }
    }
}

impl EngineConfig {
    pub fn to_decision_engine(&self) -> DecisionEngine {
        DecisionEngine::new(self.policy, self.controlled_player).with_params(SearchParams {
            root_orientation: self.root_orientation,
            parallel_root: self.parallel_root,
        })
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct MatchConfig {
    #[serde(default)]
    pub mode: GameMode,
    pub seed: Option<u64>,
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default, rename = "match")]
    pub match_config: MatchConfig,
}

impl AppConfig {
    pub fn build_controller(&self) -> MatchController {
        let engine = self.engine.to_decision_engine();
        match self.match_config.seed {
            Some(seed) => MatchController::with_seed(self.match_config.mode, engine, seed),
            None => MatchController::new(self.match_config.mode, engine),
        }
    }
}

/// Load configuration from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Try to load configuration from well-known paths, returning defaults if
/// none is found or readable.
pub fn load_default_config() -> AppConfig {
    let candidates = [
        "tictactoe.toml",
        "../tictactoe.toml",
        "/etc/tictactoe/tictactoe.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded configuration");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load configuration");
                }
            }
        }
    }
    tracing::info!("no tictactoe.toml found, using built-in defaults");
    AppConfig::default()
}
