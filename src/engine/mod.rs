pub mod evaluator;
pub mod minimax;
pub mod bot_strategy;
pub mod controller;
pub mod arena;
pub mod config;
