//! Bot-vs-bot arena runner.
//!
//! Games are independent and seeded per game (`base_seed + index`), so they
//! run on the rayon pool and still aggregate deterministically.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::bot_strategy::BotStrategy;
use crate::error::Result;
use crate::games::tictactoe::{Board, Outcome, Player};

/// A strategy entered into the arena under a display name.
pub type NamedStrategy = (String, Box<dyn BotStrategy>);

/// One finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub seed: u64,
    /// Strategy names in seat order: `[first, second]`.
    pub seats: [String; 2],
    /// Winning strategy name, `None` on a draw.
    pub winner: Option<String>,
    pub moves: usize,
    pub duration_ms: f64,
}

/// Aggregated results from an arena run.
#[derive(Debug, Clone, Serialize)]
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    /// Wins by seat, regardless of strategy.
    pub first_seat_wins: usize,
    pub second_seat_wins: usize,
    pub games: Vec<GameRecord>,
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    /// Games decided against `name`.
    pub fn loss_count(&self, name: &str) -> usize {
        self.games
            .iter()
            .filter(|g| g.seats.iter().any(|s| s == name))
            .filter(|g| matches!(&g.winner, Some(w) if w != name))
            .count()
    }

    /// Wilson score interval for `name`'s win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let wr = self.win_rate(name);
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>12}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  losses={}",
                name,
                self.wins[name],
                wr * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.loss_count(name),
            ));
        }
        lines.push(format!("  {:>12}: {}", "Draws", self.draws));
        lines.push(format!(
            "  Seat wins: first={}  second={}",
            self.first_seat_wins, self.second_seat_wins
        ));
        if !self.games.is_empty() {
            let total_ms: f64 = self.games.iter().map(|g| g.duration_ms).sum();
            lines.push(format!(
                "  Avg game: {:.2}ms  |  Total: {:.2}s",
                total_ms / self.games.len() as f64,
                total_ms / 1000.0
            ));
        }
        lines.join("\n")
    }
}

/// Run `num_games` between two named strategies and return aggregated stats.
/// Game `i` is seeded with `base_seed + i`, wrapping at `u64::MAX`.
///
/// The first entry takes the First seat in even-numbered games; with
/// `alternate_seats` the entries swap seats on odd-numbered games.
pub fn run_arena(
    strategies: &[NamedStrategy; 2],
    num_games: usize,
    base_seed: u64,
    alternate_seats: bool,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> Result<ArenaResult> {
    let completed = AtomicUsize::new(0);
    let games: Vec<GameRecord> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| {
            let seed = base_seed.wrapping_add(game_idx as u64);
            let (first, second) = if alternate_seats && game_idx % 2 == 1 {
                (&strategies[1], &strategies[0])
            } else {
                (&strategies[0], &strategies[1])
            };

            let mut rng = StdRng::seed_from_u64(seed);
            let t0 = Instant::now();
            let seats = [first.1.as_ref(), second.1.as_ref()];
            let (outcome, moves) = play_one_game(seats, &mut rng)?;
            let duration_ms = t0.elapsed().as_secs_f64() * 1000.0;

            let winner = outcome.winner().map(|p| match p {
                Player::First => first.0.clone(),
                Player::Second => second.0.clone(),
            });
            tracing::debug!(game = game_idx, seed, %outcome, moves, "arena game finished");

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(done, num_games);
            }

            Ok(GameRecord {
                seed,
                seats: [first.0.clone(), second.0.clone()],
                winner,
                moves,
                duration_ms,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut result = ArenaResult {
        num_games,
        wins: strategies.iter().map(|(n, _)| (n.clone(), 0)).collect(),
        draws: 0,
        first_seat_wins: 0,
        second_seat_wins: 0,
        games: Vec::with_capacity(num_games),
    };
    for game in games {
        match &game.winner {
            None => result.draws += 1,
            Some(name) => {
                *result.wins.entry(name.clone()).or_insert(0) += 1;
                if *name == game.seats[0] {
                    result.first_seat_wins += 1;
                } else {
                    result.second_seat_wins += 1;
                }
            }
        }
        result.games.push(game);
    }
    Ok(result)
}

/// Play a single game from an empty board. Returns the final outcome and the
/// number of moves made.
pub fn play_one_game(seats: [&dyn BotStrategy; 2], rng: &mut StdRng) -> Result<(Outcome, usize)> {
    let mut board = Board::new();
    let mut to_move = Player::First;

    loop {
        let outcome = board.outcome();
        if outcome.is_terminal() {
            return Ok((outcome, board.occupied_count()));
        }
        let strategy = match to_move {
            Player::First => seats[0],
            Player::Second => seats[1],
        };
        let mv = strategy.choose_move(&board, to_move, rng)?;
        board.apply_move(mv.row, mv.column, to_move)?;
        to_move = to_move.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bot_strategy::{MinimaxStrategy, RandomStrategy};

    fn entries(a: Box<dyn BotStrategy>, b: Box<dyn BotStrategy>) -> [NamedStrategy; 2] {
        [("a".to_string(), a), ("b".to_string(), b)]
    }

    #[test]
    fn test_arena_random_vs_random() {
        let strategies = entries(Box::new(RandomStrategy), Box::new(RandomStrategy));
        let result = run_arena(&strategies, 10, 42, true, None).unwrap();

        assert_eq!(result.num_games, 10);
        let total_outcomes = result.wins.values().sum::<usize>() + result.draws;
        assert_eq!(total_outcomes, 10);
        assert_eq!(result.first_seat_wins + result.second_seat_wins + result.draws, 10);
        assert!(result.games.iter().all(|g| (5..=9).contains(&g.moves)));
    }

    #[test]
    fn test_arena_is_deterministic_for_seed() {
        let strategies = entries(Box::new(RandomStrategy), Box::new(RandomStrategy));
        let a = run_arena(&strategies, 8, 7, true, None).unwrap();
        let b = run_arena(&strategies, 8, 7, true, None).unwrap();
        let winners = |r: &ArenaResult| {
            r.games.iter().map(|g| g.winner.clone()).collect::<Vec<_>>()
        };
        assert_eq!(winners(&a), winners(&b));
    }

    #[test]
    fn test_seed_wraps_at_u64_max() {
        let strategies = entries(Box::new(RandomStrategy), Box::new(RandomStrategy));
        let result = run_arena(&strategies, 3, u64::MAX, true, None).unwrap();
        let seeds: Vec<u64> = result.games.iter().map(|g| g.seed).collect();
        assert_eq!(seeds, vec![u64::MAX, 0, 1]);
        assert_eq!(result.draws + result.first_seat_wins + result.second_seat_wins, 3);
    }

    #[test]
    fn test_alternate_seats() {
        let strategies = entries(Box::new(RandomStrategy), Box::new(RandomStrategy));
        let result = run_arena(&strategies, 4, 0, true, None).unwrap();
        assert_eq!(result.games[0].seats, ["a".to_string(), "b".to_string()]);
        assert_eq!(result.games[1].seats, ["b".to_string(), "a".to_string()]);

        let fixed = run_arena(&strategies, 4, 0, false, None).unwrap();
        assert!(fixed.games.iter().all(|g| g.seats[0] == "a"));
    }

    #[test]
    fn test_minimax_self_play_draws() {
        let strategies = entries(
            Box::new(MinimaxStrategy::default()),
            Box::new(MinimaxStrategy::default()),
        );
        let result = run_arena(&strategies, 2, 0, true, None).unwrap();
        assert_eq!(result.draws, 2);
        assert!(result.summary().contains("Draws"));
    }

    #[test]
    fn test_progress_callback_counts_every_game() {
        let strategies = entries(Box::new(RandomStrategy), Box::new(RandomStrategy));
        let calls = AtomicUsize::new(0);
        let cb = |_done: usize, total: usize| {
            assert_eq!(total, 5);
            calls.fetch_add(1, Ordering::Relaxed);
        };
        run_arena(&strategies, 5, 1, false, Some(&cb)).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 5);
    }
}
