//! Exhaustive minimax search with alpha-beta pruning.
//!
//! Scores are always from First's point of view (+1 First wins, -1 Second
//! wins, 0 draw), so First is the maximizer in scoring. Which mark each side of
//! the search places is decided by [`SearchSides`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::evaluator::{terminal_score, DRAW};
use crate::games::tictactoe::{Board, Move, Player, NUM_CELLS};

/// Recursion never needs to go deeper than the number of cells.
pub const MAX_SEARCH_DEPTH: usize = NUM_CELLS;

/// How the root of the search is oriented relative to the controlled player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootOrientation {
    /// Root is always minimizing. The minimizing side places the controlled
    /// player's mark and the maximizing side places the opponent's. Plays
    /// optimally only when the controlled player is Second.
    #[default]
    Fixed,
    /// First always maximizes and Second always minimizes; the root flag
    /// follows the controlled player. Optimal for either seat.
    SideToMove,
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchParams {
    pub root_orientation: RootOrientation,
    /// Search root branches on the rayon pool with full windows.
    pub parallel_root: bool,
}

/// Mark placed by each side of the search and the orientation of the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSides {
    pub maximizer: Player,
    pub minimizer: Player,
    pub root_maximizing: bool,
}

impl SearchSides {
    pub fn new(controlled: Player, orientation: RootOrientation) -> Self {
        match orientation {
            RootOrientation::Fixed => Self {
                maximizer: controlled.opponent(),
                minimizer: controlled,
                root_maximizing: false,
            },
            RootOrientation::SideToMove => Self {
                maximizer: Player::First,
                minimizer: Player::Second,
                root_maximizing: controlled == Player::First,
            },
        }
    }

    fn mover(&self, maximizing: bool) -> Player {
        if maximizing {
            self.maximizer
        } else {
            self.minimizer
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    /// `None` when the root is already terminal.
    pub best_move: Option<Move>,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Alpha-beta search rooted at `board`. The caller's board is never mutated;
/// every branch works on its own copy.
pub fn alpha_beta_search(board: &Board, sides: SearchSides, parallel_root: bool) -> SearchResult {
    if parallel_root {
        return parallel_root_search(board, sides);
    }
    let mut nodes = 0;
    let (score, best_move) = alpha_beta(
        board,
        &sides,
        sides.root_maximizing,
        i32::MIN,
        i32::MAX,
        0,
        &mut nodes,
    );
    SearchResult {
        score,
        best_move,
        nodes,
    }
}

/// Plain minimax without pruning. Same move order and tie-breaking as
/// [`alpha_beta_search`]; used to cross-check it.
pub fn minimax(board: &Board, sides: SearchSides) -> SearchResult {
    let mut nodes = 0;
    let (score, best_move) = minimax_node(board, &sides, sides.root_maximizing, 0, &mut nodes);
    SearchResult {
        score,
        best_move,
        nodes,
    }
}

fn alpha_beta(
    board: &Board,
    sides: &SearchSides,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    depth: usize,
    nodes: &mut u64,
) -> (i32, Option<Move>) {
    *nodes += 1;
    if let Some(score) = terminal_score(board) {
        return (score, None);
    }
    if depth >= MAX_SEARCH_DEPTH {
        return (DRAW, None);
    }

    let mover = sides.mover(maximizing);
    let mut best_move = None;

    if maximizing {
        let mut max_eval = i32::MIN;
        for mv in board.legal_moves() {
            let Ok(child) = board.with_move(mv, mover) else {
                continue;
            };
            let (eval, _) = alpha_beta(&child, sides, false, alpha, beta, depth + 1, nodes);
            if eval > max_eval {
                max_eval = eval;
                best_move = Some(mv);
            }
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        (max_eval, best_move)
    } else {
        let mut min_eval = i32::MAX;
        for mv in board.legal_moves() {
            let Ok(child) = board.with_move(mv, mover) else {
                continue;
            };
            let (eval, _) = alpha_beta(&child, sides, true, alpha, beta, depth + 1, nodes);
            if eval < min_eval {
                min_eval = eval;
                best_move = Some(mv);
            }
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        (min_eval, best_move)
    }
}

fn minimax_node(
    board: &Board,
    sides: &SearchSides,
    maximizing: bool,
    depth: usize,
    nodes: &mut u64,
) -> (i32, Option<Move>) {
    *nodes += 1;
    if let Some(score) = terminal_score(board) {
        return (score, None);
    }
    if depth >= MAX_SEARCH_DEPTH {
        return (DRAW, None);
    }

    let mover = sides.mover(maximizing);
    let mut best: Option<(i32, Move)> = None;
    for mv in board.legal_moves() {
        let Ok(child) = board.with_move(mv, mover) else {
            continue;
        };
        let (eval, _) = minimax_node(&child, sides, !maximizing, depth + 1, nodes);
        let improves = match best {
            None => true,
            Some((b, _)) if maximizing => eval > b,
            Some((b, _)) => eval < b,
        };
        if improves {
            best = Some((eval, mv));
        }
    }
    match best {
        Some((score, mv)) => (score, Some(mv)),
        None => (DRAW, None),
    }
}

/// Root branches are independent searches over owned board copies, so they
/// can run on the rayon pool. Each branch gets a full window; the first
/// extremal branch in row-major order wins, which matches the sequential
/// result exactly.
fn parallel_root_search(board: &Board, sides: SearchSides) -> SearchResult {
    if let Some(score) = terminal_score(board) {
        return SearchResult {
            score,
            best_move: None,
            nodes: 1,
        };
    }

    let maximizing = sides.root_maximizing;
    let mover = sides.mover(maximizing);
    let branches: Vec<Option<(Move, i32, u64)>> = board
        .legal_moves()
        .into_par_iter()
        .map(|mv| {
            let child = board.with_move(mv, mover).ok()?;
            let mut nodes = 0;
            let (score, _) = alpha_beta(
                &child,
                &sides,
                !maximizing,
                i32::MIN,
                i32::MAX,
                1,
                &mut nodes,
            );
            Some((mv, score, nodes))
        })
        .collect();

    let mut result = SearchResult {
        score: if maximizing { i32::MIN } else { i32::MAX },
        best_move: None,
        nodes: 1,
    };
    for (mv, score, nodes) in branches.into_iter().flatten() {
        result.nodes += nodes;
        let improves = if maximizing {
            score > result.score
        } else {
            score < result.score
        };
        if improves {
            result.score = score;
            result.best_move = Some(mv);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second_fixed() -> SearchSides {
        SearchSides::new(Player::Second, RootOrientation::Fixed)
    }

    #[test]
    fn test_sides_fixed_orientation() {
        let sides = SearchSides::new(Player::Second, RootOrientation::Fixed);
        assert_eq!(sides.maximizer, Player::First);
        assert_eq!(sides.minimizer, Player::Second);
        assert!(!sides.root_maximizing);

        // Not symmetric: controlling First still roots at the minimizer.
        let sides = SearchSides::new(Player::First, RootOrientation::Fixed);
        assert_eq!(sides.maximizer, Player::Second);
        assert_eq!(sides.minimizer, Player::First);
        assert!(!sides.root_maximizing);
    }

    #[test]
    fn test_sides_side_to_move_orientation() {
        let sides = SearchSides::new(Player::First, RootOrientation::SideToMove);
        assert_eq!(sides.maximizer, Player::First);
        assert!(sides.root_maximizing);
        let sides = SearchSides::new(Player::Second, RootOrientation::SideToMove);
        assert_eq!(sides, second_fixed());
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let board: Board = "XXX/OO./...".parse().unwrap();
        let result = alpha_beta_search(&board, second_fixed(), false);
        assert_eq!(result.score, 1);
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_takes_immediate_win() {
        // Second to move with two in the middle row.
        let board: Board = "XX./OO./X..".parse().unwrap();
        let result = alpha_beta_search(&board, second_fixed(), false);
        assert_eq!(result.best_move, Some(Move::new(1, 2)));
        assert_eq!(result.score, -1);
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let board: Board = "X../.../...".parse().unwrap();
        let pruned = alpha_beta_search(&board, second_fixed(), false);
        let full = minimax(&board, second_fixed());
        assert_eq!(pruned.score, full.score);
        assert_eq!(pruned.best_move, full.best_move);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn test_parallel_root_matches_sequential() {
        for s in ["X../.../...", ".../.X./...", "XO./.X./...", "X.O/.../..."] {
            let board: Board = s.parse().unwrap();
            let sides = if board.occupied_count() % 2 == 0 {
                SearchSides::new(Player::First, RootOrientation::SideToMove)
            } else {
                second_fixed()
            };
            let seq = alpha_beta_search(&board, sides, false);
            let par = alpha_beta_search(&board, sides, true);
            assert_eq!(seq.score, par.score, "board {s}");
            assert_eq!(seq.best_move, par.best_move, "board {s}");
        }
    }

    #[test]
    fn test_empty_board_value_is_draw() {
        let sides = SearchSides::new(Player::First, RootOrientation::SideToMove);
        let result = alpha_beta_search(&Board::new(), sides, false);
        assert_eq!(result.score, 0);
        assert!(result.best_move.is_some());
    }
}
