//! Terminal position scoring for the minimax search.

use crate::games::tictactoe::{Board, Outcome, Player};

pub const FIRST_WINS: i32 = 1;
pub const SECOND_WINS: i32 = -1;
pub const DRAW: i32 = 0;

/// Score a board from First's point of view, or `None` while play continues.
/// First is always the maximizing side in scoring.
pub fn terminal_score(board: &Board) -> Option<i32> {
    match board.outcome() {
        Outcome::Win(Player::First, _) => Some(FIRST_WINS),
        Outcome::Win(Player::Second, _) => Some(SECOND_WINS),
        Outcome::Draw => Some(DRAW),
        Outcome::Ongoing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_scores() {
        let first: Board = "XXX/OO./...".parse().unwrap();
        let second: Board = "XX./OOO/X..".parse().unwrap();
        let draw: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(terminal_score(&first), Some(FIRST_WINS));
        assert_eq!(terminal_score(&second), Some(SECOND_WINS));
        assert_eq!(terminal_score(&draw), Some(DRAW));
        assert_eq!(terminal_score(&Board::new()), None);
    }

    #[test]
    fn test_full_board_with_line_scores_the_win() {
        let board: Board = "XOX/OXO/XOX".parse().unwrap();
        assert!(board.is_full());
        assert_eq!(terminal_score(&board), Some(FIRST_WINS));
    }
}
