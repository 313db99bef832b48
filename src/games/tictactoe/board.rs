//! Board state: a fixed 3x3 grid plus a cached occupied-cell count.
//!
//! The board is `Copy`, so search code branches by value instead of undoing
//! moves.

use std::fmt;
use std::str::FromStr;

use super::types::{Cell, Line, Move, Outcome, Player, LINES, NUM_CELLS, SIZE};
use crate::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
    /// Always equals the number of non-empty cells.
    occupied: u8,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `player`'s mark. Fails without touching the board when the cell
    /// is out of range or already occupied.
    pub fn apply_move(&mut self, row: usize, column: usize, player: Player) -> Result<()> {
        if row >= SIZE || column >= SIZE {
            return Err(GameError::OutOfBounds { row, column });
        }
        if !self.cells[row][column].is_empty() {
            return Err(GameError::InvalidMove { row, column });
        }
        self.cells[row][column] = Cell::Occupied(player);
        self.occupied += 1;
        Ok(())
    }

    /// Copy of the board with `mv` applied.
    pub fn with_move(&self, mv: Move, player: Player) -> Result<Board> {
        let mut next = *self;
        next.apply_move(mv.row, mv.column, player)?;
        Ok(next)
    }

    pub fn is_cell_empty(&self, row: usize, column: usize) -> bool {
        row < SIZE && column < SIZE && self.cells[row][column].is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Empty cells in row-major order. Search tie-breaking and seeded random
    /// selection both depend on this order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(NUM_CELLS - self.occupied_count());
        for (row, cells) in self.cells.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                if cell.is_empty() {
                    moves.push(Move::new(row, column));
                }
            }
        }
        moves
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied as usize
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == NUM_CELLS
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    /// First completed line in check order, with its owner.
    pub fn winning_line(&self) -> Option<(Player, Line)> {
        LINES.iter().find_map(|&line| {
            let [a, b, c] = line.cells().map(|m| self.cells[m.row][m.column]);
            match a {
                Cell::Occupied(p) if a == b && a == c => Some((p, line)),
                _ => None,
            }
        })
    }

    pub fn outcome(&self) -> Outcome {
        if let Some((player, line)) = self.winning_line() {
            Outcome::Win(player, line)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Parses nine cell characters (`X`, `O`, `.`) in row-major order. Whitespace
/// and `/` row separators are ignored, so `"XO./.X./..O"` is accepted.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != NUM_CELLS {
            return Err(GameError::InvalidBoardLength {
                expected: NUM_CELLS,
                got: chars.len(),
            });
        }

        let mut board = Board::new();
        for (position, &ch) in chars.iter().enumerate() {
            let player = match ch {
                'X' | 'x' => Player::First,
                'O' | 'o' => Player::Second,
                '.' | '-' | '_' => continue,
                other => {
                    return Err(GameError::InvalidCellCharacter {
                        character: other,
                        position,
                    })
                }
            };
            board.apply_move(position / SIZE, position % SIZE, player)?;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let b = Board::new();
        assert!(b.is_empty());
        assert!(!b.is_full());
        assert_eq!(b.occupied_count(), 0);
        assert_eq!(b.outcome(), Outcome::Ongoing);
    }

    #[test]
    fn test_legal_moves_row_major_on_empty_board() {
        let moves = Board::new().legal_moves();
        let expected: Vec<Move> = (0..3)
            .flat_map(|r| (0..3).map(move |c| Move::new(r, c)))
            .collect();
        assert_eq!(moves, expected);
        assert_eq!(moves[0], Move::new(0, 0));
        assert_eq!(moves[3], Move::new(1, 0));
        assert_eq!(moves[8], Move::new(2, 2));
    }

    #[test]
    fn test_legal_moves_skip_occupied() {
        let b = board("X.O/.X./O..");
        assert_eq!(
            b.legal_moves(),
            vec![
                Move::new(0, 1),
                Move::new(1, 0),
                Move::new(1, 2),
                Move::new(2, 1),
                Move::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_apply_move_increments_count() {
        let mut b = Board::new();
        b.apply_move(1, 1, Player::First).unwrap();
        assert_eq!(b.occupied_count(), 1);
        assert_eq!(b.cell(1, 1), Some(Cell::Occupied(Player::First)));
        assert!(!b.is_cell_empty(1, 1));
        assert!(!b.is_empty());
    }

    #[test]
    fn test_apply_move_on_occupied_cell_fails_without_change() {
        let mut b = Board::new();
        b.apply_move(0, 2, Player::First).unwrap();
        let before = b;
        let err = b.apply_move(0, 2, Player::Second).unwrap_err();
        assert_eq!(err, GameError::InvalidMove { row: 0, column: 2 });
        assert_eq!(b, before);
        assert_eq!(b.occupied_count(), 1);
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let mut b = Board::new();
        assert_eq!(
            b.apply_move(3, 0, Player::First),
            Err(GameError::OutOfBounds { row: 3, column: 0 })
        );
        assert!(b.is_empty());
        assert!(!b.is_cell_empty(0, 5));
        assert_eq!(b.cell(0, 5), None);
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let b = Board::new();
        let next = b.with_move(Move::new(2, 1), Player::Second).unwrap();
        assert!(b.is_empty());
        assert_eq!(next.occupied_count(), 1);
    }

    #[test]
    fn test_win_on_each_line() {
        let cases = [
            ("X../X../X..", Line::Column(0)),
            (".O./.O./.O.", Line::Column(1)),
            ("..X/..X/..X", Line::Column(2)),
            ("OOO/.../...", Line::Row(0)),
            (".../XXX/...", Line::Row(1)),
            (".../.../OOO", Line::Row(2)),
            ("X../.X./..X", Line::DiagonalDesc),
            ("..O/.O./O..", Line::DiagonalAsc),
        ];
        for (s, line) in cases {
            let b = board(s);
            let winner = b.winning_line().map(|(p, _)| p).unwrap();
            assert_eq!(b.outcome(), Outcome::Win(winner, line), "board {s}");
        }
    }

    #[test]
    fn test_columns_reported_before_rows() {
        // Column 0 and row 0 both complete for X.
        let b = board("XXX/X.O/XOO");
        assert_eq!(b.outcome(), Outcome::Win(Player::First, Line::Column(0)));
    }

    #[test]
    fn test_descending_diagonal_reported_before_ascending() {
        let b = board("X.X/.X./X.X");
        assert_eq!(
            b.outcome(),
            Outcome::Win(Player::First, Line::DiagonalDesc)
        );
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let b = board("XOX/XOO/OXX");
        assert!(b.is_full());
        assert_eq!(b.outcome(), Outcome::Draw);
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let b = board("XOX/OXO/OXX");
        assert!(b.is_full());
        assert_eq!(
            b.outcome(),
            Outcome::Win(Player::First, Line::DiagonalDesc)
        );
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        let b = board("XO./.X./..O");
        assert_eq!(b.to_string(), "XO.\n.X.\n..O");
        assert_eq!(b.to_string().parse::<Board>().unwrap(), b);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(GameError::InvalidBoardLength { expected: 9, got: 2 })
        );
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(GameError::InvalidCellCharacter {
                character: '?',
                position: 2
            })
        );
    }
}
