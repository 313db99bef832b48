//! Domain types for tic-tac-toe.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const SIZE: usize = 3;
pub const NUM_CELLS: usize = SIZE * SIZE;

/// The two sides. `First` plays crosses and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Mark character used in board text: `X` for First, `O` for Second.
    pub fn symbol(self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "first (X)"),
            Player::Second => write!(f, "second (O)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(p) => p.symbol(),
        }
    }
}

/// A cell address. Both coordinates are in `0..3` for moves produced by the
/// board; user-supplied coordinates are range-checked on application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub column: usize,
}

impl Move {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// One of the eight winning lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Column(usize),
    Row(usize),
    /// (0,0) to (2,2).
    DiagonalDesc,
    /// (2,0) to (0,2).
    DiagonalAsc,
}

/// Lines in the order they are checked: columns, rows, descending diagonal,
/// ascending diagonal.
pub const LINES: [Line; 8] = [
    Line::Column(0),
    Line::Column(1),
    Line::Column(2),
    Line::Row(0),
    Line::Row(1),
    Line::Row(2),
    Line::DiagonalDesc,
    Line::DiagonalAsc,
];

impl Line {
    pub fn cells(self) -> [Move; 3] {
        match self {
            Line::Column(c) => [Move::new(0, c), Move::new(1, c), Move::new(2, c)],
            Line::Row(r) => [Move::new(r, 0), Move::new(r, 1), Move::new(r, 2)],
            Line::DiagonalDesc => [Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)],
            Line::DiagonalAsc => [Move::new(2, 0), Move::new(1, 1), Move::new(0, 2)],
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Column(c) => write!(f, "column {c}"),
            Line::Row(r) => write!(f, "row {r}"),
            Line::DiagonalDesc => write!(f, "descending diagonal"),
            Line::DiagonalAsc => write!(f, "ascending diagonal"),
        }
    }
}

/// Result of evaluating a board. Never stored on the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win(Player, Line),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(p, _) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Win(p, line) => write!(f, "{p} wins on {line}"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
