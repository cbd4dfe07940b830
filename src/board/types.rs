//! Core board types with their on-chain wire encoding.

use super::Position;
use serde::{Deserialize, Serialize};

/// A player's mark.
///
/// Player one always plays X, player two always plays O. On the wire a
/// mark is a uint: 1 for X, 2 for O (0 is an empty cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Player one's mark (wire code 1).
    X,
    /// Player two's mark (wire code 2).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Wire code for this mark.
    pub fn code(self) -> u8 {
        match self {
            Mark::X => 1,
            Mark::O => 2,
        }
    }

    /// Decodes a wire code into a mark. Returns `None` for anything
    /// other than 1 or 2.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Mark::X),
            2 => Some(Mark::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell (wire code 0).
    Empty,
    /// Cell holding a mark.
    Taken(Mark),
}

impl Cell {
    /// Wire code for this cell: 0 empty, 1 X, 2 O.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Taken(mark) => mark.code(),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Cells are write-once: the engine validates emptiness before every
/// [`Board::set`], so a mark is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Sets the cell at the given position.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }

    /// Checks if the cell at the given position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Wire encoding of the board: nine uints in row-major order.
    pub fn codes(&self) -> [u8; 9] {
        let mut codes = [0u8; 9];
        for (code, cell) in codes.iter_mut().zip(self.cells.iter()) {
            *code = cell.code();
        }
        codes
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => ".".to_string(),
                    Cell::Taken(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
