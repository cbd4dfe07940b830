//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Mark, Position};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Scans the 8 winning lines (3 rows, 3 columns, 2 diagonals) and
/// returns `Some(mark)` if one mark fully occupies a line.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    const LINES: [[Position; 3]; 8] = [
        // Rows
        [Position::TopLeft, Position::TopCenter, Position::TopRight],
        [
            Position::MiddleLeft,
            Position::Center,
            Position::MiddleRight,
        ],
        [
            Position::BottomLeft,
            Position::BottomCenter,
            Position::BottomRight,
        ],
        // Columns
        [
            Position::TopLeft,
            Position::MiddleLeft,
            Position::BottomLeft,
        ],
        [
            Position::TopCenter,
            Position::Center,
            Position::BottomCenter,
        ],
        [
            Position::TopRight,
            Position::MiddleRight,
            Position::BottomRight,
        ],
        // Diagonals
        [Position::TopLeft, Position::Center, Position::BottomRight],
        [Position::TopRight, Position::Center, Position::BottomLeft],
    ];

    for [a, b, c] in LINES {
        let cell = board.get(a);
        if cell != Cell::Empty && cell == board.get(b) && cell == board.get(c) {
            return match cell {
                Cell::Taken(mark) => Some(mark),
                Cell::Empty => None,
            };
        }
    }

    None
}
