//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (all cells occupied).
///
/// A full board with no winner settles the game as a draw.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}
