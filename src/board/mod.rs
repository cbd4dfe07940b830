//! Pure tic-tac-toe board domain: marks, cells, positions, and the
//! win/draw rules that settle a game.

mod position;
pub mod rules;
mod types;

pub use position::Position;
pub use types::{Board, Cell, Mark};
