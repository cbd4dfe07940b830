//! Game rules for tic-tac-toe win and draw detection.

mod draw;
mod win;

pub use draw::is_full;
pub use win::check_winner;
