//! Wager-backed tic-tac-toe settlement engine.
//!
//! The authoritative state lives in [`GameEngine`], a deterministic
//! state machine keyed by an incrementing game id. Four mutating
//! operations (create, join, play, claim-timeout) each model one atomic
//! on-chain transaction: every constraint is checked before any state
//! or fund movement, and settlement pays out the escrowed pot in the
//! same call that finishes the game.
//!
//! # Architecture
//!
//! - **board**: pure board domain - marks, positions, win/draw rules
//! - **engine**: the state machine, game records, and player statistics
//! - **ledger**: principals and the STX balance ledger escrowing bets
//! - **tx**: contract-call descriptors for the surrounding application
//!
//! # Example
//!
//! ```
//! use xox_engine::{GameEngine, Principal};
//!
//! let mut engine = GameEngine::new(Principal::new("xox-contract"));
//! let alice = Principal::new("alice");
//! let bob = Principal::new("bob");
//! engine.fund(&alice, 1_000);
//! engine.fund(&bob, 1_000);
//!
//! let id = engine.create_game(&alice, 100, 0, 1)?;
//! engine.join_game(&bob, id, 3, 2)?;
//! engine.play(&alice, id, 1, 1)?;
//! engine.play(&bob, id, 4, 2)?;
//! engine.play(&alice, id, 2, 1)?; // X completes the top row
//!
//! let game = engine.get_game(id).unwrap();
//! assert_eq!(game.winner(), &Some(alice));
//! # Ok::<(), xox_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod engine;
mod ledger;
pub mod tx;

// Crate-level exports - board domain
pub use board::{Board, Cell, Mark, Position, rules};

// Crate-level exports - engine
pub use engine::{
    EngineError, Game, GameEngine, MoveRecord, PlayerStats, StatsLedger, TIMEOUT_BLOCKS,
};

// Crate-level exports - ledger
pub use ledger::{InsufficientFunds, Principal, StxLedger};
