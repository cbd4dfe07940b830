//! Contract-call descriptors for the surrounding application.
//!
//! The engine's consumers never call the state machine directly: they
//! build a descriptor naming the contract function and its uint
//! arguments, sign it, and broadcast it. These builders mirror the
//! deployed contract's public functions one for one.

use crate::engine::Game;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Name of the deployed game contract.
pub const CONTRACT_NAME: &str = "stacks-xox-game";

/// One argument of a contract call, wire-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxArg {
    /// An unsigned integer argument.
    Uint(u128),
}

/// A contract call ready for signing and broadcast.
///
/// Submission alone proves nothing: callers must inspect the call's
/// result, not the broadcast, to learn whether the engine accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TxDescriptor {
    /// Contract the call targets.
    contract: String,
    /// Public function to invoke.
    function: String,
    /// Positional arguments, in wire encoding.
    args: Vec<TxArg>,
}

impl TxDescriptor {
    fn call(function: &str, args: Vec<TxArg>) -> Self {
        Self {
            contract: CONTRACT_NAME.to_string(),
            function: function.to_string(),
            args,
        }
    }
}

/// Why a rematch descriptor could not be built.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RematchError {
    /// The original game has no winner yet.
    #[display("game must be settled with a winner before a rematch")]
    Unsettled,
    /// The original game carries no stake to rematch for.
    #[display("invalid bet amount for rematch")]
    InvalidBet,
}

/// Builds a `create-game` call: bet amount plus the opening move.
#[instrument]
pub fn create_game(bet_amount: u128, move_index: u8, mark_code: u8) -> TxDescriptor {
    TxDescriptor::call(
        "create-game",
        vec![
            TxArg::Uint(bet_amount),
            TxArg::Uint(move_index as u128),
            TxArg::Uint(mark_code as u128),
        ],
    )
}

/// Builds a `join-game` call for an open game.
#[instrument]
pub fn join_game(game_id: u64, move_index: u8, mark_code: u8) -> TxDescriptor {
    TxDescriptor::call(
        "join-game",
        vec![
            TxArg::Uint(game_id as u128),
            TxArg::Uint(move_index as u128),
            TxArg::Uint(mark_code as u128),
        ],
    )
}

/// Builds a `play` call for an in-progress game.
#[instrument]
pub fn play(game_id: u64, move_index: u8, mark_code: u8) -> TxDescriptor {
    TxDescriptor::call(
        "play",
        vec![
            TxArg::Uint(game_id as u128),
            TxArg::Uint(move_index as u128),
            TxArg::Uint(mark_code as u128),
        ],
    )
}

/// Builds a `claim-timeout` call.
#[instrument]
pub fn claim_timeout(game_id: u64) -> TxDescriptor {
    TxDescriptor::call("claim-timeout", vec![TxArg::Uint(game_id as u128)])
}

/// Builds a rematch as a fresh `create-game` with the original stake.
///
/// A rematch has no on-chain linkage to the original game: it is an
/// independent record whose roles the players swap by convention. The
/// original must be settled with a winner and carry a positive bet.
///
/// # Errors
///
/// [`RematchError::Unsettled`] if the original has no winner,
/// [`RematchError::InvalidBet`] if its stake is zero.
#[instrument(skip(original))]
pub fn rematch(original: &Game, move_index: u8, mark_code: u8) -> Result<TxDescriptor, RematchError> {
    if original.winner().is_none() {
        return Err(RematchError::Unsettled);
    }
    let bet_amount = *original.bet_amount();
    if bet_amount == 0 {
        return Err(RematchError::InvalidBet);
    }
    Ok(create_game(bet_amount, move_index, mark_code))
}
