//! Engine error types with their on-chain error codes.

use crate::ledger::InsufficientFunds;
use derive_more::{Display, Error, From};

/// Failure of a mutating engine call.
///
/// Every constraint is checked before any state mutation or fund
/// transfer, so a returned error means the call left no trace. Each
/// variant maps to the numeric code the contract reports on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum EngineError {
    /// Bet amount is zero (code 100).
    #[display("bet amount must be greater than zero")]
    InvalidBet,

    /// Move index out of range, mark not X or O, mark not the caller's,
    /// or cell already occupied (code 101).
    #[display("invalid move")]
    InvalidMove,

    /// Referenced game id has no record (code 102).
    #[display("game not found")]
    GameNotFound,

    /// Join attempted on a game that already has a second player, or by
    /// the creator (code 103).
    #[display("game already joined")]
    AlreadyJoined,

    /// Play attempted by the player not currently on turn (code 104).
    #[display("not your turn")]
    NotYourTurn,

    /// Play or timeout claim attempted on a terminal game (code 105).
    #[display("game already finished")]
    GameAlreadyFinished,

    /// Timeout claim before the block-height threshold elapsed
    /// (code 106).
    #[display("timeout not reached")]
    TimeoutNotReached,

    /// Timeout claim by someone other than the eligible player
    /// (code 107).
    #[display("not the opponent")]
    NotOpponent,

    /// Bet escrow transfer could not be funded (code 1, the host
    /// chain's stx-transfer failure).
    #[display("{_0}")]
    #[from]
    InsufficientFunds(InsufficientFunds),
}

impl EngineError {
    /// The numeric error code the contract reports for this failure.
    pub fn code(&self) -> u32 {
        match self {
            EngineError::InsufficientFunds(_) => 1,
            EngineError::InvalidBet => 100,
            EngineError::InvalidMove => 101,
            EngineError::GameNotFound => 102,
            EngineError::AlreadyJoined => 103,
            EngineError::NotYourTurn => 104,
            EngineError::GameAlreadyFinished => 105,
            EngineError::TimeoutNotReached => 106,
            EngineError::NotOpponent => 107,
        }
    }
}
