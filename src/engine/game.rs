//! The per-game record held by the engine.

use crate::board::{Board, Cell, Mark, Position};
use crate::ledger::Principal;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One accepted move, as stored in the append-only move log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct MoveRecord {
    /// Board index the mark was placed at (0-8).
    #[serde(rename = "move-index")]
    move_index: u8,
    /// The mark placed.
    #[serde(rename = "move")]
    mark: Mark,
}

/// A single wager-backed game.
///
/// Created by `create-game`, mutated by `join-game`/`play`/
/// `claim-timeout`, and never deleted: a finished game is a permanent
/// historical record. Once `finished` is true the record is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "kebab-case")]
pub struct Game {
    /// Creator of the game; always plays X.
    player_one: Principal,
    /// Second player; set exactly once, at join. Always plays O.
    player_two: Option<Principal>,
    /// Turn flag; flips after every accepted move.
    is_player_one_turn: bool,
    /// Escrowed bet per player, in micro-STX.
    bet_amount: u128,
    /// The 3x3 board.
    board: Board,
    /// Winner, set at most once on win or timeout claim.
    winner: Option<Principal>,
    /// Terminal flag; true on win, draw, or timeout claim.
    finished: bool,
    /// Block height of the last accepted move or join. Only consulted
    /// for timeout eligibility.
    last_move_block_height: u64,
    /// Append-only log of accepted moves in chronological order.
    moves: Vec<MoveRecord>,
}

impl Game {
    /// Creates a fresh record for player one, before their opening move
    /// is applied.
    pub(crate) fn open(player_one: Principal, bet_amount: u128, height: u64) -> Self {
        Self {
            player_one,
            player_two: None,
            // Flips to false once the opening move is applied.
            is_player_one_turn: true,
            bet_amount,
            board: Board::new(),
            winner: None,
            finished: false,
            last_move_block_height: height,
            moves: Vec::new(),
        }
    }

    /// True while the game awaits a second player.
    pub fn is_open(&self) -> bool {
        self.player_two.is_none()
    }

    /// The player the turn flag currently points at, with their mark.
    ///
    /// `None` when the flag points at a seat that is still empty.
    pub fn on_turn(&self) -> Option<(&Principal, Mark)> {
        if self.is_player_one_turn {
            Some((&self.player_one, Mark::X))
        } else {
            self.player_two.as_ref().map(|p| (p, Mark::O))
        }
    }

    /// The principal who owns the given mark.
    pub fn mark_owner(&self, mark: Mark) -> Option<&Principal> {
        match mark {
            Mark::X => Some(&self.player_one),
            Mark::O => self.player_two.as_ref(),
        }
    }

    /// Seats player two. Caller has verified the seat is empty.
    pub(crate) fn seat_player_two(&mut self, player: Principal) {
        self.player_two = Some(player);
    }

    /// Writes a mark, appends it to the move log, stamps the height,
    /// and flips the turn flag. Caller has validated the move.
    pub(crate) fn apply_move(&mut self, pos: Position, mark: Mark, height: u64) {
        self.board.set(pos, Cell::Taken(mark));
        self.moves.push(MoveRecord::new(pos.to_index() as u8, mark));
        self.last_move_block_height = height;
        self.is_player_one_turn = !self.is_player_one_turn;
    }

    /// Marks the game won. The turn flag is left as-is.
    pub(crate) fn finish_with_winner(&mut self, winner: Principal) {
        self.winner = Some(winner);
        self.finished = true;
    }

    /// Marks the game drawn: finished with no winner.
    pub(crate) fn finish_drawn(&mut self) {
        self.finished = true;
    }
}
