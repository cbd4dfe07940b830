//! The authoritative game engine.
//!
//! A deterministic state machine keyed by an incrementing game id. Each
//! mutating call models one on-chain transaction: it mines a block,
//! checks every constraint before touching state, and commits board
//! mutation, escrow movement, and statistics together or not at all.

mod error;
mod game;
mod stats;

pub use error::EngineError;
pub use game::{Game, MoveRecord};
pub use stats::{PlayerStats, StatsLedger};

use crate::board::{Board, Mark, Position, rules};
use crate::ledger::{Principal, StxLedger};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Blocks that must elapse since the last accepted move before a
/// timeout claim is eligible.
pub const TIMEOUT_BLOCKS: u64 = 10;

/// The wager-backed tic-tac-toe engine.
///
/// Holds every game ever created (games are permanent records), the
/// per-player statistics ledger, and the STX ledger escrowing bets
/// under the engine's own contract principal.
#[derive(Debug, Clone)]
pub struct GameEngine {
    contract: Principal,
    ledger: StxLedger,
    games: HashMap<u64, Game>,
    next_game_id: u64,
    stats: StatsLedger,
    block_height: u64,
}

impl GameEngine {
    /// Creates an engine whose escrow custody lives under `contract`.
    #[instrument]
    pub fn new(contract: Principal) -> Self {
        info!(%contract, "Creating game engine");
        Self {
            contract,
            ledger: StxLedger::new(),
            games: HashMap::new(),
            next_game_id: 0,
            stats: StatsLedger::new(),
            block_height: 0,
        }
    }

    /// The principal holding escrowed bets.
    pub fn contract(&self) -> &Principal {
        &self.contract
    }

    /// Current block height.
    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    /// Mines `count` empty blocks. Only timeout eligibility observes
    /// the height.
    #[instrument(skip(self))]
    pub fn advance_blocks(&mut self, count: u64) {
        self.block_height += count;
        debug!(height = self.block_height, "Advanced block height");
    }

    /// Credits an account on the backing ledger.
    pub fn fund(&mut self, account: &Principal, amount: u128) {
        self.ledger.mint(account, amount);
    }

    /// Balance held by an account.
    pub fn balance_of(&self, account: &Principal) -> u128 {
        self.ledger.balance_of(account)
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutating operations
    // ─────────────────────────────────────────────────────────────

    /// Creates a game: escrows the caller's bet, places their opening X,
    /// and allocates the next sequential game id.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidBet`] for a zero bet,
    /// [`EngineError::InvalidMove`] for a bad index, mark, or occupied
    /// cell, [`EngineError::InsufficientFunds`] if the bet cannot be
    /// escrowed. No id is allocated and no funds move on failure.
    #[instrument(skip(self), fields(caller = %caller))]
    pub fn create_game(
        &mut self,
        caller: &Principal,
        bet_amount: u128,
        move_index: u8,
        mark_code: u8,
    ) -> Result<u64, EngineError> {
        self.block_height += 1;

        if bet_amount == 0 {
            warn!("Rejected zero bet");
            return Err(EngineError::InvalidBet);
        }

        let mut game = Game::open(caller.clone(), bet_amount, self.block_height);
        let (pos, mark) = validate_move(game.board(), move_index, mark_code, Mark::X)?;

        self.ledger.transfer(caller, &self.contract, bet_amount)?;
        game.apply_move(pos, mark, self.block_height);

        let game_id = self.next_game_id;
        self.next_game_id += 1;
        self.games.insert(game_id, game);

        info!(game_id, bet_amount, "Game created");
        Ok(game_id)
    }

    /// Joins an open game: escrows the matching bet, seats the caller
    /// as player two, and applies their opening O.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameNotFound`] for an unknown id,
    /// [`EngineError::AlreadyJoined`] if a second player is seated or
    /// the creator tries to join their own game,
    /// [`EngineError::InvalidMove`] / [`EngineError::InsufficientFunds`]
    /// as for [`GameEngine::create_game`].
    #[instrument(skip(self), fields(caller = %caller))]
    pub fn join_game(
        &mut self,
        caller: &Principal,
        game_id: u64,
        move_index: u8,
        mark_code: u8,
    ) -> Result<u64, EngineError> {
        self.block_height += 1;

        let mut game = self
            .games
            .get(&game_id)
            .cloned()
            .ok_or(EngineError::GameNotFound)?;

        if !game.is_open() {
            warn!(game_id, "Join rejected: game already has two players");
            return Err(EngineError::AlreadyJoined);
        }
        if caller == game.player_one() {
            warn!(game_id, "Join rejected: creator cannot join own game");
            return Err(EngineError::AlreadyJoined);
        }

        let (pos, mark) = validate_move(game.board(), move_index, mark_code, Mark::O)?;

        self.ledger.transfer(caller, &self.contract, *game.bet_amount())?;
        game.seat_player_two(caller.clone());
        game.apply_move(pos, mark, self.block_height);
        self.settle_if_terminal(game_id, &mut game)?;

        self.games.insert(game_id, game);
        info!(game_id, "Player two joined");
        Ok(game_id)
    }

    /// Applies one move by the player on turn, then settles the game if
    /// the move completed a line or filled the board.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameNotFound`],
    /// [`EngineError::GameAlreadyFinished`] on a terminal game,
    /// [`EngineError::NotYourTurn`] if the caller is not the seat the
    /// turn flag points at, and [`EngineError::InvalidMove`] for a bad
    /// index, a mark other than the caller's own, or an occupied cell.
    #[instrument(skip(self), fields(caller = %caller))]
    pub fn play(
        &mut self,
        caller: &Principal,
        game_id: u64,
        move_index: u8,
        mark_code: u8,
    ) -> Result<u64, EngineError> {
        self.block_height += 1;

        let mut game = self
            .games
            .get(&game_id)
            .cloned()
            .ok_or(EngineError::GameNotFound)?;

        if *game.finished() {
            return Err(EngineError::GameAlreadyFinished);
        }

        let expected_mark = match game.on_turn() {
            Some((player, mark)) if player == caller => mark,
            _ => {
                warn!(game_id, "Play rejected: not caller's turn");
                return Err(EngineError::NotYourTurn);
            }
        };

        let (pos, mark) = validate_move(game.board(), move_index, mark_code, expected_mark)?;

        game.apply_move(pos, mark, self.block_height);
        self.settle_if_terminal(game_id, &mut game)?;

        self.games.insert(game_id, game);
        Ok(game_id)
    }

    /// Force-settles a stalled game once [`TIMEOUT_BLOCKS`] have
    /// elapsed since the last accepted move. The eligible claimant is
    /// the player the turn flag points at; they take the full pot and
    /// the game records a timeout win. Board and move log are left
    /// exactly as last recorded.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameNotFound`],
    /// [`EngineError::GameAlreadyFinished`] on a terminal game,
    /// [`EngineError::TimeoutNotReached`] before the threshold, and
    /// [`EngineError::NotOpponent`] for any other caller.
    #[instrument(skip(self), fields(caller = %caller))]
    pub fn claim_timeout(&mut self, caller: &Principal, game_id: u64) -> Result<u64, EngineError> {
        self.block_height += 1;

        let mut game = self
            .games
            .get(&game_id)
            .cloned()
            .ok_or(EngineError::GameNotFound)?;

        if *game.finished() {
            return Err(EngineError::GameAlreadyFinished);
        }

        let elapsed = self.block_height - game.last_move_block_height();
        if elapsed < TIMEOUT_BLOCKS {
            debug!(game_id, elapsed, "Timeout claim too early");
            return Err(EngineError::TimeoutNotReached);
        }

        let claimant_mark = match game.on_turn() {
            Some((player, mark)) if player == caller => mark,
            _ => {
                warn!(game_id, "Timeout claim rejected: caller not eligible");
                return Err(EngineError::NotOpponent);
            }
        };

        // on_turn only yields a mark whose opponent seat is filled once
        // the game has two players, and a one-player game never gets
        // past the claimant check above.
        let loser = game
            .mark_owner(claimant_mark.opponent())
            .cloned()
            .expect("joined game has both players");

        let pot = 2 * game.bet_amount();
        let contract = self.contract.clone();
        self.ledger.transfer(&contract, caller, pot)?;
        game.finish_with_winner(caller.clone());
        self.stats.record_result(caller, &loser, pot);

        self.games.insert(game_id, game);
        info!(game_id, elapsed, pot, "Timeout claimed");
        Ok(game_id)
    }

    /// Runs win/draw detection after an accepted move and, when the
    /// game is terminal, pays out the escrow and updates both players'
    /// statistics in the same call.
    fn settle_if_terminal(&mut self, game_id: u64, game: &mut Game) -> Result<(), EngineError> {
        let pot = 2 * game.bet_amount();
        let contract = self.contract.clone();

        if let Some(mark) = rules::check_winner(game.board()) {
            // A line needs three of one mark, which requires both
            // players to have moved.
            let winner = game
                .mark_owner(mark)
                .cloned()
                .expect("winning mark has an owner");
            let loser = game
                .mark_owner(mark.opponent())
                .cloned()
                .expect("finished game has both players");

            self.ledger.transfer(&contract, &winner, pot)?;
            game.finish_with_winner(winner.clone());
            self.stats.record_result(&winner, &loser, pot);
            info!(game_id, %winner, pot, "Game won");
            return Ok(());
        }

        if rules::is_full(game.board()) {
            let player_one = game.player_one().clone();
            let player_two = game
                .player_two()
                .clone()
                .expect("full board requires both players");

            // Two separate refunds, one bet each.
            self.ledger.transfer(&contract, &player_one, *game.bet_amount())?;
            self.ledger.transfer(&contract, &player_two, *game.bet_amount())?;
            game.finish_drawn();
            self.stats.record_draw(&player_one, &player_two);
            info!(game_id, "Game drawn, bets refunded");
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Read operations
    // ─────────────────────────────────────────────────────────────

    /// The game with the given id, if it was ever created.
    pub fn get_game(&self, game_id: u64) -> Option<&Game> {
        self.games.get(&game_id)
    }

    /// The next game id to be allocated. Games span ids
    /// `0..latest_game_id()`.
    pub fn latest_game_id(&self) -> u64 {
        self.next_game_id
    }

    /// Every game ever created, ordered by id.
    pub fn get_all_games(&self) -> Vec<&Game> {
        (0..self.next_game_id)
            .filter_map(|id| self.games.get(&id))
            .collect()
    }

    /// Stats for a player, absent until they complete a game.
    pub fn get_player_stats(&self, player: &Principal) -> Option<&PlayerStats> {
        self.stats.get(player)
    }

    /// Stats for every known player, in first-completion order.
    pub fn get_all_player_stats(&self) -> Vec<PlayerStats> {
        self.stats.all()
    }
}

/// Validates a raw move against the board: index in range, mark decodes
/// and matches the mover's seat, target cell empty.
fn validate_move(
    board: &Board,
    move_index: u8,
    mark_code: u8,
    expected: Mark,
) -> Result<(Position, Mark), EngineError> {
    let pos = Position::from_index(move_index as usize).ok_or(EngineError::InvalidMove)?;
    let mark = Mark::from_code(mark_code).ok_or(EngineError::InvalidMove)?;
    if mark != expected {
        return Err(EngineError::InvalidMove);
    }
    if !board.is_empty(pos) {
        return Err(EngineError::InvalidMove);
    }
    Ok((pos, mark))
}
