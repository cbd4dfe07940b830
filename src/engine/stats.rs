//! Per-player statistics ledger.

use crate::ledger::Principal;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Lifetime statistics for one player.
///
/// Created lazily the first time a player completes a game. A draw
/// bumps `games_played` only, so
/// `games_played == wins + losses + draws` holds with draws implied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters,
)]
#[serde(rename_all = "kebab-case")]
pub struct PlayerStats {
    /// Games won, including timeout wins.
    wins: u64,
    /// Games lost, including timeout losses.
    losses: u64,
    /// Cumulative micro-STX won across all games.
    stx_won: u128,
    /// Total finished games this player took part in.
    games_played: u64,
}

impl PlayerStats {
    fn record_win(&mut self, pot: u128) {
        self.wins += 1;
        self.stx_won += pot;
        self.games_played += 1;
    }

    fn record_loss(&mut self) {
        self.losses += 1;
        self.games_played += 1;
    }

    fn record_draw(&mut self) {
        self.games_played += 1;
    }
}

/// Insert-or-update stats store keyed by principal.
///
/// Enumeration order is first-completion order, tracked separately from
/// the map as the contract does with its player list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsLedger {
    stats: HashMap<Principal, PlayerStats>,
    order: Vec<Principal>,
}

impl StatsLedger {
    /// Creates an empty stats ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, player: &Principal) -> &mut PlayerStats {
        if !self.stats.contains_key(player) {
            self.order.push(player.clone());
        }
        self.stats.entry(player.clone()).or_default()
    }

    /// Records a settled win for `winner` over `loser` with the full
    /// pot amount.
    #[instrument(skip(self))]
    pub(crate) fn record_result(&mut self, winner: &Principal, loser: &Principal, pot: u128) {
        self.entry(winner).record_win(pot);
        self.entry(loser).record_loss();
        debug!(%winner, %loser, pot, "Recorded win/loss");
    }

    /// Records a draw between the two players.
    #[instrument(skip(self))]
    pub(crate) fn record_draw(&mut self, player_one: &Principal, player_two: &Principal) {
        self.entry(player_one).record_draw();
        self.entry(player_two).record_draw();
        debug!(%player_one, %player_two, "Recorded draw");
    }

    /// Stats for one player, if they completed at least one game.
    pub fn get(&self, player: &Principal) -> Option<&PlayerStats> {
        self.stats.get(player)
    }

    /// All stats in first-completion order.
    pub fn all(&self) -> Vec<PlayerStats> {
        self.order
            .iter()
            .filter_map(|p| self.stats.get(p).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_creation_and_order() {
        let alice = Principal::new("alice");
        let bob = Principal::new("bob");
        let mut ledger = StatsLedger::new();
        assert!(ledger.get(&alice).is_none());

        ledger.record_result(&alice, &bob, 200);
        let all = ledger.all();
        assert_eq!(all.len(), 2);
        assert_eq!(*all[0].wins(), 1);
        assert_eq!(*all[0].stx_won(), 200);
        assert_eq!(*all[1].losses(), 1);
    }

    #[test]
    fn test_draw_bumps_games_played_only() {
        let alice = Principal::new("alice");
        let bob = Principal::new("bob");
        let mut ledger = StatsLedger::new();

        ledger.record_draw(&alice, &bob);
        let stats = ledger.get(&alice).expect("stats created");
        assert_eq!(*stats.wins(), 0);
        assert_eq!(*stats.losses(), 0);
        assert_eq!(*stats.stx_won(), 0);
        assert_eq!(*stats.games_played(), 1);
    }
}
