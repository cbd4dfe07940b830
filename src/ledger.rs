//! Principals and the STX balance ledger backing bet escrow.
//!
//! Every mutating engine call that moves funds goes through
//! [`StxLedger::transfer`], and the engine only commits game state after
//! the transfer succeeds, so settlement and custody always agree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// An opaque account identifier (a principal on the host chain).
///
/// Principals are compared by equality only; the engine never inspects
/// their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub struct Principal(String);

impl Principal {
    /// Creates a principal from its address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The underlying address string.
    pub fn address(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

/// Error raised when a transfer cannot be funded.
///
/// Carries code 1, the host chain's stx-transfer failure code.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("insufficient funds: {from} holds {available} uSTX, transfer needs {amount}")]
pub struct InsufficientFunds {
    /// The debited principal.
    pub from: Principal,
    /// Balance held by the debited principal.
    pub available: u128,
    /// Amount the transfer required.
    pub amount: u128,
}

/// In-memory STX balance ledger.
///
/// Amounts are unsigned integers in micro-STX, the smallest settlement
/// unit. Transfers are all-or-nothing: a failed debit leaves both
/// accounts untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StxLedger {
    balances: HashMap<Principal, u128>,
}

impl StxLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits an account, creating it if absent.
    #[instrument(skip(self))]
    pub fn mint(&mut self, account: &Principal, amount: u128) {
        let balance = self.balances.entry(account.clone()).or_insert(0);
        *balance += amount;
        debug!(%account, amount, balance = *balance, "Minted funds");
    }

    /// Returns the balance held by an account (zero if never seen).
    pub fn balance_of(&self, account: &Principal) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Moves `amount` from one account to another.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientFunds`] if the debited account holds less
    /// than `amount`; no balance changes in that case.
    #[instrument(skip(self))]
    pub fn transfer(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: u128,
    ) -> Result<(), InsufficientFunds> {
        let available = self.balance_of(from);
        if available < amount {
            warn!(%from, available, amount, "Transfer rejected");
            return Err(InsufficientFunds {
                from: from.clone(),
                available,
                amount,
            });
        }

        *self.balances.entry(from.clone()).or_insert(0) -= amount;
        *self.balances.entry(to.clone()).or_insert(0) += amount;
        debug!(%from, %to, amount, "Transfer applied");
        Ok(())
    }
}
