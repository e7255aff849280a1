//! Wallets and world state
//!
//! The world state is an account map keyed by address. Transfers are applied
//! atomically: either both sides change or neither does.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::transaction::Transaction;
use crate::error::StateError;

/// Balance and participation history of one address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Current balance
    pub balance: u64,

    /// Hashes of transactions this wallet sent or received
    pub history: HashSet<String>,
}

/// All wallets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Wallets by address
    pub wallets: HashMap<String, Wallet>,
}

impl WorldState {
    /// Create an empty world state
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an address (zero if unknown)
    pub fn balance(&self, address: &str) -> u64 {
        self.wallets.get(address).map_or(0, |w| w.balance)
    }

    /// Wallet of an address, if it ever held funds
    pub fn wallet(&self, address: &str) -> Option<&Wallet> {
        self.wallets.get(address)
    }

    /// Sum of all balances
    pub fn total_supply(&self) -> u128 {
        self.wallets.values().map(|w| u128::from(w.balance)).sum()
    }

    /// Grant funds outside of any transaction (genesis allocation)
    pub fn credit(&mut self, address: &str, amount: u64) -> Result<(), StateError> {
        let wallet = self.wallets.entry(address.to_string()).or_default();
        wallet.balance = wallet
            .balance
            .checked_add(amount)
            .ok_or_else(|| StateError::BalanceOverflow {
                address: address.to_string(),
            })?;
        Ok(())
    }

    /// Check that a transfer could be applied without changing anything
    pub fn check(&self, tx: &Transaction) -> Result<(), StateError> {
        let balance = self.balance(&tx.sender);
        if balance < tx.amount {
            return Err(StateError::InsufficientFunds {
                address: tx.sender.clone(),
                balance,
                needed: tx.amount,
            });
        }

        if tx.sender != tx.receiver && self.balance(&tx.receiver).checked_add(tx.amount).is_none()
        {
            return Err(StateError::BalanceOverflow {
                address: tx.receiver.clone(),
            });
        }

        Ok(())
    }

    /// Apply a transfer identified by `hash`
    pub fn apply(&mut self, hash: &str, tx: &Transaction) -> Result<(), StateError> {
        self.check(tx)?;

        let sender = self.wallets.entry(tx.sender.clone()).or_default();
        sender.balance -= tx.amount;
        sender.history.insert(hash.to_string());

        let receiver = self.wallets.entry(tx.receiver.clone()).or_default();
        receiver.balance += tx.amount;
        receiver.history.insert(hash.to_string());

        tracing::debug!(
            "Applied {hash}: {} -> {} ({})",
            short(&tx.sender),
            short(&tx.receiver),
            tx.amount
        );
        Ok(())
    }
}

fn short(address: &str) -> &str {
    address.get(..12).unwrap_or(address)
}
