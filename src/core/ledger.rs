//! Ledger
//!
//! Combines the DAG and the world state. Every submitted transaction is
//! validated in full before either structure is touched, so a rejected
//! transaction leaves the ledger unchanged.

use crate::core::crypto::{KeyPair, SignatureScheme};
use crate::core::dag::Dag;
use crate::core::ledger_config::LedgerConfig;
use crate::core::state::{Wallet, WorldState};
use crate::core::transaction::{SignedTransaction, Transaction};
use crate::error::LedgerError;

/// DAG ledger with its derived world state
#[derive(Debug, Clone)]
pub struct Ledger {
    config: LedgerConfig,
    dag: Dag,
    state: WorldState,
}

impl Ledger {
    /// Create an empty ledger seeded with the genesis allocations
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        let mut state = WorldState::new();
        for allocation in &config.genesis {
            state.credit(&allocation.address, allocation.balance)?;
        }

        Ok(Self {
            config,
            dag: Dag::new(),
            state,
        })
    }

    /// Rebuild a ledger by submitting `transactions` in order
    ///
    /// Stops at the first invalid transaction and reports its index.
    pub fn replay<I>(
        config: LedgerConfig,
        transactions: I,
        scheme: &SignatureScheme,
    ) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = SignedTransaction>,
    {
        let mut ledger = Self::new(config)?;
        for (index, tx) in transactions.into_iter().enumerate() {
            ledger
                .submit(tx, scheme)
                .map_err(|e| LedgerError::Replay {
                    index,
                    source: Box::new(e),
                })?;
        }
        tracing::debug!("Replayed {} transaction(s)", ledger.len());
        Ok(ledger)
    }

    /// Validate without applying
    pub fn validate(
        &self,
        tx: &SignedTransaction,
        scheme: &SignatureScheme,
    ) -> Result<String, LedgerError> {
        let body = &tx.transaction;

        if body.amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }
        if body.sender == body.receiver {
            return Err(LedgerError::SelfTransfer);
        }
        if body.parents.is_empty() && !self.dag.is_empty() {
            return Err(LedgerError::MissingParents {
                existing: self.dag.len(),
            });
        }
        if body.parents.len() > self.config.max_parents {
            return Err(LedgerError::TooManyParents {
                count: body.parents.len(),
                max: self.config.max_parents,
            });
        }

        tx.verify(scheme)?;
        self.state.check(body)?;

        let hash = tx.hash();
        self.dag.check(&hash, tx)?;
        Ok(hash)
    }

    /// Validate and apply a signed transaction, returning its hash
    pub fn submit(
        &mut self,
        tx: SignedTransaction,
        scheme: &SignatureScheme,
    ) -> Result<String, LedgerError> {
        let hash = self.validate(&tx, scheme)?;

        // Both steps were checked above and cannot fail now.
        self.state.apply(&hash, &tx.transaction)?;
        self.dag.insert(tx)?;

        tracing::info!("Accepted transaction {hash}");
        Ok(hash)
    }

    /// Build, sign and submit a transfer on top of the current tips
    pub fn transfer(
        &mut self,
        scheme: &SignatureScheme,
        sender: &KeyPair,
        receiver: &str,
        amount: u64,
    ) -> Result<SignedTransaction, LedgerError> {
        let parents = self.dag.select_parents(self.config.max_parents);
        let latest_parent = parents
            .iter()
            .map(|p| p.transaction.timestamp)
            .max()
            .unwrap_or(0);

        let mut tx = Transaction::new(&parents, sender, amount, receiver);
        // Keep the child no older than its parents even if the clock went back.
        tx.timestamp = tx.timestamp.max(latest_parent);

        let signed = tx.sign(scheme, sender)?;
        self.submit(signed.clone(), scheme)?;
        Ok(signed)
    }

    /// Balance of an address
    pub fn balance(&self, address: &str) -> u64 {
        self.state.balance(address)
    }

    /// Wallet of an address
    pub fn wallet(&self, address: &str) -> Option<&Wallet> {
        self.state.wallet(address)
    }

    /// Transaction by hash
    pub fn transaction(&self, hash: &str) -> Option<&SignedTransaction> {
        self.dag.get(hash)
    }

    /// Current tips
    pub fn tips(&self) -> Vec<String> {
        self.dag.tips()
    }

    /// Number of accepted transactions
    pub fn len(&self) -> usize {
        self.dag.len()
    }

    /// Whether no transaction has been accepted yet
    pub fn is_empty(&self) -> bool {
        self.dag.is_empty()
    }

    /// The configuration this ledger runs under
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The transaction graph
    pub fn dag(&self) -> &Dag {
        &self.dag
    }

    /// The world state
    pub fn state(&self) -> &WorldState {
        &self.state
    }
}
