//! Transaction DAG
//!
//! Transactions are vertices; each parent reference is an edge to an older
//! transaction. A transaction can only be inserted once all its parents are
//! present, so the graph stays acyclic and insertion order is a valid
//! topological order.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::transaction::SignedTransaction;
use crate::error::DagError;

/// Directed acyclic graph of signed transactions
#[derive(Debug, Clone, Default)]
pub struct Dag {
    transactions: HashMap<String, SignedTransaction>,
    order: Vec<String>,
    children: HashMap<String, Vec<String>>,
    tips: BTreeSet<String>,
}

impl Dag {
    /// Create an empty DAG
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the DAG holds no transactions
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether a transaction is present
    pub fn contains(&self, hash: &str) -> bool {
        self.transactions.contains_key(hash)
    }

    /// Look up a transaction by hash
    pub fn get(&self, hash: &str) -> Option<&SignedTransaction> {
        self.transactions.get(hash)
    }

    /// Check the insertion rules without inserting
    pub fn check(&self, hash: &str, tx: &SignedTransaction) -> Result<(), DagError> {
        if self.contains(hash) {
            return Err(DagError::Duplicate {
                hash: hash.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for parent in &tx.transaction.parents {
            if !seen.insert(parent.as_str()) {
                return Err(DagError::RepeatedParent {
                    parent: parent.clone(),
                });
            }

            let parent_tx = self.get(parent).ok_or_else(|| DagError::UnknownParent {
                parent: parent.clone(),
            })?;

            if tx.transaction.timestamp < parent_tx.transaction.timestamp {
                return Err(DagError::TimestampBeforeParent {
                    timestamp: tx.transaction.timestamp,
                    parent: parent.clone(),
                    parent_timestamp: parent_tx.transaction.timestamp,
                });
            }
        }

        Ok(())
    }

    /// Insert a transaction, returning its hash
    pub fn insert(&mut self, tx: SignedTransaction) -> Result<String, DagError> {
        let hash = tx.hash();
        self.check(&hash, &tx)?;

        for parent in &tx.transaction.parents {
            self.children
                .entry(parent.clone())
                .or_default()
                .push(hash.clone());
            self.tips.remove(parent);
        }

        self.tips.insert(hash.clone());
        self.order.push(hash.clone());
        self.transactions.insert(hash.clone(), tx);
        Ok(hash)
    }

    /// Transactions nothing references yet, sorted by hash
    pub fn tips(&self) -> Vec<String> {
        self.tips.iter().cloned().collect()
    }

    /// Direct children of a transaction
    pub fn children(&self, hash: &str) -> &[String] {
        self.children.get(hash).map_or(&[][..], Vec::as_slice)
    }

    /// All transitive parents of a transaction
    pub fn ancestors(&self, hash: &str) -> HashSet<String> {
        let mut found = HashSet::new();
        let mut stack: Vec<&str> = vec![hash];

        while let Some(current) = stack.pop() {
            let Some(tx) = self.get(current) else {
                continue;
            };
            for parent in &tx.transaction.parents {
                if found.insert(parent.clone()) {
                    stack.push(parent);
                }
            }
        }

        found
    }

    /// Transactions in insertion (topological) order
    pub fn iter(&self) -> impl Iterator<Item = &SignedTransaction> {
        self.order.iter().filter_map(|h| self.transactions.get(h))
    }

    /// Choose parents for a new transaction: up to `max` tips, oldest first
    pub fn select_parents(&self, max: usize) -> Vec<SignedTransaction> {
        self.order
            .iter()
            .filter(|h| self.tips.contains(*h))
            .take(max)
            .filter_map(|h| self.transactions.get(h).cloned())
            .collect()
    }
}
