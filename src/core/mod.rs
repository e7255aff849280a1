//! Core ledger logic
//!
//! This module contains the ledger's business logic.
//! Apart from [`doctor`], it performs no I/O; that belongs in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`crypto`] - Post-quantum signature scheme and key pairs
//! - [`encoding`] - Base64 helpers
//! - [`transaction`] - Transactions, signing, hashing and verification
//! - [`state`] - Wallets and world state
//! - [`dag`] - Transaction DAG
//! - [`ledger`] - Validation and application of transactions
//! - [`ledger_config`] - Ledger configuration (`falcondag.toml`)
//! - [`bench`] - Signature and serialization benchmark
//! - [`doctor`] - Build environment checks

pub mod bench;
pub mod crypto;
pub mod dag;
pub mod doctor;
pub mod encoding;
pub mod ledger;
pub mod ledger_config;
pub mod state;
pub mod transaction;
