//! Falcondag - post-quantum signed transaction DAG ledger
//!
//! Transactions reference earlier transactions by hash, are signed with
//! Falcon through liboqs, hashed with BLAKE3, and move balances between
//! wallets in a world state.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Ledger logic (no I/O operations)
//! - [`infra`] - Infrastructure layer (data directory, log, keystore)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
