//! Infrastructure layer
//!
//! Handles all I/O operations on the data directory.
//! This module is the only place where ledger state touches the disk.

pub mod dirs;
pub mod keystore;
pub mod store;
