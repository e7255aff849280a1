//! Error types for falcondag
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Signature scheme and key material errors
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Algorithm not compiled into the linked liboqs
    #[error("Signature algorithm '{algorithm}' is not available: {error}")]
    AlgorithmUnavailable { algorithm: String, error: String },

    /// Unknown algorithm name
    #[error("Unknown signature algorithm '{0}' (expected falcon-512 or falcon-1024)")]
    UnknownAlgorithm(String),

    /// Key generation failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Public key has the wrong length for the algorithm
    #[error("Malformed public key: expected {expected} bytes, got {actual}")]
    MalformedPublicKey { expected: usize, actual: usize },

    /// Secret key has the wrong length for the algorithm
    #[error("Malformed secret key: expected {expected} bytes, got {actual}")]
    MalformedSecretKey { expected: usize, actual: usize },

    /// Signature longer than the algorithm allows
    #[error("Malformed signature: at most {max} bytes allowed, got {actual}")]
    MalformedSignature { max: usize, actual: usize },

    /// Key pair belongs to a different algorithm
    #[error("Key pair uses {key}, but the scheme is {scheme}")]
    AlgorithmMismatch { key: String, scheme: String },

    /// Signature does not verify
    #[error("Signature verification failed")]
    InvalidSignature,

    /// Base64 decoding failed
    #[error("Invalid base64 in {field}")]
    Encoding { field: String },
}

/// Transaction construction and verification errors
#[derive(Error, Debug)]
pub enum TransactionError {
    /// Signing key does not own the sender address
    #[error("Key pair address does not match transaction sender '{sender}'")]
    SenderMismatch { sender: String },

    /// Canonical encoding failed
    #[error("Failed to encode transaction: {0}")]
    Encoding(String),

    /// Cryptographic failure
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// World state errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    /// Sender balance too low
    #[error("Insufficient funds in '{address}': balance {balance}, needed {needed}")]
    InsufficientFunds {
        address: String,
        balance: u64,
        needed: u64,
    },

    /// Credit would overflow a balance
    #[error("Balance overflow crediting '{address}'")]
    BalanceOverflow { address: String },
}

/// DAG structure errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DagError {
    /// Transaction already present
    #[error("Transaction '{hash}' already exists")]
    Duplicate { hash: String },

    /// Parent reference does not resolve
    #[error("Transaction references unknown parent '{parent}'")]
    UnknownParent { parent: String },

    /// Same parent listed twice
    #[error("Transaction lists parent '{parent}' more than once")]
    RepeatedParent { parent: String },

    /// Child claims to predate its parent
    #[error("Timestamp {timestamp} is earlier than parent '{parent}' ({parent_timestamp})")]
    TimestampBeforeParent {
        timestamp: u64,
        parent: String,
        parent_timestamp: u64,
    },
}

/// Ledger validation errors
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Zero-value transfer
    #[error("Transfer amount must be greater than zero")]
    ZeroAmount,

    /// Sender and receiver are the same wallet
    #[error("Sender and receiver are the same address")]
    SelfTransfer,

    /// No parents on a non-empty ledger
    #[error("Transaction has no parents but the ledger already has {existing} transaction(s)")]
    MissingParents { existing: usize },

    /// Too many parents
    #[error("Transaction has {count} parents, at most {max} allowed")]
    TooManyParents { count: usize, max: usize },

    /// Signature did not verify
    #[error("Invalid transaction signature: {0}")]
    Signature(#[from] CryptoError),

    /// Transaction could not be built or signed
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    /// Balance rule violated
    #[error(transparent)]
    State(#[from] StateError),

    /// DAG rule violated
    #[error(transparent)]
    Dag(#[from] DagError),

    /// Invalid transaction found while replaying a log
    #[error("Transaction #{index} is invalid: {source}")]
    Replay {
        index: usize,
        #[source]
        source: Box<LedgerError>,
    },
}

/// Ledger configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the config file
    #[error("IO error for config file '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// Failed to parse the config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Failed to serialize the config
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// Semantically invalid configuration
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Data directory, log and keystore errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },

    /// Malformed line in the transaction log
    #[error("Malformed entry on line {line} of '{path}': {error}")]
    MalformedEntry {
        path: PathBuf,
        line: usize,
        error: String,
    },

    /// Key name rejected
    #[error("Invalid key name '{0}': use 1-64 letters, digits, '-' or '_'")]
    InvalidKeyName(String),

    /// Key not in the keystore
    #[error("Key '{0}' not found. Run 'falcondag keygen {0}' to create it.")]
    KeyNotFound(String),

    /// Key already in the keystore
    #[error("Key '{0}' already exists")]
    KeyExists(String),

    /// Key file could not be decoded
    #[error("Failed to decode key file '{path}': {error}")]
    KeyDecode { path: PathBuf, error: String },
}

/// Top-level falcondag error type
#[derive(Error, Debug)]
pub enum FalcondagError {
    /// Crypto error
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Ledger error
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Config error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
