//! Default configuration values

/// Maximum number of parents a transaction may reference
pub const DEFAULT_MAX_PARENTS: usize = 8;

/// Ledger configuration file name inside the data directory
pub const CONFIG_FILE: &str = "falcondag.toml";

/// Transaction log file name inside the data directory
pub const LEDGER_FILE: &str = "ledger.jsonl";

/// Lock file serializing writers of the transaction log
pub const LOCK_FILE: &str = "ledger.lock";

/// Keystore subdirectory inside the data directory
pub const KEYS_DIR: &str = "keys";

/// Default number of benchmark iterations
pub const DEFAULT_BENCH_ITERATIONS: u32 = 1;

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
