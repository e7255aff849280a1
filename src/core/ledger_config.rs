//! Ledger configuration
//!
//! Reads and writes `falcondag.toml` in the data directory. The file fixes
//! the signature algorithm, the parent limit and the genesis allocations,
//! which together determine how a transaction log replays.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::defaults::DEFAULT_MAX_PARENTS;
use crate::core::crypto::SignatureAlgorithm;
use crate::error::ConfigError;

/// Initial balance granted to an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    /// Receiving address
    pub address: String,

    /// Initial balance
    pub balance: u64,
}

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Signature algorithm all transactions use
    #[serde(default)]
    pub algorithm: SignatureAlgorithm,

    /// Maximum number of parents per transaction
    #[serde(default = "default_max_parents")]
    pub max_parents: usize,

    /// Initial balances
    #[serde(default)]
    pub genesis: Vec<GenesisAllocation>,
}

fn default_max_parents() -> usize {
    DEFAULT_MAX_PARENTS
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            algorithm: SignatureAlgorithm::default(),
            max_parents: DEFAULT_MAX_PARENTS,
            genesis: Vec::new(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a specific path
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// invalid file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration, creating parent directories if needed
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                error: e.to_string(),
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Check semantic constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_parents == 0 {
            return Err(ConfigError::Invalid(
                "max_parents must be at least 1".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut total: u64 = 0;
        for allocation in &self.genesis {
            if !seen.insert(allocation.address.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate genesis address '{}'",
                    allocation.address
                )));
            }
            total = total.checked_add(allocation.balance).ok_or_else(|| {
                ConfigError::Invalid("genesis allocations overflow".to_string())
            })?;
        }

        Ok(())
    }

    /// Sum of all genesis allocations
    pub fn genesis_supply(&self) -> u128 {
        self.genesis.iter().map(|a| u128::from(a.balance)).sum()
    }
}
