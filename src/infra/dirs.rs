//! Data directory management
//!
//! Resolves where the ledger configuration, transaction log and keystore
//! live. Precedence: explicit path (`--data-dir`), then the
//! `FALCONDAG_DATA_DIR` environment variable, then the platform data
//! directory (`$XDG_DATA_HOME/falcondag` or `~/.local/share/falcondag` on
//! Linux, `~/Library/Application Support/falcondag` on macOS).

use std::env;
use std::path::{Path, PathBuf};

use crate::config::defaults::{CONFIG_FILE, KEYS_DIR, LEDGER_FILE, LOCK_FILE};

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "FALCONDAG_DATA_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "falcondag";

/// Paths inside a falcondag data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FalcondagDirs {
    data_dir: PathBuf,
}

impl FalcondagDirs {
    /// Resolve the data directory from an explicit path, the environment or
    /// the platform default
    #[must_use]
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::resolve_with(explicit, env::var(ENV_DATA_DIR).ok())
    }

    /// Resolution with the environment value passed in
    #[must_use]
    pub fn resolve_with(explicit: Option<PathBuf>, env_value: Option<String>) -> Self {
        let data_dir = explicit
            .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(Self::platform_data_dir);
        Self { data_dir }
    }

    /// Use a specific directory
    #[must_use]
    pub fn at(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// The data directory
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of `falcondag.toml`
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Path of the transaction log
    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }

    /// Path of the lock file guarding the transaction log
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(LOCK_FILE)
    }

    /// Keystore directory
    #[must_use]
    pub fn keys_dir(&self) -> PathBuf {
        self.data_dir.join(KEYS_DIR)
    }

    /// Whether the directory has been initialized
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.config_path().exists()
    }

    fn platform_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join(APP_NAME))
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".local").join("share").join(APP_NAME))
                    .unwrap_or_else(|| PathBuf::from(".").join(".falcondag"))
            })
    }
}

impl Default for FalcondagDirs {
    fn default() -> Self {
        Self::resolve(None)
    }
}
