//! Transaction log
//!
//! Append-only JSON-lines file holding one compact signed transaction per
//! line, in acceptance order. Replaying the file from the top rebuilds the
//! ledger. Writers hold [`LedgerLock`] from replay to append so that two
//! processes never validate against the same stale state.

use std::fs::File;
use std::path::{Path, PathBuf};

use fd_lock::{RwLock, RwLockWriteGuard};

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::core::crypto::SignatureScheme;
use crate::core::ledger::Ledger;
use crate::core::ledger_config::LedgerConfig;
use crate::core::transaction::SignedTransaction;
use crate::error::{FalcondagError, StoreError};
use crate::infra::dirs::FalcondagDirs;

fn io_error(path: &Path, e: &std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    }
}

/// Append-only transaction log on disk
#[derive(Debug, Clone)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    /// Log at a specific path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one transaction
    pub async fn append(&self, tx: &SignedTransaction) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, &e))?;
        }

        let mut line = serde_json::to_string(tx).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| io_error(&self.path, &e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| io_error(&self.path, &e))?;
        file.flush().await.map_err(|e| io_error(&self.path, &e))?;

        tracing::debug!("Appended transaction to {}", self.path.display());
        Ok(())
    }

    /// Read every transaction in file order
    ///
    /// A missing file is an empty log; blank lines are skipped.
    pub async fn read_all(&self) -> Result<Vec<SignedTransaction>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.path, &e)),
        };

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| StoreError::MalformedEntry {
                    path: self.path.clone(),
                    line: i + 1,
                    error: e.to_string(),
                })
            })
            .collect()
    }
}

/// Exclusive advisory lock on a data directory's log
///
/// The lock is released when the guard returned by [`LedgerLock::acquire`]
/// is dropped, or when the process exits.
pub struct LedgerLock {
    path: PathBuf,
    lock: RwLock<File>,
}

impl LedgerLock {
    /// Open (creating if needed) the lock file at `path`
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| io_error(&path, &e))?;
        Ok(Self {
            path,
            lock: RwLock::new(file),
        })
    }

    /// Block until no other process holds the lock, then hold it
    pub fn acquire(&mut self) -> Result<RwLockWriteGuard<'_, File>, StoreError> {
        tracing::debug!("Waiting for {}", self.path.display());
        let path = &self.path;
        self.lock.write().map_err(|e| io_error(path, &e))
    }
}

/// Load the configuration and replay the log of a data directory
pub async fn open_ledger(
    dirs: &FalcondagDirs,
    scheme: &SignatureScheme,
) -> Result<Ledger, FalcondagError> {
    let config = LedgerConfig::load_from_path(&dirs.config_path())?;
    let transactions = TransactionLog::new(dirs.ledger_path()).read_all().await?;
    tracing::debug!(
        "Replaying {} transaction(s) from {}",
        transactions.len(),
        dirs.ledger_path().display()
    );
    Ok(Ledger::replay(config, transactions, scheme)?)
}
