//! Keystore
//!
//! One JSON file per named key pair under `<data_dir>/keys/`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::core::crypto::KeyPair;
use crate::error::StoreError;

/// Permissions of key files: owner read/write only
#[cfg(unix)]
const KEY_FILE_MODE: u32 = 0o600;

fn key_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("Invalid key name regex"))
}

/// Whether a string is a valid key name
pub fn is_valid_key_name(name: &str) -> bool {
    key_name_regex().is_match(name)
}

/// Named key pairs on disk
#[derive(Debug, Clone)]
pub struct Keystore {
    dir: PathBuf,
}

impl Keystore {
    /// Keystore rooted at `dir`
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key_name(name) {
            return Err(StoreError::InvalidKeyName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Whether a key with this name exists
    pub fn exists(&self, name: &str) -> bool {
        self.key_path(name).is_ok_and(|p| p.exists())
    }

    /// Store a new key pair; existing keys are never overwritten
    ///
    /// On unix the file is created readable by its owner only.
    pub async fn save(&self, name: &str, keypair: &KeyPair) -> Result<PathBuf, StoreError> {
        let path = self.key_path(name)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io {
                path: self.dir.clone(),
                error: e.to_string(),
            })?;

        let content = serde_json::to_string_pretty(keypair).map_err(|e| StoreError::KeyDecode {
            path: path.clone(),
            error: e.to_string(),
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(KEY_FILE_MODE);

        let mut file = match options.open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StoreError::KeyExists(name.to_string()))
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path,
                    error: e.to_string(),
                })
            }
        };

        let io_error = |e: std::io::Error| StoreError::Io {
            path: path.clone(),
            error: e.to_string(),
        };
        file.write_all(content.as_bytes()).await.map_err(io_error)?;
        file.sync_all().await.map_err(io_error)?;

        tracing::info!("Stored key '{name}' at {}", path.display());
        Ok(path)
    }

    /// Load a key pair by name
    pub async fn load(&self, name: &str) -> Result<KeyPair, StoreError> {
        let path = self.key_path(name)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::KeyNotFound(name.to_string()))
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path,
                    error: e.to_string(),
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::KeyDecode {
            path,
            error: e.to_string(),
        })
    }

    /// Names of all stored keys, sorted
    pub async fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.dir.clone(),
                    error: e.to_string(),
                })
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            error: e.to_string(),
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_key_name(stem) {
                    names.push(stem.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// Directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
