//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod address;
pub mod balance;
pub mod bench;
pub mod doctor;
pub mod history;
pub mod init;
pub mod keygen;
pub mod keys;
pub mod send;
pub mod show;
pub mod tips;
pub mod verify;

use anyhow::{bail, Context, Result};
use clap::Subcommand;

use crate::config::defaults::DEFAULT_BENCH_ITERATIONS;
use crate::core::crypto::{SignatureAlgorithm, SignatureScheme};
use crate::core::encoding;
use crate::core::ledger::Ledger;
use crate::core::ledger_config::LedgerConfig;
use crate::infra::dirs::FalcondagDirs;
use crate::infra::keystore::{is_valid_key_name, Keystore};
use crate::infra::store::{self, LedgerLock};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a data directory with genesis allocations
    Init {
        /// Signature algorithm (falcon-512 or falcon-1024)
        #[arg(short, long)]
        algorithm: Option<SignatureAlgorithm>,

        /// Maximum number of parents per transaction
        #[arg(long)]
        max_parents: Option<usize>,

        /// Fund a named key at genesis (NAME=AMOUNT, repeatable)
        #[arg(long, value_name = "NAME=AMOUNT")]
        fund: Vec<String>,

        /// Reinitialize an existing data directory (discards the ledger)
        #[arg(short, long)]
        force: bool,
    },

    /// Generate and store a named key pair
    Keygen {
        /// Key name
        name: String,
    },

    /// List stored keys
    Keys,

    /// Print the address of a stored key
    Address {
        /// Key name
        name: String,
    },

    /// Sign and submit a transfer
    Send {
        /// Sending key name
        #[arg(long)]
        from: String,

        /// Receiving key name or address
        #[arg(long)]
        to: String,

        /// Amount to transfer
        #[arg(long)]
        amount: u64,
    },

    /// Show the balance of a key or address
    Balance {
        /// Key name or address
        account: String,
    },

    /// List transactions a key or address took part in
    History {
        /// Key name or address
        account: String,
    },

    /// Show a transaction
    Show {
        /// Transaction hash
        hash: String,
    },

    /// List the current DAG tips
    Tips,

    /// Replay and verify the whole ledger
    Verify,

    /// Benchmark signing, verification and serialization
    Bench {
        /// Number of runs to average
        #[arg(short = 'n', long, default_value_t = DEFAULT_BENCH_ITERATIONS)]
        iterations: u32,

        /// Signature algorithm (defaults to the configured one)
        #[arg(short, long)]
        algorithm: Option<SignatureAlgorithm>,
    },

    /// Check the build environment and configuration
    Doctor,
}

impl Commands {
    /// Execute the command
    pub async fn run(self, dirs: &FalcondagDirs) -> Result<()> {
        match self {
            Self::Init {
                algorithm,
                max_parents,
                fund,
                force,
            } => {
                let options = init::InitOptions {
                    algorithm,
                    max_parents,
                    fund,
                    force,
                };
                init::execute(dirs, options).await
            }
            Self::Keygen { name } => keygen::execute(dirs, &name).await,
            Self::Keys => keys::execute(dirs).await,
            Self::Address { name } => address::execute(dirs, &name).await,
            Self::Send { from, to, amount } => send::execute(dirs, &from, &to, amount).await,
            Self::Balance { account } => balance::execute(dirs, &account).await,
            Self::History { account } => history::execute(dirs, &account).await,
            Self::Show { hash } => show::execute(dirs, &hash).await,
            Self::Tips => tips::execute(dirs).await,
            Self::Verify => verify::execute(dirs).await,
            Self::Bench {
                iterations,
                algorithm,
            } => bench::execute(dirs, iterations, algorithm).await,
            Self::Doctor => doctor::execute(dirs).await,
        }
    }
}

/// Load the data directory's configuration and instantiate its scheme
pub(crate) fn load_scheme(dirs: &FalcondagDirs) -> Result<(LedgerConfig, SignatureScheme)> {
    let config = LedgerConfig::load_from_path(&dirs.config_path())
        .with_context(|| format!("Failed to load {}", dirs.config_path().display()))?;
    let scheme = SignatureScheme::new(config.algorithm)?;
    Ok((config, scheme))
}

/// Replay the ledger of an initialized data directory
pub(crate) async fn open_ledger(dirs: &FalcondagDirs) -> Result<(Ledger, SignatureScheme)> {
    if !dirs.is_initialized() {
        bail!(
            "No ledger found in {}. Run 'falcondag init' first.",
            dirs.data_dir().display()
        );
    }

    let (_, scheme) = load_scheme(dirs)?;
    let ledger = store::open_ledger(dirs, &scheme)
        .await
        .context("Failed to load ledger")?;
    Ok((ledger, scheme))
}

/// Take the writer lock of an initialized data directory
///
/// Hold the returned lock's guard from replay until the new transaction has
/// been appended.
pub(crate) fn lock_ledger(dirs: &FalcondagDirs) -> Result<LedgerLock> {
    if !dirs.is_initialized() {
        bail!(
            "No ledger found in {}. Run 'falcondag init' first.",
            dirs.data_dir().display()
        );
    }

    LedgerLock::open(dirs.lock_path())
        .with_context(|| format!("Failed to open {}", dirs.lock_path().display()))
}

/// Resolve a key name or a literal address to an address
pub(crate) async fn resolve_account(dirs: &FalcondagDirs, account: &str) -> Result<String> {
    let keystore = Keystore::new(dirs.keys_dir());
    if is_valid_key_name(account) && keystore.exists(account) {
        let keypair = keystore.load(account).await?;
        return Ok(keypair.address());
    }

    if encoding::decode(account, "address").is_ok() {
        return Ok(account.to_string());
    }

    bail!("'{account}' is neither a stored key nor a base64 address")
}

/// Shorten a hash or address for human output
pub(crate) fn abbreviate(value: &str) -> String {
    match value.get(..16) {
        Some(prefix) if value.len() > 16 => format!("{prefix}…"),
        _ => value.to_string(),
    }
}
