//! Init command implementation
//!
//! Implements `falcondag init`: creates the data directory, generates keys
//! for funded names that do not have one yet, and writes `falcondag.toml`
//! with the genesis allocations.

use anyhow::{bail, Context, Result};

use crate::cli::output::{create_spinner, is_json, print_detail, print_json, print_success};
use crate::core::crypto::{SignatureAlgorithm, SignatureScheme};
use crate::core::ledger_config::{GenesisAllocation, LedgerConfig};
use crate::infra::dirs::FalcondagDirs;
use crate::infra::keystore::Keystore;

/// Options for `falcondag init`
#[derive(Debug, Default)]
pub struct InitOptions {
    /// Signature algorithm
    pub algorithm: Option<SignatureAlgorithm>,
    /// Parent limit
    pub max_parents: Option<usize>,
    /// `NAME=AMOUNT` genesis allocations
    pub fund: Vec<String>,
    /// Overwrite an existing data directory
    pub force: bool,
}

/// Parse a `NAME=AMOUNT` allocation
pub fn parse_allocation(input: &str) -> Result<(String, u64)> {
    let Some((name, amount)) = input.split_once('=') else {
        bail!("Invalid allocation '{input}': expected NAME=AMOUNT");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid allocation '{input}': missing name");
    }
    let amount = amount
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid amount in allocation '{input}'"))?;
    Ok((name.to_string(), amount))
}

/// Execute the init command
pub async fn execute(dirs: &FalcondagDirs, options: InitOptions) -> Result<()> {
    if dirs.is_initialized() && !options.force {
        bail!(
            "{} is already initialized. Use --force to reinitialize.",
            dirs.data_dir().display()
        );
    }

    let allocations = options
        .fund
        .iter()
        .map(|input| parse_allocation(input))
        .collect::<Result<Vec<_>>>()?;

    let mut config = LedgerConfig {
        algorithm: options.algorithm.unwrap_or_default(),
        ..LedgerConfig::default()
    };
    if let Some(max_parents) = options.max_parents {
        config.max_parents = max_parents;
    }

    // Names stand in for addresses so nothing touches the keystore until the
    // options are known to be valid.
    let draft = LedgerConfig {
        genesis: allocations
            .iter()
            .map(|(name, balance)| GenesisAllocation {
                address: name.clone(),
                balance: *balance,
            })
            .collect(),
        ..config.clone()
    };
    draft.validate().context("Invalid init options")?;

    let scheme = SignatureScheme::new(config.algorithm)?;
    let keystore = Keystore::new(dirs.keys_dir());
    let mut created = Vec::new();

    for (name, balance) in allocations {
        let keypair = if keystore.exists(&name) {
            let keypair = keystore.load(&name).await?;
            if keypair.algorithm != config.algorithm {
                bail!(
                    "Key '{name}' uses {}, but the ledger is being initialized with {}",
                    keypair.algorithm,
                    config.algorithm
                );
            }
            keypair
        } else {
            let spinner = create_spinner(&format!("Generating key '{name}'..."));
            let keypair = scheme.generate_keypair()?;
            spinner.finish_and_clear();
            keystore.save(&name, &keypair).await?;
            created.push(name.clone());
            keypair
        };

        config.genesis.push(GenesisAllocation {
            address: keypair.address(),
            balance,
        });
    }

    config.validate()?;
    config.save_to_path(&dirs.config_path())?;

    let ledger_path = dirs.ledger_path();
    if ledger_path.exists() {
        let mut lock = super::lock_ledger(dirs)?;
        let _guard = lock
            .acquire()
            .with_context(|| format!("Failed to lock {}", dirs.lock_path().display()))?;
        std::fs::remove_file(&ledger_path)
            .with_context(|| format!("Failed to remove {}", ledger_path.display()))?;
        tracing::warn!("Discarded existing ledger at {}", ledger_path.display());
    }

    tracing::info!("Initialized {}", dirs.data_dir().display());

    if is_json() {
        return print_json(&serde_json::json!({
            "status": "success",
            "data_dir": dirs.data_dir(),
            "algorithm": config.algorithm,
            "max_parents": config.max_parents,
            "genesis": config.genesis,
            "created_keys": created,
        }));
    }

    print_success(&format!(
        "Initialized ledger in {}",
        dirs.data_dir().display()
    ));
    print_detail(&format!("Algorithm: {}", config.algorithm));
    print_detail(&format!("Max parents: {}", config.max_parents));
    for allocation in &config.genesis {
        print_detail(&format!(
            "Genesis: {} ← {}",
            super::abbreviate(&allocation.address),
            allocation.balance
        ));
    }
    for name in &created {
        print_detail(&format!("Created key '{name}'"));
    }

    Ok(())
}
