//! Send command implementation
//!
//! Implements `falcondag send`: builds a transfer on top of the current
//! tips, signs it, validates it against the replayed ledger and appends it
//! to the transaction log.

use anyhow::{Context, Result};

use crate::cli::output::{is_json, is_quiet, print_detail, print_json, print_success};
use crate::infra::dirs::FalcondagDirs;
use crate::infra::keystore::Keystore;
use crate::infra::store::TransactionLog;

/// Execute the send command
pub async fn execute(dirs: &FalcondagDirs, from: &str, to: &str, amount: u64) -> Result<()> {
    // Held until the transaction is on disk.
    let mut lock = super::lock_ledger(dirs)?;
    let _guard = lock
        .acquire()
        .with_context(|| format!("Failed to lock {}", dirs.lock_path().display()))?;

    let (mut ledger, scheme) = super::open_ledger(dirs).await?;

    let sender = Keystore::new(dirs.keys_dir()).load(from).await?;
    let receiver = super::resolve_account(dirs, to).await?;

    let tx = ledger
        .transfer(&scheme, &sender, &receiver, amount)
        .with_context(|| format!("Transfer of {amount} from '{from}' rejected"))?;
    let hash = tx.hash();

    TransactionLog::new(dirs.ledger_path())
        .append(&tx)
        .await
        .context("Failed to record transaction")?;

    if is_json() {
        return print_json(&serde_json::json!({
            "hash": hash,
            "transaction": tx,
            "sender_balance": ledger.balance(&sender.address()),
        }));
    }

    if is_quiet() {
        println!("{hash}");
        return Ok(());
    }

    print_success(&format!("Sent {amount} from '{from}' to {}", super::abbreviate(&receiver)));
    print_detail(&format!("Hash: {hash}"));
    print_detail(&format!("Parents: {}", tx.transaction.parents.len()));
    print_detail(&format!(
        "Remaining balance: {}",
        ledger.balance(&sender.address())
    ));
    Ok(())
}
