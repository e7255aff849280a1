//! History command implementation
//!
//! Lists the transactions a wallet took part in, oldest first.

use anyhow::Result;

use crate::cli::output::{is_json, print_info, print_json};
use crate::infra::dirs::FalcondagDirs;

/// Execute the history command
pub async fn execute(dirs: &FalcondagDirs, account: &str) -> Result<()> {
    let (ledger, _) = super::open_ledger(dirs).await?;
    let address = super::resolve_account(dirs, account).await?;

    // Wallet history is unordered; walk the DAG to list it in acceptance order.
    let entries: Vec<_> = match ledger.wallet(&address) {
        Some(wallet) => ledger
            .dag()
            .iter()
            .map(|tx| (tx.hash(), tx))
            .filter(|(hash, _)| wallet.history.contains(hash))
            .collect(),
        None => Vec::new(),
    };

    if is_json() {
        let json: Vec<_> = entries
            .iter()
            .map(|(hash, tx)| {
                let direction = if tx.transaction.sender == address {
                    "out"
                } else {
                    "in"
                };
                serde_json::json!({
                    "hash": hash,
                    "direction": direction,
                    "amount": tx.transaction.amount,
                    "timestamp": tx.transaction.timestamp,
                })
            })
            .collect();
        return print_json(&json);
    }

    if entries.is_empty() {
        print_info("No transactions");
        return Ok(());
    }

    for (hash, tx) in &entries {
        let (arrow, counterparty) = if tx.transaction.sender == address {
            ("→", &tx.transaction.receiver)
        } else {
            ("←", &tx.transaction.sender)
        };
        println!(
            "{hash}  {arrow} {:>12}  {}",
            tx.transaction.amount,
            super::abbreviate(counterparty)
        );
    }
    Ok(())
}
