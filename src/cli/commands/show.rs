//! Show command implementation

use anyhow::{anyhow, Result};

use crate::cli::output::print_json;
use crate::infra::dirs::FalcondagDirs;

/// Execute the show command
pub async fn execute(dirs: &FalcondagDirs, hash: &str) -> Result<()> {
    let (ledger, _) = super::open_ledger(dirs).await?;
    let tx = ledger
        .transaction(hash)
        .ok_or_else(|| anyhow!("Transaction '{hash}' not found"))?;

    print_json(&serde_json::json!({
        "hash": hash,
        "children": ledger.dag().children(hash),
        "transaction": tx,
    }))
}
