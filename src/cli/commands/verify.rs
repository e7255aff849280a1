//! Verify command implementation
//!
//! Implements `falcondag verify`: replays the whole transaction log from
//! the genesis allocations, checking every signature, parent reference and
//! balance rule. Fails on the first invalid transaction.

use anyhow::{Context, Result};

use crate::cli::output::{is_json, print_detail, print_json, print_success};
use crate::infra::dirs::FalcondagDirs;

/// Execute the verify command
pub async fn execute(dirs: &FalcondagDirs) -> Result<()> {
    let (ledger, _) = super::open_ledger(dirs)
        .await
        .context("Ledger verification failed")?;

    let supply = ledger.state().total_supply();
    let genesis_supply = ledger.config().genesis_supply();
    if supply != genesis_supply {
        anyhow::bail!("Total supply {supply} differs from genesis supply {genesis_supply}");
    }

    if is_json() {
        return print_json(&serde_json::json!({
            "status": "success",
            "transactions": ledger.len(),
            "tips": ledger.tips(),
            "wallets": ledger.state().wallets.len(),
            "total_supply": supply.to_string(),
        }));
    }

    print_success(&format!("Verified {} transaction(s)", ledger.len()));
    print_detail(&format!("Tips: {}", ledger.tips().len()));
    print_detail(&format!("Wallets: {}", ledger.state().wallets.len()));
    print_detail(&format!("Total supply: {supply}"));
    Ok(())
}
