//! Balance command implementation

use anyhow::Result;

use crate::cli::output::{is_json, print_json};
use crate::infra::dirs::FalcondagDirs;

/// Execute the balance command
pub async fn execute(dirs: &FalcondagDirs, account: &str) -> Result<()> {
    let (ledger, _) = super::open_ledger(dirs).await?;
    let address = super::resolve_account(dirs, account).await?;
    let balance = ledger.balance(&address);

    if is_json() {
        return print_json(&serde_json::json!({ "address": address, "balance": balance }));
    }

    println!("{balance}");
    Ok(())
}
