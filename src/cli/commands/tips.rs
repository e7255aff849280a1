//! Tips command implementation
//!
//! Lists the transactions no other transaction references yet; the next
//! transfer will build on them.

use anyhow::Result;

use crate::cli::output::{is_json, print_info, print_json};
use crate::infra::dirs::FalcondagDirs;

/// Execute the tips command
pub async fn execute(dirs: &FalcondagDirs) -> Result<()> {
    let (ledger, _) = super::open_ledger(dirs).await?;
    let tips = ledger.tips();

    if is_json() {
        return print_json(&tips);
    }

    if tips.is_empty() {
        print_info("Ledger is empty");
    }
    for tip in tips {
        println!("{tip}");
    }
    Ok(())
}
