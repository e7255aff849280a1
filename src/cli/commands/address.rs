//! Address command implementation
//!
//! Implements `falcondag address` to print a stored key's full address.

use anyhow::Result;

use crate::cli::output::{is_json, print_json};
use crate::infra::dirs::FalcondagDirs;
use crate::infra::keystore::Keystore;

/// Execute the address command
pub async fn execute(dirs: &FalcondagDirs, name: &str) -> Result<()> {
    let keypair = Keystore::new(dirs.keys_dir()).load(name).await?;
    let address = keypair.address();

    if is_json() {
        return print_json(&serde_json::json!({ "name": name, "address": address }));
    }

    println!("{address}");
    Ok(())
}
