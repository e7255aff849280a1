//! Keys command implementation
//!
//! Implements `falcondag keys` to list stored key pairs.

use anyhow::Result;

use crate::cli::output::{is_json, print_info, print_json};
use crate::infra::dirs::FalcondagDirs;
use crate::infra::keystore::Keystore;

/// Execute the keys command
pub async fn execute(dirs: &FalcondagDirs) -> Result<()> {
    let keystore = Keystore::new(dirs.keys_dir());
    let names = keystore.list().await?;

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let keypair = keystore.load(&name).await?;
        entries.push((name, keypair.algorithm, keypair.address()));
    }

    if is_json() {
        let json: Vec<_> = entries
            .iter()
            .map(|(name, algorithm, address)| {
                serde_json::json!({
                    "name": name,
                    "algorithm": algorithm,
                    "address": address,
                })
            })
            .collect();
        return print_json(&json);
    }

    if entries.is_empty() {
        print_info("No keys stored. Run 'falcondag keygen <name>' to create one.");
        return Ok(());
    }

    for (name, algorithm, address) in &entries {
        println!("{name}\t{algorithm}\t{}", super::abbreviate(address));
    }
    Ok(())
}
