//! Keygen command implementation
//!
//! Implements `falcondag keygen` to create a named key pair.

use anyhow::Result;

use crate::cli::output::{create_spinner, is_json, is_quiet, print_detail, print_json, print_success};
use crate::infra::dirs::FalcondagDirs;
use crate::infra::keystore::Keystore;

/// Execute the keygen command
pub async fn execute(dirs: &FalcondagDirs, name: &str) -> Result<()> {
    let keystore = Keystore::new(dirs.keys_dir());
    if keystore.exists(name) {
        anyhow::bail!("Key '{name}' already exists");
    }

    let (_, scheme) = super::load_scheme(dirs)?;

    let spinner = create_spinner(&format!("Generating {} key pair...", scheme.algorithm()));
    let keypair = scheme.generate_keypair()?;
    spinner.finish_and_clear();

    let path = keystore.save(name, &keypair).await?;
    let address = keypair.address();

    if is_json() {
        return print_json(&serde_json::json!({
            "name": name,
            "algorithm": keypair.algorithm,
            "address": address,
            "path": path,
        }));
    }

    if is_quiet() {
        println!("{address}");
        return Ok(());
    }

    print_success(&format!("Generated key '{name}' ({})", keypair.algorithm));
    print_detail(&format!("Address: {address}"));
    print_detail(&format!("Stored at {}", path.display()));
    Ok(())
}
