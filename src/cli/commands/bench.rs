//! Bench command implementation
//!
//! Implements `falcondag bench`: times key generation, signing,
//! verification and JSON round trips of a single transfer.

use anyhow::Result;

use crate::cli::output::{create_spinner, is_json, print_detail, print_json, print_success, verbosity};
use crate::core::bench;
use crate::core::crypto::SignatureAlgorithm;
use crate::core::ledger_config::LedgerConfig;
use crate::infra::dirs::FalcondagDirs;

/// Execute the bench command
pub async fn execute(
    dirs: &FalcondagDirs,
    iterations: u32,
    algorithm: Option<SignatureAlgorithm>,
) -> Result<()> {
    let algorithm = match algorithm {
        Some(algorithm) => algorithm,
        None => LedgerConfig::load_from_path(&dirs.config_path())?.algorithm,
    };

    let spinner = create_spinner(&format!("Benchmarking {algorithm}..."));
    let report = bench::run(algorithm, iterations)?;
    spinner.finish_and_clear();

    if is_json() {
        return print_json(&serde_json::json!({
            "algorithm": report.algorithm,
            "nist_level": report.nist_level,
            "iterations": report.iterations,
            "verified": report.verified,
            "keygen_us": report.keygen.as_micros().to_string(),
            "sign_us": report.sign.as_micros().to_string(),
            "verify_us": report.verify.as_micros().to_string(),
            "serialize_us": report.serialize.as_micros().to_string(),
            "deserialize_us": report.deserialize.as_micros().to_string(),
            "json_bytes": report.json_bytes,
            "public_key_bytes": report.public_key_bytes,
            "signature_bytes": report.signature_bytes,
        }));
    }

    if verbosity() > 0 {
        println!("{}", serde_json::to_string_pretty(&report.sample)?);
    }

    print_success(&format!(
        "{} (NIST level {}), {} iteration(s)",
        report.algorithm, report.nist_level, report.iterations
    ));
    print_detail(&format!("Verified: {}", report.verified));
    print_detail(&format!(
        "Keygen {:?}, sign {:?}, verify {:?}",
        report.keygen, report.sign, report.verify
    ));
    print_detail(&format!(
        "JSON: {} bytes, {:?} ser, {:?} de",
        report.json_bytes, report.serialize, report.deserialize
    ));
    print_detail(&format!(
        "Public key {} bytes, signature {} bytes",
        report.public_key_bytes, report.signature_bytes
    ));

    if !report.verified {
        anyhow::bail!("Benchmark transaction failed verification");
    }
    Ok(())
}
