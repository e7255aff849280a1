//! Signature and serialization benchmark
//!
//! Times the life of one transfer: signing, verification, and a JSON
//! round trip of the signed transaction.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::core::crypto::{SignatureAlgorithm, SignatureScheme};
use crate::core::transaction::{SignedTransaction, Transaction};
use crate::error::{CryptoError, TransactionError};

/// Amount used for the benchmark transfer
const BENCH_AMOUNT: u64 = 1000;

/// Averaged benchmark results
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Algorithm measured
    pub algorithm: SignatureAlgorithm,
    /// NIST level claimed by the algorithm
    pub nist_level: u8,
    /// Number of runs averaged
    pub iterations: u32,
    /// Whether every signature verified
    pub verified: bool,
    /// Mean key pair generation time
    pub keygen: Duration,
    /// Mean signing time
    pub sign: Duration,
    /// Mean verification time
    pub verify: Duration,
    /// Mean JSON serialization time
    pub serialize: Duration,
    /// Mean JSON deserialization time
    pub deserialize: Duration,
    /// Compact JSON size of the signed transaction
    pub json_bytes: usize,
    /// Public key size
    pub public_key_bytes: usize,
    /// Signature size of the last run
    pub signature_bytes: usize,
    /// Last signed transaction
    pub sample: SignedTransaction,
}

/// Run the benchmark `iterations` times (at least once)
pub fn run(
    algorithm: SignatureAlgorithm,
    iterations: u32,
) -> Result<BenchReport, TransactionError> {
    let iterations = iterations.max(1);
    let scheme = SignatureScheme::new(algorithm)?;

    let mut keygen = Duration::ZERO;
    let mut sign = Duration::ZERO;
    let mut verify = Duration::ZERO;
    let mut serialize = Duration::ZERO;
    let mut deserialize = Duration::ZERO;
    let mut verified = true;
    let mut sample = SignedTransaction::default();
    let mut json_bytes = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        let sender = scheme.generate_keypair()?;
        keygen += start.elapsed();
        let receiver = scheme.generate_keypair()?;

        let start = Instant::now();
        let signed = Transaction::new(&[], &sender, BENCH_AMOUNT, &receiver.address())
            .sign(&scheme, &sender)?;
        sign += start.elapsed();

        let start = Instant::now();
        verified &= signed.is_valid(&scheme);
        verify += start.elapsed();

        let start = Instant::now();
        let json = serde_json::to_string(&signed)
            .map_err(|e| TransactionError::Encoding(e.to_string()))?;
        serialize += start.elapsed();

        let start = Instant::now();
        let decoded: SignedTransaction = serde_json::from_str(&json)
            .map_err(|e| TransactionError::Encoding(e.to_string()))?;
        deserialize += start.elapsed();

        verified &= decoded == signed;
        json_bytes = json.len();
        sample = signed;
    }

    let signature_bytes = crate::core::encoding::decode(&sample.signature, "signature")
        .map_err(TransactionError::from)?
        .len();

    tracing::debug!("Benchmark finished after {iterations} iteration(s)");

    Ok(BenchReport {
        algorithm,
        nist_level: scheme.claimed_nist_level(),
        iterations,
        verified,
        keygen: keygen / iterations,
        sign: sign / iterations,
        verify: verify / iterations,
        serialize: serialize / iterations,
        deserialize: deserialize / iterations,
        json_bytes,
        public_key_bytes: scheme.public_key_len(),
        signature_bytes,
        sample,
    })
}

/// Convenience for callers that only need to know the scheme works
pub fn self_test(algorithm: SignatureAlgorithm) -> Result<bool, CryptoError> {
    let scheme = SignatureScheme::new(algorithm)?;
    let keys = scheme.generate_keypair()?;
    let signature = scheme.sign(b"falcondag self-test", &keys)?;
    Ok(scheme
        .verify(b"falcondag self-test", &signature, &keys.public_key)
        .is_ok())
}
