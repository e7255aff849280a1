//! Post-quantum signature scheme
//!
//! Wraps liboqs (through the `oqs` crate) behind a small API that works on
//! plain byte slices. Key material is kept as raw bytes so it can be stored
//! and reloaded without holding on to liboqs objects.

use std::fmt;
use std::str::FromStr;

use oqs::sig::{Algorithm, Sig};
use serde::{Deserialize, Serialize};

use crate::core::encoding::{self, serde_base64};
use crate::error::CryptoError;

/// Supported signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// Falcon-512 (NIST level 1)
    #[serde(rename = "falcon-512")]
    Falcon512,
    /// Falcon-1024 (NIST level 5)
    #[default]
    #[serde(rename = "falcon-1024")]
    Falcon1024,
}

impl SignatureAlgorithm {
    /// Canonical name used in config and key files
    pub fn name(self) -> &'static str {
        match self {
            Self::Falcon512 => "falcon-512",
            Self::Falcon1024 => "falcon-1024",
        }
    }

    fn to_oqs(self) -> Algorithm {
        match self {
            Self::Falcon512 => Algorithm::Falcon512,
            Self::Falcon1024 => Algorithm::Falcon1024,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "falcon-512" | "falcon512" => Ok(Self::Falcon512),
            "falcon-1024" | "falcon1024" => Ok(Self::Falcon1024),
            _ => Err(CryptoError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A signing key pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    /// Algorithm the key belongs to
    pub algorithm: SignatureAlgorithm,

    /// Raw public key
    #[serde(with = "serde_base64")]
    pub public_key: Vec<u8>,

    /// Raw secret key
    #[serde(with = "serde_base64")]
    pub secret_key: Vec<u8>,
}

impl KeyPair {
    /// The address of this key pair (base64 public key)
    pub fn address(&self) -> String {
        encoding::encode(&self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("algorithm", &self.algorithm)
            .field("address", &self.address())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// An instantiated signature algorithm
pub struct SignatureScheme {
    algorithm: SignatureAlgorithm,
    sig: Sig,
}

impl SignatureScheme {
    /// Instantiate a signature algorithm
    ///
    /// Fails if the linked liboqs was built without it.
    pub fn new(algorithm: SignatureAlgorithm) -> Result<Self, CryptoError> {
        oqs::init();
        let sig = Sig::new(algorithm.to_oqs()).map_err(|e| CryptoError::AlgorithmUnavailable {
            algorithm: algorithm.name().to_string(),
            error: e.to_string(),
        })?;
        tracing::debug!("Initialized signature scheme {algorithm}");
        Ok(Self { algorithm, sig })
    }

    /// The algorithm this scheme runs
    pub fn algorithm(&self) -> SignatureAlgorithm {
        self.algorithm
    }

    /// NIST security level claimed by the algorithm
    pub fn claimed_nist_level(&self) -> u8 {
        self.sig.claimed_nist_level()
    }

    /// Public key length in bytes
    pub fn public_key_len(&self) -> usize {
        self.sig.length_public_key()
    }

    /// Maximum signature length in bytes
    pub fn max_signature_len(&self) -> usize {
        self.sig.length_signature()
    }

    /// Generate a fresh key pair
    pub fn generate_keypair(&self) -> Result<KeyPair, CryptoError> {
        let (pk, sk) = self
            .sig
            .keypair()
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Ok(KeyPair {
            algorithm: self.algorithm,
            public_key: pk.as_ref().to_vec(),
            secret_key: sk.as_ref().to_vec(),
        })
    }

    /// Sign a message with a key pair
    pub fn sign(&self, message: &[u8], keypair: &KeyPair) -> Result<Vec<u8>, CryptoError> {
        if keypair.algorithm != self.algorithm {
            return Err(CryptoError::AlgorithmMismatch {
                key: keypair.algorithm.to_string(),
                scheme: self.algorithm.to_string(),
            });
        }

        let expected = self.sig.length_secret_key();
        let sk = self
            .sig
            .secret_key_from_bytes(&keypair.secret_key)
            .ok_or(CryptoError::MalformedSecretKey {
                expected,
                actual: keypair.secret_key.len(),
            })?;

        let signature = self
            .sig
            .sign(message, sk)
            .map_err(|e| CryptoError::Signing(e.to_string()))?;
        Ok(signature.as_ref().to_vec())
    }

    /// Verify a signature over a message
    pub fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), CryptoError> {
        let pk = self
            .sig
            .public_key_from_bytes(public_key)
            .ok_or(CryptoError::MalformedPublicKey {
                expected: self.sig.length_public_key(),
                actual: public_key.len(),
            })?;

        let signature = self
            .sig
            .signature_from_bytes(signature)
            .ok_or(CryptoError::MalformedSignature {
                max: self.sig.length_signature(),
                actual: signature.len(),
            })?;

        self.sig
            .verify(message, signature, pk)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl fmt::Debug for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureScheme")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme() -> SignatureScheme {
        SignatureScheme::new(SignatureAlgorithm::Falcon512).unwrap()
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        assert_eq!(
            "falcon-1024".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::Falcon1024
        );
        assert_eq!(
            "Falcon512".parse::<SignatureAlgorithm>().unwrap(),
            SignatureAlgorithm::Falcon512
        );
        assert!("rsa".parse::<SignatureAlgorithm>().is_err());
        assert_eq!(SignatureAlgorithm::default().to_string(), "falcon-1024");
    }

    #[test]
    fn test_sign_and_verify() {
        let scheme = scheme();
        let keys = scheme.generate_keypair().unwrap();
        let signature = scheme.sign(b"hello", &keys).unwrap();

        assert!(scheme.verify(b"hello", &signature, &keys.public_key).is_ok());
        assert!(matches!(
            scheme.verify(b"hullo", &signature, &keys.public_key),
            Err(CryptoError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_with_other_key_fails() {
        let scheme = scheme();
        let alice = scheme.generate_keypair().unwrap();
        let bob = scheme.generate_keypair().unwrap();
        let signature = scheme.sign(b"msg", &alice).unwrap();

        assert!(scheme.verify(b"msg", &signature, &bob.public_key).is_err());
    }

    #[test]
    fn test_malformed_public_key() {
        let scheme = scheme();
        let keys = scheme.generate_keypair().unwrap();
        let signature = scheme.sign(b"msg", &keys).unwrap();

        let err = scheme.verify(b"msg", &signature, &[1, 2, 3]).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedPublicKey { actual: 3, .. }));
    }

    #[test]
    fn test_oversized_signature() {
        let scheme = scheme();
        let keys = scheme.generate_keypair().unwrap();
        let too_long = vec![0u8; scheme.max_signature_len() + 1];

        let err = scheme.verify(b"msg", &too_long, &keys.public_key).unwrap_err();
        assert!(matches!(err, CryptoError::MalformedSignature { .. }));
    }

    #[test]
    fn test_sign_rejects_foreign_algorithm() {
        let scheme = scheme();
        let mut keys = scheme.generate_keypair().unwrap();
        keys.algorithm = SignatureAlgorithm::Falcon1024;

        assert!(matches!(
            scheme.sign(b"msg", &keys),
            Err(CryptoError::AlgorithmMismatch { .. })
        ));
    }

    #[test]
    fn test_keypair_debug_redacts_secret() {
        let keys = scheme().generate_keypair().unwrap();
        let debug = format!("{keys:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&encoding::encode(&keys.secret_key)));
    }

    #[test]
    fn test_keypair_json_uses_base64() {
        let keys = scheme().generate_keypair().unwrap();
        let json = serde_json::to_value(&keys).unwrap();
        assert_eq!(json["algorithm"], "falcon-512");
        assert_eq!(json["public_key"], keys.address());

        let back: KeyPair = serde_json::from_value(json).unwrap();
        assert_eq!(back, keys);
    }

    #[test]
    fn test_nist_levels() {
        assert_eq!(scheme().claimed_nist_level(), 1);
        let strong = SignatureScheme::new(SignatureAlgorithm::Falcon1024).unwrap();
        assert_eq!(strong.claimed_nist_level(), 5);
    }
}
