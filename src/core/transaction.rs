//! Transactions
//!
//! A transaction moves `amount` from `sender` to `receiver` and references
//! earlier transactions by hash. The signed message is the compact JSON
//! encoding of [`Transaction`]; the transaction hash is the BLAKE3 digest of
//! the compact JSON encoding of the whole [`SignedTransaction`].
//!
//! Field order in both structs is part of the wire format.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::crypto::{KeyPair, SignatureScheme};
use crate::core::encoding;
use crate::error::{CryptoError, TransactionError};

/// An unsigned transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Hashes of the transactions this one builds on
    pub parents: Vec<String>,

    /// Sender address
    pub sender: String,

    /// Milliseconds since the UNIX epoch
    pub timestamp: u64,

    /// Amount transferred
    pub amount: u64,

    /// Receiver address
    pub receiver: String,
}

impl Transaction {
    /// Create a transfer from `sender` on top of `parents`, stamped now
    pub fn new(
        parents: &[SignedTransaction],
        sender: &KeyPair,
        amount: u64,
        receiver: &str,
    ) -> Self {
        Self::with_timestamp(parents, sender, amount, receiver, now_millis())
    }

    /// Create a transfer with an explicit timestamp
    pub fn with_timestamp(
        parents: &[SignedTransaction],
        sender: &KeyPair,
        amount: u64,
        receiver: &str,
        timestamp: u64,
    ) -> Self {
        Self {
            parents: parents.iter().map(SignedTransaction::hash).collect(),
            sender: sender.address(),
            timestamp,
            amount,
            receiver: receiver.to_string(),
        }
    }

    /// The exact bytes that get signed
    pub fn signing_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        serde_json::to_vec(self).map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    /// Sign the transaction with the sender's key pair
    pub fn sign(
        self,
        scheme: &SignatureScheme,
        keypair: &KeyPair,
    ) -> Result<SignedTransaction, TransactionError> {
        if keypair.address() != self.sender {
            return Err(TransactionError::SenderMismatch {
                sender: self.sender,
            });
        }

        let message = self.signing_bytes()?;
        let signature = scheme.sign(&message, keypair)?;

        Ok(SignedTransaction {
            transaction: self,
            signature: encoding::encode(&signature),
        })
    }
}

/// A transaction together with the sender's signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// The signed payload
    pub transaction: Transaction,

    /// Base64 signature over [`Transaction::signing_bytes`]
    pub signature: String,
}

impl SignedTransaction {
    /// Content hash: base64 of BLAKE3 over the compact JSON encoding
    pub fn hash(&self) -> String {
        // Serializing plain strings and integers cannot fail.
        let serialized = serde_json::to_vec(self).unwrap_or_default();
        let digest = blake3::hash(&serialized);
        encoding::encode(digest.as_bytes())
    }

    /// Check the signature against the sender's public key
    pub fn verify(&self, scheme: &SignatureScheme) -> Result<(), CryptoError> {
        let message = serde_json::to_vec(&self.transaction).map_err(|_| CryptoError::Encoding {
            field: "transaction".to_string(),
        })?;
        let public_key = encoding::decode(&self.transaction.sender, "sender")?;
        let signature = encoding::decode(&self.signature, "signature")?;

        scheme.verify(&message, &signature, &public_key)
    }

    /// Whether the signature verifies
    pub fn is_valid(&self, scheme: &SignatureScheme) -> bool {
        self.verify(scheme).is_ok()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::crypto::SignatureAlgorithm;

    fn setup() -> (SignatureScheme, KeyPair, KeyPair) {
        let scheme = SignatureScheme::new(SignatureAlgorithm::Falcon512).unwrap();
        let alice = scheme.generate_keypair().unwrap();
        let bob = scheme.generate_keypair().unwrap();
        (scheme, alice, bob)
    }

    #[test]
    fn test_field_order_in_json() {
        let tx = Transaction {
            parents: vec!["p".to_string()],
            sender: "s".to_string(),
            timestamp: 7,
            amount: 3,
            receiver: "r".to_string(),
        };
        let json = String::from_utf8(tx.signing_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"parents":["p"],"sender":"s","timestamp":7,"amount":3,"receiver":"r"}"#
        );
    }

    #[test]
    fn test_signed_transaction_nests_payload() {
        let signed = SignedTransaction {
            transaction: Transaction::default(),
            signature: "sig".to_string(),
        };
        let json = serde_json::to_value(&signed).unwrap();
        assert!(json["transaction"].is_object());
        assert_eq!(json["signature"], "sig");
    }

    #[test]
    fn test_sign_and_verify() {
        let (scheme, alice, bob) = setup();
        let signed = Transaction::new(&[], &alice, 1000, &bob.address())
            .sign(&scheme, &alice)
            .unwrap();

        assert!(signed.is_valid(&scheme));
        assert_eq!(signed.transaction.sender, alice.address());
        assert_eq!(signed.transaction.receiver, bob.address());
    }

    #[test]
    fn test_tampered_amount_fails_verification() {
        let (scheme, alice, bob) = setup();
        let mut signed = Transaction::new(&[], &alice, 10, &bob.address())
            .sign(&scheme, &alice)
            .unwrap();
        signed.transaction.amount = 10_000;

        assert!(!signed.is_valid(&scheme));
    }

    #[test]
    fn test_sign_with_wrong_key_is_rejected() {
        let (scheme, alice, bob) = setup();
        let tx = Transaction::new(&[], &alice, 10, &bob.address());

        assert!(matches!(
            tx.sign(&scheme, &bob),
            Err(TransactionError::SenderMismatch { .. })
        ));
    }

    #[test]
    fn test_garbage_sender_fails_without_panic() {
        let (scheme, alice, bob) = setup();
        let mut signed = Transaction::new(&[], &alice, 10, &bob.address())
            .sign(&scheme, &alice)
            .unwrap();
        signed.transaction.sender = "%%%".to_string();

        assert!(matches!(
            signed.verify(&scheme),
            Err(CryptoError::Encoding { .. })
        ));
    }

    #[test]
    fn test_hash_is_deterministic_and_content_bound() {
        let (scheme, alice, bob) = setup();
        let signed = Transaction::with_timestamp(&[], &alice, 5, &bob.address(), 1)
            .sign(&scheme, &alice)
            .unwrap();

        assert_eq!(signed.hash(), signed.clone().hash());
        // 32-byte digest in padded base64
        assert_eq!(signed.hash().len(), 44);

        let mut other = signed.clone();
        other.transaction.timestamp = 2;
        assert_ne!(signed.hash(), other.hash());
    }

    #[test]
    fn test_parents_become_hashes() {
        let (scheme, alice, bob) = setup();
        let first = Transaction::new(&[], &alice, 5, &bob.address())
            .sign(&scheme, &alice)
            .unwrap();
        let second = Transaction::new(std::slice::from_ref(&first), &bob, 1, &alice.address());

        assert_eq!(second.parents, vec![first.hash()]);
    }

    #[test]
    fn test_json_roundtrip_keeps_signature_valid() {
        let (scheme, alice, bob) = setup();
        let signed = Transaction::new(&[], &alice, 5, &bob.address())
            .sign(&scheme, &alice)
            .unwrap();

        let json = serde_json::to_string(&signed).unwrap();
        let back: SignedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hash(), signed.hash());
        assert!(back.is_valid(&scheme));
    }
}
