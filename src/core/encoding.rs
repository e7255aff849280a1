//! Base64 helpers
//!
//! Addresses, signatures and transaction hashes are carried as standard
//! (padded) base64 strings.

use base64ct::{Base64, Encoding};

use crate::error::CryptoError;

/// Encode bytes as standard base64
pub fn encode(bytes: &[u8]) -> String {
    Base64::encode_string(bytes)
}

/// Decode standard base64, naming the field on failure
pub fn decode(value: &str, field: &str) -> Result<Vec<u8>, CryptoError> {
    Base64::decode_vec(value).map_err(|_| CryptoError::Encoding {
        field: field.to_string(),
    })
}

/// Serde adapter storing `Vec<u8>` as a base64 string
pub mod serde_base64 {
    use base64ct::{Base64, Encoding};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&Base64::encode_string(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let value = String::deserialize(deserializer)?;
        Base64::decode_vec(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_padded_standard_alphabet() {
        assert_eq!(encode(&[0xfb, 0xff]), "+/8=");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode("not base64!", "sender").unwrap_err();
        assert!(err.to_string().contains("sender"));
    }

    #[test]
    fn test_decode_accepts_encoded() {
        assert_eq!(decode(&encode(b"falcon"), "x").unwrap(), b"falcon");
    }
}
