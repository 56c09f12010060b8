//! Recipient addresses
//!
//! Claims name a 20-byte recipient address. Parsing accepts the usual
//! `0x`-prefixed or bare hex forms and rejects the zero address, which is
//! never a valid mint recipient.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 20-byte recipient address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Create from raw bytes, rejecting the zero address
    pub fn from_bytes(bytes: [u8; 20]) -> Result<Self> {
        if bytes == [0u8; 20] {
            return Err(Error::ZeroAddress);
        }
        Ok(Address(bytes))
    }

    /// Parse from a hex string, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self> {
        let cleaned = s.trim();
        let cleaned = cleaned.strip_prefix("0x").unwrap_or(cleaned);
        if cleaned.len() != 40 {
            return Err(Error::InvalidAddress(format!(
                "expected 40 hex chars, got {}",
                cleaned.len()
            )));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(cleaned, &mut bytes)
            .map_err(|e| Error::InvalidAddress(format!("invalid hex: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Encode as `0x`-prefixed lowercase hex
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_prefixed())
    }
}

impl std::str::FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_prefixed())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_prefix() {
        let addr = Address::from_hex("0x1234567890abcdef1234567890abcdef12345678").unwrap();
        assert_eq!(
            addr.to_hex_prefixed(),
            "0x1234567890abcdef1234567890abcdef12345678"
        );
    }

    #[test]
    fn test_parse_without_prefix() {
        assert!(Address::from_hex("1234567890abcdef1234567890abcdef12345678").is_ok());
    }

    #[test]
    fn test_parse_invalid_length() {
        assert!(Address::from_hex("0x1234").is_err());
    }

    #[test]
    fn test_parse_invalid_hex() {
        assert!(Address::from_hex("0xzzzz567890abcdef1234567890abcdef12345678").is_err());
    }

    #[test]
    fn test_zero_address_rejected() {
        let err = Address::from_hex("0x0000000000000000000000000000000000000000").unwrap_err();
        assert!(matches!(err, Error::ZeroAddress));
    }
}
