//! Type-safe encoding wrappers
//!
//! Newtype wrappers around encoded data to prevent encoding confusion and
//! provide compile-time safety for the 32-byte digests the minting trees are
//! built from.

use crate::error::{Error, Result};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Keccak-256 digest (32 bytes)
///
/// This type represents a tree node or committed root with compile-time size
/// guarantees. It can be constructed from hex or base64 strings and converted
/// back. Roots and proof elements published by the issuer are `0x`-prefixed
/// hex on the wire; `from_hex` accepts both prefixed and bare forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl Digest {
    /// The all-zero digest, used to detect unset roots
    pub const ZERO: Digest = Digest([0u8; 32]);

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }

    /// Try to create from a byte slice
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidEncoding(format!(
                "digest must be 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Digest(arr))
    }

    /// Parse from a hex-encoded string, with or without a `0x` prefix
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(s).map_err(|e| Error::InvalidEncoding(format!("invalid hex: {}", e)))?;
        Self::try_from_slice(&bytes)
    }

    /// Parse from a base64-encoded string
    pub fn from_base64(s: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64: {}", e)))?;
        Self::try_from_slice(&bytes)
    }

    /// Encode as hex string (lowercase, no prefix)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Encode as `0x`-prefixed hex string, the issuer's wire form
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Encode as base64 string
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(self.0)
    }

    /// Whether this is the all-zero digest
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Get as a byte slice
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Digest(bytes)
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_prefixed())
    }
}

// Digests travel as 0x-prefixed hex in metadata JSON
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_prefixed())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Hex-encoded data
///
/// This type represents data that is hex-encoded (lowercase).
/// It provides safe conversion to/from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hex(String);

impl Hex {
    /// Create a new Hex wrapper from a string
    ///
    /// Note: This does not validate the hex encoding.
    /// Use `decode()` to validate and extract bytes.
    pub fn new(s: String) -> Self {
        Hex(s)
    }

    /// Create a Hex wrapper from raw bytes
    pub fn encode(bytes: &[u8]) -> Self {
        Hex(hex::encode(bytes))
    }

    /// Decode the hex string to bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        hex::decode(&self.0).map_err(|e| Error::InvalidEncoding(format!("invalid hex: {}", e)))
    }

    /// Get the underlying string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Hex {
    fn from(s: String) -> Self {
        Hex(s)
    }
}

impl AsRef<str> for Hex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
