//! Identity records committed into the minting trees
//!
//! A [`TokenDna`] is the per-token identity record the issuer commits to when
//! publishing a tree: a unique 32-byte identifier, the issuance timestamp,
//! and a pointer to the token's metadata. Its canonical byte encoding is the
//! leaf pre-image, so the layout is versioned and pinned by tests — a tree
//! built under one version never silently matches records encoded under
//! another.

use crate::encoding::Digest;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Current canonical encoding version.
///
/// Bump on any change to field order, widths, or representation in
/// [`TokenDna::canonical_bytes`].
pub const ENCODING_VERSION: u8 = 1;

/// A single authorized identity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDna {
    /// Unique identifier of the physical tag backing this token
    pub nfc_id: Digest,
    /// Issuance timestamp (seconds since the Unix epoch)
    pub birthday: u64,
    /// Metadata URI for the token
    pub token_uri: String,
}

impl TokenDna {
    /// Create a new identity record
    pub fn new(nfc_id: Digest, birthday: u64, token_uri: impl Into<String>) -> Self {
        Self {
            nfc_id,
            birthday,
            token_uri: token_uri.into(),
        }
    }

    /// Canonical byte encoding, version 1:
    ///
    /// ```text
    /// version (1) || nfc_id (32) || birthday (32, big-endian word) || token_uri (UTF-8)
    /// ```
    ///
    /// The timestamp is widened into a 32-byte big-endian word so the layout
    /// matches the word size the committed roots were built against.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        if self.token_uri.is_empty() {
            return Err(Error::InvalidEncoding(
                "token URI must not be empty".to_string(),
            ));
        }

        let uri = self.token_uri.as_bytes();
        let mut out = Vec::with_capacity(1 + 32 + 32 + uri.len());
        out.push(ENCODING_VERSION);
        out.extend_from_slice(self.nfc_id.as_bytes());

        let mut word = [0u8; 32];
        word[24..32].copy_from_slice(&self.birthday.to_be_bytes());
        out.extend_from_slice(&word);

        out.extend_from_slice(uri);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenDna {
        TokenDna::new(Digest::from_bytes([0x11; 32]), 1_600_000_000, "ipfs://Qm1234")
    }

    #[test]
    fn test_canonical_bytes_layout() {
        let dna = sample();
        let bytes = dna.canonical_bytes().unwrap();

        assert_eq!(bytes[0], ENCODING_VERSION);
        assert_eq!(&bytes[1..33], dna.nfc_id.as_slice());
        // timestamp occupies the low 8 bytes of the 32-byte word
        assert_eq!(&bytes[33..57], &[0u8; 24]);
        assert_eq!(&bytes[57..65], &1_600_000_000u64.to_be_bytes());
        assert_eq!(&bytes[65..], dna.token_uri.as_bytes());
    }

    #[test]
    fn test_canonical_bytes_deterministic() {
        assert_eq!(
            sample().canonical_bytes().unwrap(),
            sample().canonical_bytes().unwrap()
        );
    }

    #[test]
    fn test_canonical_bytes_field_sensitivity() {
        let base = sample().canonical_bytes().unwrap();

        let mut other = sample();
        other.birthday += 1;
        assert_ne!(base, other.canonical_bytes().unwrap());

        let mut other = sample();
        other.token_uri.push('x');
        assert_ne!(base, other.canonical_bytes().unwrap());

        let other = TokenDna::new(Digest::from_bytes([0x12; 32]), 1_600_000_000, "ipfs://Qm1234");
        assert_ne!(base, other.canonical_bytes().unwrap());
    }

    #[test]
    fn test_empty_uri_rejected() {
        let dna = TokenDna::new(Digest::from_bytes([0x11; 32]), 0, "");
        assert!(dna.canonical_bytes().is_err());
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("nfcId"));
        assert!(json.contains("tokenUri"));
        let back: TokenDna = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
