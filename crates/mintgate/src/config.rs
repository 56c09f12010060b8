//! Gateway configuration
//!
//! Deployment parameters for the gateway: which chain and contracts the
//! published roots live on, and the API client id used by the SDK sitting in
//! front of them. Values come from the environment with defaults matching
//! the production deployment; the client id has no default and must be set.

use mintgate_types::Address;

use crate::error::{Error, Result};

/// Production minter contract address
pub const DEFAULT_MINTER_ADDRESS: &str = "0x86153A0d9c060BE48A0cfc2daEed3Eee957C9DD7";

/// Production NFT contract address
pub const DEFAULT_NFT_ADDRESS: &str = "0x102c527714ab7e652630cac7a30abb482b041fd0";

/// Default chain id (Ethereum mainnet)
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Deployment configuration for a gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// SDK client id
    pub client_id: String,
    /// Address of the minter contract holding the committed roots
    pub minter_address: Address,
    /// Address of the NFT contract the minter mints against
    pub nft_address: Address,
    /// Chain the contracts are deployed on
    pub chain_id: u64,
}

impl GatewayConfig {
    /// Load configuration from the environment
    ///
    /// Reads `MINTGATE_CLIENT_ID` (required), `MINTGATE_MINTER_ADDRESS`,
    /// `MINTGATE_NFT_ADDRESS`, and `MINTGATE_CHAIN_ID` (all optional, with
    /// production defaults).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let client_id = get("MINTGATE_CLIENT_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("MINTGATE_CLIENT_ID is not set".to_string()))?;

        let minter_address = get("MINTGATE_MINTER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_MINTER_ADDRESS.to_string());
        let minter_address = Address::from_hex(&minter_address)
            .map_err(|e| Error::Config(format!("MINTGATE_MINTER_ADDRESS: {}", e)))?;

        let nft_address =
            get("MINTGATE_NFT_ADDRESS").unwrap_or_else(|| DEFAULT_NFT_ADDRESS.to_string());
        let nft_address = Address::from_hex(&nft_address)
            .map_err(|e| Error::Config(format!("MINTGATE_NFT_ADDRESS: {}", e)))?;

        let chain_id = match get("MINTGATE_CHAIN_ID") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("MINTGATE_CHAIN_ID: {}", e)))?,
            None => DEFAULT_CHAIN_ID,
        };

        Ok(Self {
            client_id,
            minter_address,
            nft_address,
            chain_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            GatewayConfig::from_lookup(lookup(&[("MINTGATE_CLIENT_ID", "client-123")])).unwrap();
        assert_eq!(config.client_id, "client-123");
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(
            config.minter_address,
            Address::from_hex(DEFAULT_MINTER_ADDRESS).unwrap()
        );
        assert_eq!(
            config.nft_address,
            Address::from_hex(DEFAULT_NFT_ADDRESS).unwrap()
        );
    }

    #[test]
    fn test_missing_client_id_is_an_error() {
        assert!(matches!(
            GatewayConfig::from_lookup(lookup(&[])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            GatewayConfig::from_lookup(lookup(&[("MINTGATE_CLIENT_ID", "  ")])),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("MINTGATE_CLIENT_ID", "client-123"),
            (
                "MINTGATE_MINTER_ADDRESS",
                "0x1111111111111111111111111111111111111111",
            ),
            ("MINTGATE_CHAIN_ID", "11155111"),
        ]))
        .unwrap();
        assert_eq!(config.chain_id, 11_155_111);
        assert_eq!(
            config.minter_address,
            Address::from_hex("0x1111111111111111111111111111111111111111").unwrap()
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(GatewayConfig::from_lookup(lookup(&[
            ("MINTGATE_CLIENT_ID", "client-123"),
            ("MINTGATE_CHAIN_ID", "mainnet"),
        ]))
        .is_err());

        assert!(GatewayConfig::from_lookup(lookup(&[
            ("MINTGATE_CLIENT_ID", "client-123"),
            ("MINTGATE_MINTER_ADDRESS", "0x1234"),
        ]))
        .is_err());
    }
}
