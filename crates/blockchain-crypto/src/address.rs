//! Account/pool addresses.
//!
//! The staking core keys every resource (`StakePool`, `ValidatorConfig`,
//! `OwnerCapability`) by `Address`, round-tripping through a single
//! canonical `0x`-prefixed hex encoding.

use crate::hash::Hash256;
use crate::{CryptoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte account/pool identity, displayed as `0x`-prefixed hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_hash(hash: Hash256) -> Self {
        Self(*hash.as_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)
            .map_err(|e| CryptoError::AddressError(format!("invalid hex: {e}")))?;
        if bytes.len() != 32 {
            return Err(CryptoError::AddressError(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_hex() {
        let addr = Address::from_bytes([7u8; 32]);
        let parsed = Address::from_hex(&addr.to_string()).unwrap();
        assert_eq!(addr, parsed);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Address::from_hex("0x1234").is_err());
    }
}
