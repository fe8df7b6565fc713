//! Ethereum account address type

use std::fmt;
use std::str::FromStr;

use sha3::{Digest, Keccak256};

use crate::error::AuthError;

/// A 20-byte Ethereum account address.
///
/// Equality is raw byte equality, which subsumes the case-insensitive
/// comparison ownership checks need regardless of the hex spelling an RPC
/// node or a wallet happens to emit.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthAddress([u8; 20]);

impl EthAddress {
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Derive the address from an uncompressed SEC1 public key point
    /// (65 bytes, `0x04` tag): the last 20 bytes of keccak256 over the
    /// point body.
    pub fn from_encoded_point(point: &[u8]) -> Option<Self> {
        if point.len() != 65 || point[0] != 0x04 {
            return None;
        }
        let hash = Keccak256::digest(&point[1..]);
        let mut out = [0u8; 20];
        out.copy_from_slice(&hash[12..]);
        Some(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// EIP-55 mixed-case checksum encoding.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::digest(lower.as_bytes());
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (digest[i / 2] >> (4 * (1 - i % 2))) & 0x0f;
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for EthAddress {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(hex_part).map_err(|_| AuthError::InvalidAddress(s.to_string()))?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| AuthError::InvalidAddress(s.to_string()))?;
        Ok(Self(arr))
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}

impl fmt::Debug for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EthAddress({})", self.to_checksum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        let addr: EthAddress = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            .parse()
            .unwrap();
        let reparsed: EthAddress = addr.to_checksum().parse().unwrap();
        assert_eq!(addr, reparsed);
    }

    #[test]
    fn parse_without_prefix() {
        let a: EthAddress = "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse().unwrap();
        let b: EthAddress = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            .parse()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn equality_ignores_hex_case() {
        let lower: EthAddress = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            .parse()
            .unwrap();
        let upper: EthAddress = "0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"
            .parse()
            .unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn checksum_matches_eip55_vector() {
        let addr: EthAddress = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            .parse()
            .unwrap();
        assert_eq!(addr.to_checksum(), "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn rejects_malformed() {
        assert!("0x1234".parse::<EthAddress>().is_err());
        assert!("not hex at all".parse::<EthAddress>().is_err());
    }
}
