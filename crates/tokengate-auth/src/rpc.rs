//! JSON-RPC ownership oracle
//!
//! Plain `eth_call`s with hand-built calldata against the configured asset
//! contract; nothing here ever writes to the chain.

use async_trait::async_trait;
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};

use crate::address::EthAddress;
use crate::chains;
use crate::error::{AuthError, AuthResult};
use crate::oracle::OwnershipOracle;

pub struct JsonRpcOracle {
    http: reqwest::Client,
    endpoint: String,
    contract: EthAddress,
}

impl JsonRpcOracle {
    /// Oracle for a known chain, resolved through the chain registry.
    pub fn new(chain_id: u64, api_key: &str, contract: EthAddress) -> AuthResult<Self> {
        let endpoint =
            chains::rpc_url(chain_id, api_key).ok_or(AuthError::UnknownChain(chain_id))?;
        Ok(Self::with_endpoint(endpoint, contract))
    }

    /// Oracle against an explicit JSON-RPC endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>, contract: EthAddress) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            contract,
        }
    }

    async fn eth_call(&self, data: Vec<u8>) -> AuthResult<String> {
        let call = json!({
            "to": self.contract.to_checksum(),
            "data": format!("0x{}", hex::encode(&data)),
        });
        let payload = json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [call, "latest"],
            "id": 1,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::OracleUnavailable(e.to_string()))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| AuthError::OracleUnavailable(e.to_string()))?;

        if let Some(err) = body.get("error") {
            // Contract reverts (e.g. ownerOf on a nonexistent id) come back
            // as JSON-RPC error objects.
            return Err(AuthError::AssetNotFound(err.to_string()));
        }
        body.get("result")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| AuthError::OracleUnavailable("malformed RPC response".into()))
    }
}

#[async_trait]
impl OwnershipOracle for JsonRpcOracle {
    async fn owner_of(&self, token_id: u64) -> AuthResult<EthAddress> {
        let mut data = selector("ownerOf(uint256)").to_vec();
        data.extend_from_slice(&word_u64(token_id));
        let result = self.eth_call(data).await?;
        decode_address(&result)
    }

    async fn balance_of(&self, owner: &EthAddress, token_id: u64) -> AuthResult<u128> {
        let mut data = selector("balanceOf(address,uint256)").to_vec();
        data.extend_from_slice(&word_address(owner));
        data.extend_from_slice(&word_u64(token_id));
        let result = self.eth_call(data).await?;
        decode_uint(&result)
    }
}

/// First four bytes of keccak256 over the canonical signature.
fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn word_u64(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

fn word_address(address: &EthAddress) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(address.as_bytes());
    out
}

/// An `address` return value: the low 20 bytes of a single 32-byte word.
fn decode_address(result: &str) -> AuthResult<EthAddress> {
    let hex_part = result.strip_prefix("0x").unwrap_or(result);
    if hex_part.len() < 64 {
        return Err(AuthError::AssetNotFound(format!(
            "short ownerOf result: {result}"
        )));
    }
    hex_part[24..64].parse()
}

/// A `uint256` return value, clamped to u128. Callers only ever ask whether
/// the balance is nonzero.
fn decode_uint(result: &str) -> AuthResult<u128> {
    let hex_part = result.strip_prefix("0x").unwrap_or(result);
    if hex_part.is_empty() {
        return Ok(0);
    }
    let (high, low) = if hex_part.len() > 32 {
        hex_part.split_at(hex_part.len() - 32)
    } else {
        ("", hex_part)
    };
    if high.bytes().any(|b| b != b'0') {
        return Ok(u128::MAX);
    }
    u128::from_str_radix(low, 16)
        .map_err(|_| AuthError::OracleUnavailable(format!("unparseable balance: {result}")))
}
