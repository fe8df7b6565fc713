//! In-memory ownership oracle
//!
//! Canned ownership records for tests: lookups never touch the network, so
//! verification flows stay deterministic. An availability toggle simulates a
//! dead RPC endpoint.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::address::EthAddress;
use crate::error::{AuthError, AuthResult};
use crate::oracle::OwnershipOracle;

#[derive(Default)]
pub struct InMemoryOracle {
    /// token_id -> owner
    owners: RwLock<HashMap<u64, EthAddress>>,
    /// (holder, token_id) -> quantity
    balances: RwLock<HashMap<(EthAddress, u64), u128>>,
    unavailable: AtomicBool,
}

impl InMemoryOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_owner(&self, token_id: u64, owner: EthAddress) {
        self.owners.write().unwrap().insert(token_id, owner);
    }

    pub fn set_balance(&self, holder: EthAddress, token_id: u64, quantity: u128) {
        self.balances
            .write()
            .unwrap()
            .insert((holder, token_id), quantity);
    }

    /// Make every query fail with `OracleUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl OwnershipOracle for InMemoryOracle {
    async fn owner_of(&self, token_id: u64) -> AuthResult<EthAddress> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::OracleUnavailable("oracle offline".into()));
        }
        self.owners
            .read()
            .unwrap()
            .get(&token_id)
            .copied()
            .ok_or_else(|| AuthError::AssetNotFound(format!("token {token_id}")))
    }

    async fn balance_of(&self, owner: &EthAddress, token_id: u64) -> AuthResult<u128> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::OracleUnavailable("oracle offline".into()));
        }
        Ok(self
            .balances
            .read()
            .unwrap()
            .get(&(*owner, token_id))
            .copied()
            .unwrap_or(0))
    }
}
