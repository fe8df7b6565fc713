//! Ownership oracle: read-only view over a ledger's asset ownership

use async_trait::async_trait;

use crate::address::EthAddress;
use crate::error::AuthResult;

/// Which asset standard a verification request targets.
///
/// `Unspecified` is a deliberate third state: a request naming no asset is
/// denied outright rather than falling back to any balance check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetQuery {
    /// ERC-721: exactly one owner per id (`ownerOf`).
    SingleOwner(u64),
    /// ERC-1155: per-id balances (`balanceOf`).
    MultiOwner(u64),
    Unspecified,
}

/// Read-only query surface over on-chain asset-ownership records.
///
/// Implementations may be slow and may fail; callers treat absence of proof
/// as absence of ownership.
#[async_trait]
pub trait OwnershipOracle: Send + Sync {
    /// Current owner of a single-owner asset id.
    async fn owner_of(&self, token_id: u64) -> AuthResult<EthAddress>;

    /// How many units of `token_id` the address holds.
    async fn balance_of(&self, owner: &EthAddress, token_id: u64) -> AuthResult<u128>;
}
