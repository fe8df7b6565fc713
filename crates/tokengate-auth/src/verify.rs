//! Verification orchestrator
//!
//! Composes challenge redemption, signer recovery, and the ownership oracle
//! into stream-token minting. Owns both token stores; request handlers only
//! ever talk to this type.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::challenge::{Challenge, ChallengeStore, CHALLENGE_TTL};
use crate::error::{AuthError, AuthResult};
use crate::oracle::{AssetQuery, OwnershipOracle};
use crate::signature::recover_signer;
use crate::token::{StreamToken, StreamTokenStore, STREAM_TOKEN_TTL};

pub struct Authenticator {
    challenges: ChallengeStore,
    tokens: StreamTokenStore,
    oracle: Arc<dyn OwnershipOracle>,
}

impl Authenticator {
    pub fn new(oracle: Arc<dyn OwnershipOracle>) -> Self {
        Self::with_ttls(oracle, CHALLENGE_TTL, STREAM_TOKEN_TTL)
    }

    pub fn with_ttls(
        oracle: Arc<dyn OwnershipOracle>,
        challenge_ttl: Duration,
        token_ttl: Duration,
    ) -> Self {
        Self {
            challenges: ChallengeStore::new(challenge_ttl),
            tokens: StreamTokenStore::new(token_ttl),
            oracle,
        }
    }

    pub fn issue_challenge(&self, requester: IpAddr) -> Challenge {
        self.challenges.issue(requester)
    }

    /// Redeem a signed challenge for a stream token.
    ///
    /// The matched challenge is consumed up front: a failed ownership check
    /// burns it rather than restoring it, so every challenge is good for at
    /// most one verification attempt. No store lock is held across the
    /// oracle call. Oracle failures deny — absence of proof is absence of
    /// ownership.
    pub async fn verify(
        &self,
        signature: &str,
        query: AssetQuery,
        requester: IpAddr,
    ) -> AuthResult<StreamToken> {
        let challenge = self.challenges.take_match(requester)?;
        let signer = recover_signer(&challenge.value, signature)?;
        tracing::debug!(challenge = %challenge.value, %signer, ?query, "checking ownership");

        let owns = match query {
            AssetQuery::MultiOwner(id) => match self.oracle.balance_of(&signer, id).await {
                Ok(quantity) => quantity > 0,
                Err(err) => {
                    tracing::warn!(%err, token_id = id, "balance query failed, denying");
                    false
                }
            },
            AssetQuery::SingleOwner(id) => match self.oracle.owner_of(id).await {
                Ok(owner) => owner == signer,
                Err(err) => {
                    tracing::warn!(%err, token_id = id, "owner query failed, denying");
                    false
                }
            },
            AssetQuery::Unspecified => false,
        };

        if !owns {
            return Err(AuthError::NotOwner);
        }

        let token = self.tokens.issue(requester);
        tracing::info!(%requester, "ownership verified, stream token minted");
        Ok(token)
    }

    /// Gate a stream request. Any failed validation opportunistically sweeps
    /// expired tokens before the denial is reported.
    pub fn authorize_stream(&self, token_value: &str, requester: IpAddr) -> bool {
        if self.tokens.validate(token_value, requester) {
            return true;
        }
        let swept = self.tokens.sweep_expired();
        if swept > 0 {
            tracing::debug!(swept, "dropped expired stream tokens");
        }
        false
    }

    pub fn outstanding_challenges(&self) -> usize {
        self.challenges.outstanding()
    }

    pub fn active_tokens(&self) -> usize {
        self.tokens.active()
    }
}
