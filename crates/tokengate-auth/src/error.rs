//! Auth core error types

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("signature malformed or unrecoverable: {0}")]
    InvalidSignature(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("ownership oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("asset not found: {0}")]
    AssetNotFound(String),

    #[error("no live challenge for requester")]
    ChallengeNotFound,

    #[error("challenge expired")]
    ChallengeExpired,

    #[error("ownership not confirmed")]
    NotOwner,

    #[error("unsupported chain id: {0}")]
    UnknownChain(u64),
}
