//! tokengate-auth: proof-of-ownership gating for a protected byte stream
//!
//! Issues one-time challenges bound to a requester's network identity,
//! recovers signing addresses from personal-message signatures, checks asset
//! ownership through an [`OwnershipOracle`], and manages the short-lived
//! stream tokens that unlock the protected resource.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokengate_auth::{AssetQuery, Authenticator, InMemoryOracle};
//!
//! let oracle = Arc::new(InMemoryOracle::new());
//! let auth = Authenticator::new(oracle);
//!
//! let challenge = auth.issue_challenge(client_ip);
//! // client signs challenge.value off-chain...
//! let token = auth
//!     .verify(&signature, AssetQuery::SingleOwner(7), client_ip)
//!     .await?;
//! assert!(auth.authorize_stream(&token.value, client_ip));
//! ```

mod address;
mod challenge;
mod chains;
mod error;
mod memory;
mod oracle;
mod rpc;
mod signature;
mod token;
mod verify;

// Re-exports
pub use address::EthAddress;
pub use challenge::{Challenge, ChallengeStore, CHALLENGE_TTL, CHALLENGE_WORDS};
pub use chains::{chain_name, rpc_url, ChainDetail, KNOWN_CHAINS};
pub use error::{AuthError, AuthResult};
pub use memory::InMemoryOracle;
pub use oracle::{AssetQuery, OwnershipOracle};
pub use rpc::JsonRpcOracle;
pub use signature::{personal_digest, recover_signer};
pub use token::{StreamToken, StreamTokenStore, STREAM_TOKEN_TTL};
pub use verify::Authenticator;
