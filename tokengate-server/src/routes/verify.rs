use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
};
use serde::{Deserialize, Serialize};
use tokengate_auth::AssetQuery;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Asset ids arrive as JSON numbers or numeric strings depending on the
/// client; both are accepted.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum AssetId {
    Number(u64),
    Text(String),
}

impl AssetId {
    fn as_u64(&self) -> Option<u64> {
        match self {
            AssetId::Number(n) => Some(*n),
            AssetId::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub signature: String,
    #[serde(rename = "tokenId")]
    pub token_id: Option<AssetId>,
    #[serde(rename = "token1155Id")]
    pub token1155_id: Option<AssetId>,
}

impl VerifyRequest {
    /// A present `token1155Id` selects multi-owner mode outright, even when
    /// unparseable; a present but non-numeric id degrades to `Unspecified`
    /// (denied) rather than falling through to the other mode.
    fn asset_query(&self) -> AssetQuery {
        if let Some(id) = &self.token1155_id {
            return match id.as_u64() {
                Some(id) => AssetQuery::MultiOwner(id),
                None => AssetQuery::Unspecified,
            };
        }
        match self.token_id.as_ref().and_then(AssetId::as_u64) {
            Some(id) => AssetQuery::SingleOwner(id),
            None => AssetQuery::Unspecified,
        }
    }
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub data: &'static str,
    pub token: String,
}

pub async fn post_verify(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(request): Json<VerifyRequest>,
) -> ServerResult<Json<VerifyResponse>> {
    let query = request.asset_query();
    match state.auth.verify(&request.signature, query, addr.ip()).await {
        Ok(token) => Ok(Json(VerifyResponse {
            data: "pass",
            token: token.value,
        })),
        Err(err) => {
            tracing::debug!(client = %addr.ip(), %err, "verification denied");
            Err(ServerError::SignatureRejected)
        }
    }
}
