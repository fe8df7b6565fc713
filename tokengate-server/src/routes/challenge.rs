use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub data: String,
}

pub async fn get_challenge(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Json<ChallengeResponse> {
    let challenge = state.auth.issue_challenge(addr.ip());
    tracing::debug!(
        client = %addr.ip(),
        challenge = %challenge.value,
        outstanding = state.auth.outstanding_challenges(),
        "issued challenge"
    );
    Json(ChallengeResponse {
        data: challenge.value,
    })
}
