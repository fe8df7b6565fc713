use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

mod challenge;
mod health;
mod stream;
mod verify;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/challenge", get(challenge::get_challenge))
        .route("/verify", post(verify::post_verify))
        .route("/stream/{streamtoken}", get(stream::get_stream))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
