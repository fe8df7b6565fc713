//! Endpoint error mapping
//!
//! Each endpoint exposes exactly two caller-visible outcomes; every internal
//! failure collapses into the endpoint's generic denial. The `/verify` denial
//! keeps the legacy 500 status for client compatibility.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Uniform `/verify` denial; deliberately indistinguishable across a bad
    /// signature, a missing challenge, and a failed ownership check.
    #[error("signature not valid")]
    SignatureRejected,

    /// Uniform `/stream` denial for any unknown/expired/mismatched token or
    /// unreadable media file.
    #[error("file not found")]
    FileNotFound,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::SignatureRejected => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "data": "signature not valid" })),
            )
                .into_response(),
            ServerError::FileNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "status": "File not found" })),
            )
                .into_response(),
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
