use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::error::{ServerError, ServerResult};
use crate::media::MEDIA_CONTENT_TYPE;
use crate::state::AppState;

pub async fn get_stream(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Path(streamtoken): Path<String>,
) -> ServerResult<Response> {
    if !state.auth.authorize_stream(&streamtoken, addr.ip()) {
        tracing::debug!(client = %addr.ip(), "stream token rejected");
        return Err(ServerError::FileNotFound);
    }

    let file = tokio::fs::File::open(&state.media.path).await.map_err(|err| {
        tracing::error!(%err, path = %state.media.path.display(), "media file unreadable");
        ServerError::FileNotFound
    })?;

    let headers = [
        (header::CONTENT_TYPE, MEDIA_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", state.media.file_name),
        ),
    ];
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((headers, body).into_response())
}
