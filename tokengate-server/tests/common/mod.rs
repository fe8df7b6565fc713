use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;
use tokengate_auth::InMemoryOracle;
use tokio::net::TcpListener;

pub const MEDIA_NAME: &str = "feature.mp4";
pub const MEDIA_BYTES: &[u8] = b"\x00\x00\x00\x18ftypmp42 not actually a movie";

pub struct TestServer {
    pub url: String,
    #[allow(dead_code)]
    pub addr: SocketAddr,
    // Held so the media directory outlives the server task.
    _media_dir: TempDir,
}

impl TestServer {
    pub async fn start(oracle: Arc<InMemoryOracle>) -> Self {
        let media_dir = tempfile::tempdir().unwrap();
        std::fs::write(media_dir.path().join(MEDIA_NAME), MEDIA_BYTES).unwrap();

        let config = tokengate_server::config::Config {
            host: "127.0.0.1".into(),
            port: 0, // OS assigns port
            chain: Default::default(),
            media: tokengate_server::config::MediaConfig {
                dir: media_dir.path().display().to_string(),
                name: None,
            },
        };

        let state = tokengate_server::state::AppState::with_oracle(&config, oracle).unwrap();
        let app = tokengate_server::routes::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        // Give server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Self {
            url: format!("http://{addr}"),
            addr,
            _media_dir: media_dir,
        }
    }
}
