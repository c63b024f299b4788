use axum::Router;
use ml_proxy::{
    config::UpstreamConfig,
    server::{self, handlers::AppState},
    upstream::HttpInferenceClient,
};
use std::sync::Arc;
use tempfile::TempDir;

pub const MULTIPART_BOUNDARY: &str = "ml-proxy-test-boundary";

pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\">spa</div></body></html>";

/// Upstream config suited to tests: short timeout, no retries.
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        timeout_secs: 2,
        max_retries: 0,
        retry_backoff_ms: 10,
        forward_number_to_generate: false,
    }
}

/// Static directory with an `index.html` and one asset.
pub fn create_static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('app');").unwrap();
    dir
}

/// The full router wired to a real HTTP upstream client.
pub fn create_test_app(upstream: UpstreamConfig) -> (Router, TempDir) {
    let static_dir = create_static_dir();
    let forward_number_to_generate = upstream.forward_number_to_generate;
    let client = HttpInferenceClient::new(upstream).unwrap();

    let state = AppState {
        upstream: Arc::new(client),
        forward_number_to_generate,
    };

    let app = server::router(state, &static_dir.path().to_string_lossy());
    (app, static_dir)
}

/// A local URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Serves `app` on an ephemeral port and returns its base URL.
pub async fn spawn_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A multipart body with a single file field; returns the content type and the bytes.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body,
    )
}

/// A few bytes starting with the JPEG magic number.
pub fn fake_jpeg() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xFF, 0xD9]
}
