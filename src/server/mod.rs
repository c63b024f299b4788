pub mod handlers;
pub mod types;

use crate::{Result, config::Config, upstream::HttpInferenceClient};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, path::Path, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info;

/// Request body limit; uploads above it are refused before reaching a handler.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// The proxy routes, with unmatched paths served from `static_dir` and
/// falling back to its `index.html` so the frontend can route them. GETs on
/// the API paths are page loads and get the frontend too.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let index = Path::new(static_dir).join("index.html");
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route(
            "/languageModel",
            post(handlers::language_model).get_service(spa.clone()),
        )
        .route(
            "/convModel",
            post(handlers::conv_model).get_service(spa.clone()),
        )
        .fallback_service(spa)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let upstream = HttpInferenceClient::new(config.upstream.clone())?;
    info!("Relaying model requests to {}", config.upstream.base_url);

    let app_state = AppState {
        upstream: Arc::new(upstream),
        forward_number_to_generate: config.upstream.forward_number_to_generate,
    };

    let app = router(app_state, &config.server.static_dir);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
