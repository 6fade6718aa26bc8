use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use careerlens::config::Config;
use careerlens::logging::init_tracing;
use careerlens::resume::extractor::PdfTextExtractor;
use careerlens::routes::build_router;
use careerlens::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_tracing(env!("CARGO_CRATE_NAME"), &config.rust_log);

    info!("Starting careerlens API v{}", env!("CARGO_PKG_VERSION"));
    info!("Upload limit: {} bytes", config.max_upload_bytes);

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(PdfTextExtractor),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
