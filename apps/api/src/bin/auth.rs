//! Standalone auth service. Shares no state with the résumé / roadmap API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use careerlens::auth::store::{InMemoryRevocationStore, SqlxUserStore};
use careerlens::auth::token::TokenIssuer;
use careerlens::config::AuthConfig;
use careerlens::db::create_pool;
use careerlens::logging::init_tracing;
use careerlens::routes::build_auth_router;
use careerlens::state::AuthState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AuthConfig::from_env()?;

    init_tracing(env!("CARGO_CRATE_NAME"), &config.rust_log);

    info!("Starting careerlens auth v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let state = AuthState {
        users: Arc::new(SqlxUserStore::new(db)),
        revoked: Arc::new(InMemoryRevocationStore::default()),
        tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_minutes),
    };
    info!("Access tokens expire after {} minutes", config.token_ttl_minutes);

    let app = build_auth_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
