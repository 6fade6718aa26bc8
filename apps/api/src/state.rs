use std::sync::Arc;

use crate::auth::store::{RevocationStore, UserStore};
use crate::auth::token::TokenIssuer;
use crate::config::Config;
use crate::resume::extractor::TextExtractor;

/// Shared state for the résumé / roadmap API, injected into handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extractor. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
}

/// Shared state for the auth service. Independent of `AppState`.
#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserStore>,
    /// Process-wide revoked token set; entries live until restart.
    pub revoked: Arc<dyn RevocationStore>,
    pub tokens: TokenIssuer,
}
