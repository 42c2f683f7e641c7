//! Trek-operations pricing and quoting service.
//!
//! Axum JSON service for the staff back-office: quote pricing (the cost
//! matrix engine in `pricing::calculators`), quote storage, trek templates,
//! payment summaries, and the export/invoice interface boundaries.

use axum::{routing::get, Json, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod cache;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod pricing;
pub mod routes;

use cache::{AppCache, CacheStats};
use db::{PgQuoteStore, QuoteStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub store: Arc<dyn QuoteStore>,
}

impl AppState {
    pub fn new(db: PgPool) -> Self {
        let store = Arc::new(PgQuoteStore::new(db.clone()));
        Self {
            db,
            cache: AppCache::new(),
            store,
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn cache_stats(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cache/stats", get(cache_stats))
        .nest("/api", routes::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
