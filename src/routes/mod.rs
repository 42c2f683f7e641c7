//! HTTP route handlers

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub mod payments;
pub mod quotes;

/// Assemble the /api router
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/pricing", crate::pricing::router())
        .route("/templates", get(quotes::templates))
        .route("/quotes", get(quotes::list).post(quotes::create))
        .route("/quotes/:id", get(quotes::get).put(quotes::update))
        .route("/quotes/:id/group-size", post(quotes::group_size))
        .route("/quotes/:id/invoice-payload", get(quotes::invoice_payload))
        .route("/quotes/:id/export", get(quotes::export))
        .route(
            "/quotes/:id/payments",
            get(payments::list).post(payments::record),
        )
        .route("/quotes/:id/payment-summary", get(payments::summary))
}
