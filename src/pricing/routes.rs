//! Stateless pricing compute endpoints.
//!
//! The back-office UI calls these mid-edit with a quote (or section)
//! snapshot and merges the returned totals back into its own state. Nothing
//! here touches the database.

use axum::{routing::post, Json, Router};

use crate::AppState;

use super::calculators::{
    classify_payment_status, quote_totals, section_totals, PricingPolicy, QuoteTotals,
    SectionTotals,
};
use super::requests::{PaymentStatusRequest, QuoteTotalsRequest, SectionTotalsRequest};
use super::responses::PaymentStatusResponse;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/section-totals", post(compute_section_totals))
        .route("/quote-totals", post(compute_quote_totals))
        .route("/payment-status", post(compute_payment_status))
}

async fn compute_section_totals(
    Json(req): Json<SectionTotalsRequest>,
) -> Json<SectionTotals> {
    let policy = PricingPolicy {
        clamp_at_zero: req.clamp_at_zero,
    };
    Json(section_totals(&req.section, policy))
}

async fn compute_quote_totals(Json(req): Json<QuoteTotalsRequest>) -> Json<QuoteTotals> {
    let policy = PricingPolicy {
        clamp_at_zero: req.clamp_at_zero,
    };
    Json(quote_totals(&req.quote, policy))
}

async fn compute_payment_status(
    Json(req): Json<PaymentStatusRequest>,
) -> Json<PaymentStatusResponse> {
    Json(PaymentStatusResponse {
        status: classify_payment_status(req.total_cost, req.total_paid),
        balance: req.total_cost - req.total_paid,
    })
}
