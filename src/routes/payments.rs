//! Payment route handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::db::queries;
use crate::error::{AppError, Result};
use crate::models::PaymentRecord;
use crate::pricing::calculators::{payment_details, quote_totals, PricingPolicy};
use crate::pricing::requests::RecordPaymentRequest;
use crate::pricing::responses::PaymentSummaryResponse;
use crate::AppState;

/// Record a payment or refund against a quote
pub async fn record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<Json<PaymentRecord>> {
    state.store.get(id).await?.ok_or(AppError::NotFound)?;
    let payment = queries::insert_payment(
        &state.db,
        id,
        req.amount,
        &req.method,
        &req.remarks,
        req.is_refund,
    )
    .await?;
    tracing::info!(
        "Recorded {} of {} against quote {}",
        if payment.is_refund { "refund" } else { "payment" },
        payment.amount,
        id
    );
    Ok(Json(payment))
}

/// Payments recorded against a quote, oldest first
pub async fn list(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentRecord>>> {
    state.store.get(id).await?.ok_or(AppError::NotFound)?;
    let payments = queries::list_payments(&state.db, id).await?;
    Ok(Json(payments))
}

/// Payment summary for one quote: cost, paid, balance, and the status badge
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentSummaryResponse>> {
    let quote = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    let totals = quote_totals(&quote, PricingPolicy::default());
    let payments = queries::list_payments(&state.db, id).await?;
    let details = payment_details(totals.final_total, &payments);
    Ok(Json(PaymentSummaryResponse { details, payments }))
}
