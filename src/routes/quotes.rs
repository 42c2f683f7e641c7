//! Quote route handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::export::{build_quote_export, QuoteExport};
use crate::models::{Quote, QuoteSummary, TemplateSummary};
use crate::pricing::calculators::{quote_totals, PricingPolicy};
use crate::pricing::requests::{CreateQuoteRequest, GroupSizeRequest};
use crate::pricing::responses::{InvoicePayload, QuoteResponse};
use crate::pricing::services;
use crate::AppState;

fn with_totals(quote: Quote) -> QuoteResponse {
    let totals = quote_totals(&quote, PricingPolicy::default());
    QuoteResponse { quote, totals }
}

/// Template listing for the trek picker
pub async fn templates(State(state): State<AppState>) -> Result<Json<Vec<TemplateSummary>>> {
    if let Some(cached) = state.cache.template_list.get("all").await {
        tracing::debug!("Cache HIT for template listing");
        return Ok(Json((*cached).clone()));
    }
    tracing::debug!("Cache MISS for template listing");
    let summaries = crate::db::queries::list_templates(&state.db).await?;
    state
        .cache
        .template_list
        .insert("all".to_string(), Arc::new(summaries.clone()))
        .await;
    Ok(Json(summaries))
}

/// Quotes index
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<QuoteSummary>>> {
    let summaries = services::list_quotes(state.store.as_ref()).await?;
    Ok(Json(summaries))
}

/// Create a quote seeded from a trek template
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateQuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let quote = services::create_from_template(
        &state.db,
        &state.cache,
        state.store.as_ref(),
        req.template_id,
        req.group_size,
    )
    .await?;
    Ok(Json(with_totals(quote)))
}

/// Fetch one quote with its computed breakdown
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteResponse>> {
    let quote = state
        .store
        .get(id)
        .await?
        .ok_or(crate::error::AppError::NotFound)?;
    Ok(Json(with_totals(quote)))
}

/// Replace a quote's document; derived totals are recomputed before saving
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(quote): Json<Quote>,
) -> Result<Json<QuoteResponse>> {
    let quote = services::replace_quote(state.store.as_ref(), id, quote).await?;
    Ok(Json(with_totals(quote)))
}

/// Change the group size, propagating into pax-following sections
pub async fn group_size(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GroupSizeRequest>,
) -> Result<Json<QuoteResponse>> {
    let quote =
        services::update_group_size(state.store.as_ref(), id, req.group_size).await?;
    Ok(Json(with_totals(quote)))
}

/// Finalized invoice payload for the external booking API
pub async fn invoice_payload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoicePayload>> {
    let quote = state
        .store
        .get(id)
        .await?
        .ok_or(crate::error::AppError::NotFound)?;
    Ok(Json(services::invoice_payload(&quote)))
}

/// Export table model for the PDF/Excel renderer
pub async fn export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteExport>> {
    let quote = state
        .store
        .get(id)
        .await?
        .ok_or(crate::error::AppError::NotFound)?;
    Ok(Json(build_quote_export(&quote, PricingPolicy::default())))
}
