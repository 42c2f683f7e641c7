//! Quote lifecycle services.
//!
//! These functions sit between the HTTP handlers and the store: they seed new
//! quotes from trek templates, keep derived totals fresh across edits, and
//! shape finalized quotes into the external booking API's invoice payload.
//! The arithmetic itself lives in `calculators`; nothing here re-implements it.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::db::store::QuoteStore;
use crate::db::queries;
use crate::error::AppError;
use crate::models::{CostRow, Quote, QuoteSummary, Section, TrekTemplate};

use super::calculators::{apply_group_size, row_total, with_recomputed_totals};
use super::responses::{ExtraServicePayload, InvoicePayload, LineItemPayload};

/// Fixed placeholder rows every new quote's extras section starts with.
const EXTRA_PLACEHOLDERS: [&str; 2] = ["Airport pickup / drop", "Extra hotel night"];

/// Build a fresh quote from a trek template.
///
/// Permits come from the template's seed rows: per-person rows get their
/// quantity from the group size, per-day rows their times from the trek
/// duration. The extras section starts with the two fixed placeholder rows
/// at rate zero; services start empty.
pub fn seed_quote(template: &TrekTemplate, group_size: i64) -> Quote {
    let mut permits = Section::named("Permits");
    permits.use_pax = true;
    for seed in template.rows() {
        let mut row = CostRow {
            id: Uuid::new_v4(),
            description: seed.description,
            service_name: None,
            rate: seed.rate,
            quantity: if seed.per_person { group_size } else { 1 },
            times: if seed.per_day { template.duration_days } else { 1 },
            per_person: seed.per_person,
            per_day: seed.per_day,
            one_time: seed.one_time,
            total: Decimal::ZERO,
        };
        row.total = row_total(&row);
        permits.rows.push(row);
    }

    let mut extras = Section::named("Extra Details");
    for name in EXTRA_PLACEHOLDERS {
        extras.rows.push(CostRow {
            id: Uuid::new_v4(),
            description: name.to_string(),
            service_name: None,
            rate: Decimal::ZERO,
            quantity: group_size,
            times: 1,
            per_person: false,
            per_day: false,
            one_time: false,
            total: Decimal::ZERO,
        });
    }

    Quote {
        id: Uuid::new_v4(),
        trek_name: template.name.clone(),
        group_size,
        permits,
        services: Section::named("Services"),
        extra_details: extras,
        custom_sections: Vec::new(),
        overall_discount_type: Default::default(),
        overall_discount_value: Decimal::ZERO,
        overall_discount_remarks: String::new(),
        service_charge: Decimal::ZERO,
    }
}

/// Look up a trek template, cache first.
pub async fn get_template(
    pool: &PgPool,
    cache: &AppCache,
    template_id: Uuid,
) -> Result<TrekTemplate, AppError> {
    if let Some(cached) = cache.templates.get(&template_id).await {
        tracing::debug!("Cache HIT for trek template: {}", template_id);
        return Ok((*cached).clone());
    }
    tracing::debug!("Cache MISS for trek template: {}", template_id);
    let template = queries::get_template(pool, template_id).await?;
    cache
        .templates
        .insert(template_id, Arc::new(template.clone()))
        .await;
    Ok(template)
}

/// Create a quote seeded from a template and persist it.
pub async fn create_from_template(
    pool: &PgPool,
    cache: &AppCache,
    store: &dyn QuoteStore,
    template_id: Uuid,
    group_size: i64,
) -> Result<Quote, AppError> {
    let template = get_template(pool, cache, template_id).await?;
    let quote = seed_quote(&template, group_size);
    store.save(&quote).await?;
    tracing::info!("Created quote {} from template {}", quote.id, template.name);
    Ok(quote)
}

/// Replace a quote's document wholesale, recomputing every derived total
/// before it is persisted. The path parameter wins over any id in the body.
pub async fn replace_quote(
    store: &dyn QuoteStore,
    id: Uuid,
    mut quote: Quote,
) -> Result<Quote, AppError> {
    store.get(id).await?.ok_or(AppError::NotFound)?;
    quote.id = id;
    let quote = with_recomputed_totals(&quote);
    store.save(&quote).await?;
    Ok(quote)
}

/// Change a quote's group size, propagating it into pax-following sections.
pub async fn update_group_size(
    store: &dyn QuoteStore,
    id: Uuid,
    group_size: i64,
) -> Result<Quote, AppError> {
    let quote = store.get(id).await?.ok_or(AppError::NotFound)?;
    let quote = apply_group_size(&quote, group_size);
    let quote = with_recomputed_totals(&quote);
    store.save(&quote).await?;
    Ok(quote)
}

/// List stored quotes for the index screen.
pub async fn list_quotes(store: &dyn QuoteStore) -> Result<Vec<QuoteSummary>, AppError> {
    store.list().await
}

fn line_items(section: &Section) -> Vec<LineItemPayload> {
    section
        .rows
        .iter()
        .map(|row| LineItemPayload {
            name: row.description.clone(),
            rate: row.rate,
            numbers: row.quantity,
            times: row.times,
        })
        .collect()
}

/// Shape a quote into the external booking API's invoice payload.
///
/// Extra-service rows are grouped by `service_name` (rows without one fall
/// under their own description), preserving first-appearance order.
pub fn invoice_payload(quote: &Quote) -> InvoicePayload {
    let mut groups: Vec<ExtraServicePayload> = Vec::new();
    for row in &quote.extra_details.rows {
        let service_name = row
            .service_name
            .clone()
            .unwrap_or_else(|| row.description.clone());
        let item = LineItemPayload {
            name: row.description.clone(),
            rate: row.rate,
            numbers: row.quantity,
            times: row.times,
        };
        match groups.iter_mut().find(|g| g.service_name == service_name) {
            Some(group) => group.params.push(item),
            None => groups.push(ExtraServicePayload {
                service_name,
                params: vec![item],
            }),
        }
    }

    InvoicePayload {
        permits: line_items(&quote.permits),
        services: line_items(&quote.services),
        extra_services: groups,
        permit_discount: quote.permits.discount_value,
        permit_discount_type: quote.permits.discount_type.wire_name(),
        service_discount: quote.services.discount_value,
        service_discount_type: quote.services.discount_type.wire_name(),
        extra_service_discount: quote.extra_details.discount_value,
        extra_service_discount_type: quote.extra_details.discount_type.wire_name(),
        overall_discount: quote.overall_discount_value,
        overall_discount_type: quote.overall_discount_type.wire_name(),
    }
}
