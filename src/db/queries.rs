//! Database queries for templates, quotes, and payments.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    PaymentRecord, Quote, QuoteRecord, QuoteSummary, TemplateSummary, TrekTemplate,
};

/// Get one trek template by id
pub async fn get_template(pool: &PgPool, id: Uuid) -> Result<TrekTemplate, AppError> {
    sqlx::query_as::<_, TrekTemplate>(
        r#"
        SELECT id, name, duration_days, permit_rows, active, created_at
        FROM trek_templates
        WHERE id = $1
          AND active = true
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// List active templates for the picker
pub async fn list_templates(pool: &PgPool) -> Result<Vec<TemplateSummary>, AppError> {
    let templates = sqlx::query_as::<_, TemplateSummary>(
        r#"
        SELECT id, name, duration_days
        FROM trek_templates
        WHERE active = true
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(templates)
}

/// Get all active templates (for cache warming)
pub async fn get_active_templates(pool: &PgPool) -> Result<Vec<TrekTemplate>, AppError> {
    let templates = sqlx::query_as::<_, TrekTemplate>(
        r#"
        SELECT id, name, duration_days, permit_rows, active, created_at
        FROM trek_templates
        WHERE active = true
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(templates)
}

/// Get one stored quote
pub async fn get_quote(pool: &PgPool, id: Uuid) -> Result<Option<QuoteRecord>, AppError> {
    let record = sqlx::query_as::<_, QuoteRecord>(
        r#"
        SELECT id, trek_name, group_size, data, created_at, updated_at
        FROM quotes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Insert or replace a quote document
pub async fn upsert_quote(pool: &PgPool, quote: &Quote) -> Result<(), AppError> {
    let data = serde_json::to_value(quote)
        .map_err(|e| AppError::Internal(format!("Failed to serialize quote: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO quotes (id, trek_name, group_size, data, created_at, updated_at)
        VALUES ($1, $2, $3, $4, now(), now())
        ON CONFLICT (id) DO UPDATE
        SET trek_name = EXCLUDED.trek_name,
            group_size = EXCLUDED.group_size,
            data = EXCLUDED.data,
            updated_at = now()
        "#,
    )
    .bind(quote.id)
    .bind(&quote.trek_name)
    .bind(quote.group_size)
    .bind(data)
    .execute(pool)
    .await?;

    Ok(())
}

/// List quote summaries, newest first
pub async fn list_quotes(pool: &PgPool) -> Result<Vec<QuoteSummary>, AppError> {
    let quotes = sqlx::query_as::<_, QuoteSummary>(
        r#"
        SELECT id, trek_name, group_size, updated_at
        FROM quotes
        ORDER BY updated_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(quotes)
}

/// List payments recorded against a quote, oldest first
pub async fn list_payments(pool: &PgPool, quote_id: Uuid) -> Result<Vec<PaymentRecord>, AppError> {
    let payments = sqlx::query_as::<_, PaymentRecord>(
        r#"
        SELECT id, quote_id, amount, method, remarks, is_refund, paid_at
        FROM payments
        WHERE quote_id = $1
        ORDER BY paid_at
        "#,
    )
    .bind(quote_id)
    .fetch_all(pool)
    .await?;

    Ok(payments)
}

/// Record a payment or refund against a quote
pub async fn insert_payment(
    pool: &PgPool,
    quote_id: Uuid,
    amount: Decimal,
    method: &str,
    remarks: &str,
    is_refund: bool,
) -> Result<PaymentRecord, AppError> {
    let payment = sqlx::query_as::<_, PaymentRecord>(
        r#"
        INSERT INTO payments (id, quote_id, amount, method, remarks, is_refund, paid_at)
        VALUES ($1, $2, $3, $4, $5, $6, now())
        RETURNING id, quote_id, amount, method, remarks, is_refund, paid_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(quote_id)
    .bind(amount)
    .bind(method)
    .bind(remarks)
    .bind(is_refund)
    .fetch_one(pool)
    .await?;

    Ok(payment)
}
