//! Quote repository interface.
//!
//! Handlers and services depend on this trait, not on Postgres directly; the
//! pricing calculators know nothing about either.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Quote, QuoteSummary};

use super::queries;

#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<Quote>, AppError>;
    async fn save(&self, quote: &Quote) -> Result<(), AppError>;
    async fn list(&self) -> Result<Vec<QuoteSummary>, AppError>;
}

/// Postgres-backed quote store; the quote document lives in a JSONB column.
#[derive(Clone)]
pub struct PgQuoteStore {
    pool: PgPool,
}

impl PgQuoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuoteStore for PgQuoteStore {
    async fn get(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let record = queries::get_quote(&self.pool, id).await?;
        match record {
            Some(record) => {
                let quote = record.parse().ok_or_else(|| {
                    AppError::Internal(format!("Stored quote {} failed to parse", id))
                })?;
                Ok(Some(quote))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, quote: &Quote) -> Result<(), AppError> {
        queries::upsert_quote(&self.pool, quote).await
    }

    async fn list(&self) -> Result<Vec<QuoteSummary>, AppError> {
        queries::list_quotes(&self.pool).await
    }
}
