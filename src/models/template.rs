//! Trek template models
//!
//! Templates hold the permit rows a new quote is seeded from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Trek template from database
#[derive(Debug, Clone, FromRow)]
pub struct TrekTemplate {
    pub id: Uuid,
    pub name: String,
    pub duration_days: i64,
    pub permit_rows: serde_json::Value,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// One seed row inside a template's `permit_rows` JSONB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRow {
    pub description: String,
    #[serde(default)]
    pub rate: Decimal,
    /// Per-person template rows get their quantity set from the group size.
    #[serde(default)]
    pub per_person: bool,
    #[serde(default)]
    pub per_day: bool,
    #[serde(default)]
    pub one_time: bool,
}

impl TrekTemplate {
    /// Parse the stored seed rows; malformed entries are dropped.
    pub fn rows(&self) -> Vec<TemplateRow> {
        serde_json::from_value(self.permit_rows.clone()).unwrap_or_default()
    }
}

/// Listing row for the template picker
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TemplateSummary {
    pub id: Uuid,
    pub name: String,
    pub duration_days: i64,
}
