//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{Quote, Section};

/// Request to compute one section's totals mid-edit
#[derive(Debug, Deserialize)]
pub struct SectionTotalsRequest {
    pub section: Section,
    #[serde(default)]
    pub clamp_at_zero: bool,
}

/// Request to compute the full quote breakdown
#[derive(Debug, Deserialize)]
pub struct QuoteTotalsRequest {
    pub quote: Quote,
    #[serde(default)]
    pub clamp_at_zero: bool,
}

/// Request to classify a payment position
#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_paid: Decimal,
}

/// Request to create a quote from a trek template
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    pub template_id: Uuid,
    pub group_size: i64,
}

/// Request to change a quote's group size
#[derive(Debug, Deserialize)]
pub struct GroupSizeRequest {
    pub group_size: i64,
}

/// Request to record a payment or refund against a quote
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub method: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub is_refund: bool,
}
