//! Response DTOs for pricing API endpoints.
//!
//! Monetary values cross the wire as string decimals, matching the external
//! booking API's convention.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{PaymentDetails, PaymentRecord, PaymentStatus, Quote};

use super::calculators::QuoteTotals;

/// Response for the payment-status classification endpoint
#[derive(Debug, Serialize)]
pub struct PaymentStatusResponse {
    pub status: PaymentStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
}

/// Full payment summary for one quote
#[derive(Debug, Serialize)]
pub struct PaymentSummaryResponse {
    pub details: PaymentDetails,
    pub payments: Vec<PaymentRecord>,
}

/// A stored quote together with its freshly computed breakdown
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote: Quote,
    pub totals: QuoteTotals,
}

/// One line item in the external invoice payload
#[derive(Debug, Serialize)]
pub struct LineItemPayload {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub numbers: i64,
    pub times: i64,
}

/// Extra services grouped by service name
#[derive(Debug, Serialize)]
pub struct ExtraServicePayload {
    pub service_name: String,
    pub params: Vec<LineItemPayload>,
}

/// The payload shape the external booking/invoice API accepts.
///
/// Discount values are transmitted as string decimals; discount types use
/// the API's "flat"/"percentage" vocabulary.
#[derive(Debug, Serialize)]
pub struct InvoicePayload {
    pub permits: Vec<LineItemPayload>,
    pub services: Vec<LineItemPayload>,
    pub extra_services: Vec<ExtraServicePayload>,
    #[serde(with = "rust_decimal::serde::str")]
    pub permit_discount: Decimal,
    pub permit_discount_type: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub service_discount: Decimal,
    pub service_discount_type: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub extra_service_discount: Decimal,
    pub extra_service_discount_type: &'static str,
    #[serde(with = "rust_decimal::serde::str")]
    pub overall_discount: Decimal,
    pub overall_discount_type: &'static str,
}
