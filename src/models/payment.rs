//! Payment models and the payment-status enum.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded payment (or refund) against a quote.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub remarks: String,
    pub is_refund: bool,
    pub paid_at: DateTime<Utc>,
}

/// Four-way settlement state driving the badge in the payment summary UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "unpaid")]
    Unpaid,
    #[serde(rename = "partially paid")]
    PartiallyPaid,
    #[serde(rename = "fully paid")]
    FullyPaid,
    #[serde(rename = "overpaid")]
    Overpaid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::PartiallyPaid => "partially paid",
            PaymentStatus::FullyPaid => "fully paid",
            PaymentStatus::Overpaid => "overpaid",
        };
        f.write_str(label)
    }
}

/// Derived, read-only view of a quote's payment position.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetails {
    pub total_cost: Decimal,
    pub total_paid: Decimal,
    pub balance: Decimal,
    pub status: PaymentStatus,
}
