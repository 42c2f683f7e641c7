//! Quote domain model: cost rows, sections, and the editable quote document.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// How a row's rate multiplies into its total.
///
/// Constructed from the three independent wire flags with a fixed precedence:
/// `one_time` wins over everything, then both-flags, then each flag alone.
/// A row with conflicting flags therefore resolves deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityBasis {
    OneTime,
    PerPersonPerDay,
    PerPerson,
    PerDay,
    Default,
}

impl QuantityBasis {
    pub fn from_flags(per_person: bool, per_day: bool, one_time: bool) -> Self {
        if one_time {
            QuantityBasis::OneTime
        } else if per_person && per_day {
            QuantityBasis::PerPersonPerDay
        } else if per_person {
            QuantityBasis::PerPerson
        } else if per_day {
            QuantityBasis::PerDay
        } else {
            QuantityBasis::Default
        }
    }
}

/// One priced line item (permit, service, or extra).
///
/// `total` is derived only: it is recomputed from the other fields on every
/// edit and never trusted from storage or the wire. Missing numeric fields
/// deserialize to zero rather than failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRow {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub description: String,
    /// Grouping key for extra services on the external invoice payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default)]
    pub rate: Decimal,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub times: i64,
    #[serde(default)]
    pub per_person: bool,
    #[serde(default)]
    pub per_day: bool,
    #[serde(default)]
    pub one_time: bool,
    #[serde(default)]
    pub total: Decimal,
}

impl CostRow {
    pub fn basis(&self) -> QuantityBasis {
        QuantityBasis::from_flags(self.per_person, self.per_day, self.one_time)
    }
}

/// Discount shape shared by sections and the quote-level overall discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    #[default]
    Amount,
    Percentage,
}

impl DiscountType {
    /// Wire name used by the external booking API.
    pub fn wire_name(&self) -> &'static str {
        match self {
            DiscountType::Amount => "flat",
            DiscountType::Percentage => "percentage",
        }
    }
}

fn default_section_id() -> Uuid {
    Uuid::new_v4()
}

/// A named group of cost rows sharing one discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    #[serde(default = "default_section_id")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rows: Vec<CostRow>,
    #[serde(default)]
    pub discount_type: DiscountType,
    #[serde(default)]
    pub discount_value: Decimal,
    #[serde(default)]
    pub discount_remarks: String,
    /// When set, row quantities in this section follow the quote's group size.
    #[serde(default)]
    pub use_pax: bool,
}

impl Section {
    pub fn named(name: &str) -> Self {
        Section {
            id: Uuid::new_v4(),
            name: name.to_string(),
            rows: Vec::new(),
            discount_type: DiscountType::Amount,
            discount_value: Decimal::ZERO,
            discount_remarks: String::new(),
            use_pax: false,
        }
    }
}

/// The complete editable pricing document for one trek booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub trek_name: String,
    #[serde(default)]
    pub group_size: i64,
    pub permits: Section,
    pub services: Section,
    pub extra_details: Section,
    #[serde(default)]
    pub custom_sections: Vec<Section>,
    #[serde(default)]
    pub overall_discount_type: DiscountType,
    #[serde(default)]
    pub overall_discount_value: Decimal,
    #[serde(default)]
    pub overall_discount_remarks: String,
    /// Percentage surcharge, reported separately and never silently folded
    /// into the final total.
    #[serde(default)]
    pub service_charge: Decimal,
}

impl Quote {
    /// All sections in display order: permits, services, extras, then customs.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        [&self.permits, &self.services, &self.extra_details]
            .into_iter()
            .chain(self.custom_sections.iter())
    }

    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        [
            &mut self.permits,
            &mut self.services,
            &mut self.extra_details,
        ]
        .into_iter()
        .chain(self.custom_sections.iter_mut())
    }
}

/// Quote row from the database; sections live in the JSONB `data` column.
#[derive(Debug, Clone, FromRow)]
pub struct QuoteRecord {
    pub id: Uuid,
    pub trek_name: String,
    pub group_size: i64,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuoteRecord {
    /// Parse the stored JSONB document back into a quote.
    pub fn parse(self) -> Option<Quote> {
        serde_json::from_value(self.data).ok()
    }
}

/// Listing row for the quotes index (no document body).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteSummary {
    pub id: Uuid,
    pub trek_name: String,
    pub group_size: i64,
    pub updated_at: DateTime<Utc>,
}
