//! Export table model.
//!
//! Builds the table structure the PDF/Excel renderer consumes: one table per
//! section with a trailing Subtotal/Discount/Total triplet, then a
//! cross-section summary table. Rendering itself lives outside this service;
//! this module only decides what goes in each cell. Amounts are rounded here
//! because export is a presentation surface.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Quote;
use crate::pricing::calculators::{quote_totals, round_money, PricingPolicy, QuoteTotals};

/// One priced row in a section table
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub description: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub quantity: i64,
    pub times: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
}

/// Label/amount pair used for trailing triplets and the summary table
#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub label: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// One section's table: its rows plus Subtotal/Discount/Total
#[derive(Debug, Clone, Serialize)]
pub struct SectionTable {
    pub name: String,
    pub rows: Vec<ExportRow>,
    pub footer: Vec<SummaryLine>,
}

/// The complete export document model
#[derive(Debug, Clone, Serialize)]
pub struct QuoteExport {
    pub trek_name: String,
    pub group_size: i64,
    pub sections: Vec<SectionTable>,
    pub summary: Vec<SummaryLine>,
}

fn line(label: &str, amount: Decimal) -> SummaryLine {
    SummaryLine {
        label: label.to_string(),
        amount: round_money(amount, 2),
    }
}

/// Build the export model for a quote.
///
/// Empty sections are skipped; the summary table always closes with grand
/// subtotal, overall discount, service charge, and final total.
pub fn build_quote_export(quote: &Quote, policy: PricingPolicy) -> QuoteExport {
    let totals: QuoteTotals = quote_totals(quote, policy);

    let mut sections = Vec::new();
    let mut summary = Vec::new();

    for (section, breakdown) in quote.sections().zip(&totals.sections) {
        if section.rows.is_empty() {
            continue;
        }
        let rows = section
            .rows
            .iter()
            .map(|row| ExportRow {
                description: row.description.clone(),
                rate: row.rate,
                quantity: row.quantity,
                times: row.times,
                total: round_money(row.total, 2),
            })
            .collect();
        sections.push(SectionTable {
            name: section.name.clone(),
            rows,
            footer: vec![
                line("Subtotal", breakdown.totals.subtotal),
                line("Discount", breakdown.totals.discount_amount),
                line("Total", breakdown.totals.total),
            ],
        });
        summary.push(line(&section.name, breakdown.totals.total));
    }

    summary.push(line("Grand Subtotal", totals.grand_subtotal));
    summary.push(line("Overall Discount", totals.overall_discount_amount));
    summary.push(line("Service Charge", totals.service_charge_amount));
    summary.push(line("Final Total", totals.final_total));

    QuoteExport {
        trek_name: quote.trek_name.clone(),
        group_size: quote.group_size,
        sections,
        summary,
    }
}
