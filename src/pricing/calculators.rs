//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access, no I/O. The engine
//! never fails and never mutates its input: callers hand in a quote snapshot
//! and merge the returned totals back themselves. Full precision is carried
//! internally; rounding happens only at presentation time.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{
    CostRow, DiscountType, PaymentDetails, PaymentRecord, PaymentStatus, QuantityBasis, Quote,
    Section,
};

/// Absolute currency-unit tolerance for payment comparisons. Payments arrive
/// from sources that did float arithmetic upstream, so exact equality is too
/// strict.
pub const PAYMENT_EPSILON: Decimal = dec!(0.01);

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use trekops_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Behavior knobs for the engine.
///
/// `clamp_at_zero` controls what happens when a discount exceeds its base:
/// unclamped (the default) passes the negative total through, which is what
/// the booking backend historically did.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingPolicy {
    pub clamp_at_zero: bool,
}

impl PricingPolicy {
    fn settle(&self, total: Decimal) -> Decimal {
        if self.clamp_at_zero && total < Decimal::ZERO {
            Decimal::ZERO
        } else {
            total
        }
    }
}

/// Compute one row's total under its quantity basis.
///
/// One-time rows bill the bare rate regardless of quantity and times;
/// per-person multiplies by quantity, per-day by times, and both (or neither
/// flag) multiply by both.
pub fn row_total(row: &CostRow) -> Decimal {
    let quantity = Decimal::from(row.quantity);
    let times = Decimal::from(row.times);
    match row.basis() {
        QuantityBasis::OneTime => row.rate,
        QuantityBasis::PerPersonPerDay => row.rate * quantity * times,
        QuantityBasis::PerPerson => row.rate * quantity,
        QuantityBasis::PerDay => row.rate * times,
        QuantityBasis::Default => row.rate * quantity * times,
    }
}

/// Discount amount for a given base: percentage takes a share of the base,
/// flat amounts apply as-is (not clamped to the base).
pub fn discount_amount(
    discount_type: DiscountType,
    discount_value: Decimal,
    base: Decimal,
) -> Decimal {
    match discount_type {
        DiscountType::Percentage => base * discount_value / dec!(100),
        DiscountType::Amount => discount_value,
    }
}

/// Per-section totals: subtotal, discount taken, post-discount total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

/// Compute a section's subtotal, discount amount, and total.
pub fn section_totals(section: &Section, policy: PricingPolicy) -> SectionTotals {
    let subtotal: Decimal = section.rows.iter().map(row_total).sum();
    let discount = discount_amount(section.discount_type, section.discount_value, subtotal);
    SectionTotals {
        subtotal,
        discount_amount: discount,
        total: policy.settle(subtotal - discount),
    }
}

/// One section's contribution inside a quote breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct SectionBreakdown {
    pub section_id: Uuid,
    pub name: String,
    pub totals: SectionTotals,
}

/// Quote-level totals.
///
/// `grand_subtotal` sums each section's post-discount total, so the overall
/// discount compounds on top of section discounts. `service_charge_amount`
/// is reported alongside and deliberately not folded into `final_total`;
/// callers that want it included add it themselves.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteTotals {
    pub sections: Vec<SectionBreakdown>,
    pub grand_subtotal: Decimal,
    pub overall_discount_amount: Decimal,
    pub final_total: Decimal,
    pub service_charge_amount: Decimal,
}

/// Compute the full quote breakdown: every section's totals, the grand
/// subtotal, the overall discount, and the final total.
pub fn quote_totals(quote: &Quote, policy: PricingPolicy) -> QuoteTotals {
    let sections: Vec<SectionBreakdown> = quote
        .sections()
        .map(|section| SectionBreakdown {
            section_id: section.id,
            name: section.name.clone(),
            totals: section_totals(section, policy),
        })
        .collect();

    let grand_subtotal: Decimal = sections.iter().map(|s| s.totals.total).sum();
    let overall_discount = discount_amount(
        quote.overall_discount_type,
        quote.overall_discount_value,
        grand_subtotal,
    );
    let final_total = policy.settle(grand_subtotal - overall_discount);
    let service_charge_amount = grand_subtotal * quote.service_charge / dec!(100);

    QuoteTotals {
        sections,
        grand_subtotal,
        overall_discount_amount: overall_discount,
        final_total,
        service_charge_amount,
    }
}

/// Return a copy of the quote with every row's `total` freshly recomputed.
///
/// Row totals are derived data; this is the only way they get written.
pub fn with_recomputed_totals(quote: &Quote) -> Quote {
    let mut next = quote.clone();
    for section in next.sections_mut() {
        for row in &mut section.rows {
            row.total = row_total(row);
        }
    }
    next
}

/// Propagate a group-size change.
///
/// Every row in a section flagged `use_pax` gets its quantity reset to the
/// new group size and its total recomputed under its own basis. Sections not
/// flagged keep their quantities untouched.
pub fn apply_group_size(quote: &Quote, group_size: i64) -> Quote {
    let mut next = quote.clone();
    next.group_size = group_size;
    for section in next.sections_mut() {
        if !section.use_pax {
            continue;
        }
        for row in &mut section.rows {
            row.quantity = group_size;
            row.total = row_total(row);
        }
    }
    next
}

/// Classify a quote's settlement state from cost vs. paid.
///
/// Zero paid is checked first and exactly. Overpaid requires the overpayment
/// to exceed the epsilon; a payment within epsilon of the cost, on either
/// side, counts as fully paid.
pub fn classify_payment_status(total_cost: Decimal, total_paid: Decimal) -> PaymentStatus {
    if total_paid == Decimal::ZERO {
        return PaymentStatus::Unpaid;
    }
    let balance = total_cost - total_paid;
    if balance < -PAYMENT_EPSILON {
        PaymentStatus::Overpaid
    } else if balance.abs() <= PAYMENT_EPSILON {
        PaymentStatus::FullyPaid
    } else {
        PaymentStatus::PartiallyPaid
    }
}

/// Fold recorded payments into the derived payment view. Refunds subtract.
pub fn payment_details(total_cost: Decimal, payments: &[PaymentRecord]) -> PaymentDetails {
    let total_paid: Decimal = payments
        .iter()
        .map(|p| if p.is_refund { -p.amount } else { p.amount })
        .sum();
    PaymentDetails {
        total_cost,
        total_paid,
        balance: total_cost - total_paid,
        status: classify_payment_status(total_cost, total_paid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(rate: Decimal, quantity: i64, times: i64) -> CostRow {
        CostRow {
            id: Uuid::new_v4(),
            description: "test row".to_string(),
            service_name: None,
            rate,
            quantity,
            times,
            per_person: false,
            per_day: false,
            one_time: false,
            total: Decimal::ZERO,
        }
    }

    fn section_with(rows: Vec<CostRow>) -> Section {
        Section {
            rows,
            ..Section::named("test")
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
    }

    // ==================== row_total tests ====================

    #[test]
    fn test_row_total_default_rule() {
        // No flags: rate * quantity * times
        assert_eq!(row_total(&row(dec!(10), 4, 3)), dec!(120));
    }

    #[test]
    fn test_row_total_zero_inputs_degrade_to_zero() {
        assert_eq!(row_total(&row(dec!(10), 0, 3)), dec!(0));
        assert_eq!(row_total(&row(dec!(10), 4, 0)), dec!(0));
        assert_eq!(row_total(&row(dec!(0), 4, 3)), dec!(0));
    }

    #[test]
    fn test_row_total_one_time_dominates() {
        // One-time ignores quantity and times entirely, even when zero
        let mut r = row(dec!(500), 0, 0);
        r.one_time = true;
        assert_eq!(row_total(&r), dec!(500));

        let mut r = row(dec!(500), 7, 12);
        r.one_time = true;
        r.per_person = true;
        r.per_day = true;
        assert_eq!(row_total(&r), dec!(500));
    }

    #[test]
    fn test_row_total_per_person() {
        let mut r = row(dec!(25), 4, 9);
        r.per_person = true;
        // times is ignored even though it is not 1
        assert_eq!(row_total(&r), dec!(100));
    }

    #[test]
    fn test_row_total_per_day() {
        let mut r = row(dec!(25), 9, 5);
        r.per_day = true;
        assert_eq!(row_total(&r), dec!(125));
    }

    #[test]
    fn test_row_total_per_person_per_day_precedence() {
        // Both flags set (one_time false) multiplies by both
        let mut r = row(dec!(10), 4, 3);
        r.per_person = true;
        r.per_day = true;
        assert_eq!(row_total(&r), dec!(120));
    }

    #[test]
    fn test_basis_precedence_order() {
        assert_eq!(
            QuantityBasis::from_flags(true, true, true),
            QuantityBasis::OneTime
        );
        assert_eq!(
            QuantityBasis::from_flags(true, true, false),
            QuantityBasis::PerPersonPerDay
        );
        assert_eq!(
            QuantityBasis::from_flags(true, false, false),
            QuantityBasis::PerPerson
        );
        assert_eq!(
            QuantityBasis::from_flags(false, true, false),
            QuantityBasis::PerDay
        );
        assert_eq!(
            QuantityBasis::from_flags(false, false, false),
            QuantityBasis::Default
        );
    }

    // ==================== section_totals tests ====================

    #[test]
    fn test_section_subtotal_is_sum_of_row_totals() {
        let s = section_with(vec![
            row(dec!(10), 2, 1),
            row(dec!(5), 3, 2),
            row(dec!(7.5), 1, 4),
        ]);
        let totals = section_totals(&s, PricingPolicy::default());
        assert_eq!(totals.subtotal, dec!(80)); // 20 + 30 + 30
        assert_eq!(totals.discount_amount, dec!(0));
        assert_eq!(totals.total, dec!(80));
    }

    #[test]
    fn test_section_subtotal_independent_of_row_order() {
        let a = section_with(vec![row(dec!(10), 2, 1), row(dec!(5), 3, 2)]);
        let b = section_with(vec![row(dec!(5), 3, 2), row(dec!(10), 2, 1)]);
        let policy = PricingPolicy::default();
        assert_eq!(
            section_totals(&a, policy).subtotal,
            section_totals(&b, policy).subtotal
        );
    }

    #[test]
    fn test_section_percentage_discount() {
        let mut s = section_with(vec![row(dec!(100), 3, 1)]);
        s.discount_type = DiscountType::Percentage;
        s.discount_value = dec!(10);
        let totals = section_totals(&s, PricingPolicy::default());
        assert_eq!(totals.subtotal, dec!(300));
        assert_eq!(totals.discount_amount, dec!(30));
        assert_eq!(totals.total, dec!(270));
    }

    #[test]
    fn test_section_flat_discount_ignores_subtotal() {
        let mut s = section_with(vec![row(dec!(100), 2, 1)]);
        s.discount_type = DiscountType::Amount;
        s.discount_value = dec!(20);
        let totals = section_totals(&s, PricingPolicy::default());
        assert_eq!(totals.discount_amount, dec!(20));
        assert_eq!(totals.total, dec!(180));

        // Flat discount on an empty section still applies in full
        let mut empty = section_with(vec![]);
        empty.discount_value = dec!(20);
        let totals = section_totals(&empty, PricingPolicy::default());
        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.discount_amount, dec!(20));
        assert_eq!(totals.total, dec!(-20));
    }

    #[test]
    fn test_discount_exceeding_subtotal_goes_negative_unclamped() {
        let mut s = section_with(vec![row(dec!(50), 1, 1)]);
        s.discount_value = dec!(80);
        let totals = section_totals(&s, PricingPolicy::default());
        assert_eq!(totals.total, dec!(-30));
    }

    #[test]
    fn test_discount_clamped_when_policy_says_so() {
        let mut s = section_with(vec![row(dec!(50), 1, 1)]);
        s.discount_value = dec!(80);
        let totals = section_totals(&s, PricingPolicy { clamp_at_zero: true });
        assert_eq!(totals.total, dec!(0));
    }

    // ==================== quote_totals tests ====================

    fn quote_with(permits: Section, services: Section, extras: Section) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            trek_name: "Annapurna Base Camp".to_string(),
            group_size: 2,
            permits,
            services,
            extra_details: extras,
            custom_sections: vec![],
            overall_discount_type: DiscountType::Amount,
            overall_discount_value: Decimal::ZERO,
            overall_discount_remarks: String::new(),
            service_charge: Decimal::ZERO,
        }
    }

    #[test]
    fn test_quote_composition_example() {
        // permits: subtotal 300, 10% off -> 270
        let mut permits = section_with(vec![row(dec!(100), 3, 1)]);
        permits.discount_type = DiscountType::Percentage;
        permits.discount_value = dec!(10);

        // services: subtotal 200, flat 20 off -> 180
        let mut services = section_with(vec![row(dec!(100), 2, 1)]);
        services.discount_type = DiscountType::Amount;
        services.discount_value = dec!(20);

        // extras: empty -> 0
        let extras = section_with(vec![]);

        let mut quote = quote_with(permits, services, extras);
        quote.overall_discount_type = DiscountType::Percentage;
        quote.overall_discount_value = dec!(5);

        let totals = quote_totals(&quote, PricingPolicy::default());
        assert_eq!(totals.grand_subtotal, dec!(450));
        assert_eq!(totals.overall_discount_amount, dec!(22.5));
        assert_eq!(totals.final_total, dec!(427.5));
    }

    #[test]
    fn test_quote_totals_include_custom_sections() {
        let permits = section_with(vec![row(dec!(100), 1, 1)]);
        let services = section_with(vec![]);
        let extras = section_with(vec![]);
        let mut quote = quote_with(permits, services, extras);
        quote
            .custom_sections
            .push(section_with(vec![row(dec!(40), 2, 1)]));

        let totals = quote_totals(&quote, PricingPolicy::default());
        assert_eq!(totals.sections.len(), 4);
        assert_eq!(totals.grand_subtotal, dec!(180));
    }

    #[test]
    fn test_service_charge_reported_not_folded() {
        let permits = section_with(vec![row(dec!(100), 2, 1)]);
        let mut quote = quote_with(permits, section_with(vec![]), section_with(vec![]));
        quote.service_charge = dec!(10);

        let totals = quote_totals(&quote, PricingPolicy::default());
        assert_eq!(totals.service_charge_amount, dec!(20));
        // final_total stays 200; callers fold the charge in themselves
        assert_eq!(totals.final_total, dec!(200));
    }

    #[test]
    fn test_quote_totals_idempotent() {
        let mut permits = section_with(vec![row(dec!(33.33), 3, 2)]);
        permits.discount_type = DiscountType::Percentage;
        permits.discount_value = dec!(7.5);
        let quote = quote_with(permits, section_with(vec![]), section_with(vec![]));

        let a = quote_totals(&quote, PricingPolicy::default());
        let b = quote_totals(&quote, PricingPolicy::default());
        assert_eq!(a.grand_subtotal, b.grand_subtotal);
        assert_eq!(a.overall_discount_amount, b.overall_discount_amount);
        assert_eq!(a.final_total, b.final_total);
    }

    // ==================== group-size propagation tests ====================

    #[test]
    fn test_group_size_propagates_to_pax_sections_only() {
        let mut permits = section_with(vec![row(dec!(30), 2, 1), row(dec!(10), 2, 5)]);
        permits.use_pax = true;
        let services = section_with(vec![row(dec!(100), 2, 1)]);

        let quote = quote_with(permits, services, section_with(vec![]));
        let updated = apply_group_size(&quote, 5);

        assert_eq!(updated.group_size, 5);
        for r in &updated.permits.rows {
            assert_eq!(r.quantity, 5);
        }
        assert_eq!(updated.permits.rows[0].total, dec!(150)); // 30 * 5 * 1
        assert_eq!(updated.permits.rows[1].total, dec!(250)); // 10 * 5 * 5

        // Non-pax section untouched
        assert_eq!(updated.services.rows[0].quantity, 2);
        assert_eq!(quote.permits.rows[0].quantity, 2); // input not mutated
    }

    #[test]
    fn test_group_size_recomputes_under_row_basis() {
        let mut one_time = row(dec!(400), 2, 1);
        one_time.one_time = true;
        let mut permits = section_with(vec![one_time]);
        permits.use_pax = true;

        let quote = quote_with(permits, section_with(vec![]), section_with(vec![]));
        let updated = apply_group_size(&quote, 9);
        // Quantity follows pax, but a one-time row still bills the bare rate
        assert_eq!(updated.permits.rows[0].quantity, 9);
        assert_eq!(updated.permits.rows[0].total, dec!(400));
    }

    #[test]
    fn test_recompute_totals_overwrites_stale_values() {
        let mut r = row(dec!(10), 2, 3);
        r.total = dec!(999); // stale, never authoritative
        let permits = section_with(vec![r]);
        let quote = quote_with(permits, section_with(vec![]), section_with(vec![]));

        let fresh = with_recomputed_totals(&quote);
        assert_eq!(fresh.permits.rows[0].total, dec!(60));
    }

    // ==================== payment classification tests ====================

    #[test]
    fn test_payment_status_boundaries() {
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(1000)),
            PaymentStatus::FullyPaid
        );
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(1000.005)),
            PaymentStatus::FullyPaid
        );
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(1000.02)),
            PaymentStatus::Overpaid
        );
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(0)),
            PaymentStatus::Unpaid
        );
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(500)),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn test_payment_status_underpaid_within_epsilon() {
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(999.995)),
            PaymentStatus::FullyPaid
        );
        assert_eq!(
            classify_payment_status(dec!(1000), dec!(999.98)),
            PaymentStatus::PartiallyPaid
        );
    }

    #[test]
    fn test_payment_status_zero_cost() {
        // Unpaid wins on exact zero paid even when nothing is owed
        assert_eq!(
            classify_payment_status(dec!(0), dec!(0)),
            PaymentStatus::Unpaid
        );
        assert_eq!(
            classify_payment_status(dec!(0), dec!(50)),
            PaymentStatus::Overpaid
        );
    }

    #[test]
    fn test_payment_details_refunds_subtract() {
        let quote_id = Uuid::new_v4();
        let pay = |amount: Decimal, is_refund: bool| PaymentRecord {
            id: Uuid::new_v4(),
            quote_id,
            amount,
            method: "bank".to_string(),
            remarks: String::new(),
            is_refund,
            paid_at: chrono::Utc::now(),
        };

        let details = payment_details(
            dec!(1000),
            &[
                pay(dec!(700), false),
                pay(dec!(500), false),
                pay(dec!(200), true),
            ],
        );
        assert_eq!(details.total_paid, dec!(1000));
        assert_eq!(details.balance, dec!(0));
        assert_eq!(details.status, PaymentStatus::FullyPaid);
    }
}
