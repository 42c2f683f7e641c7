//! Pricing engine module for trek operations.
//!
//! The calculators are the single home of the quote arithmetic: quoting,
//! invoicing, exports, and payment summaries all go through them instead of
//! carrying their own copies of the math. Stateless compute endpoints are
//! exposed over HTTP/JSON for the back-office UI to call mid-edit.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    classify_payment_status, round_money, PricingPolicy, QuoteTotals, SectionTotals,
};
pub use routes::router;
