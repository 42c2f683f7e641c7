//! Domain models

pub mod payment;
pub mod quote;
pub mod template;

pub use payment::{PaymentDetails, PaymentRecord, PaymentStatus};
pub use quote::{
    CostRow, DiscountType, QuantityBasis, Quote, QuoteRecord, QuoteSummary, Section,
};
pub use template::{TemplateRow, TemplateSummary, TrekTemplate};
