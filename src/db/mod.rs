//! Database access

pub mod queries;
pub mod store;

pub use store::{PgQuoteStore, QuoteStore};
