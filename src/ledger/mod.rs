//! The transaction ledger.
//!
//! This module contains:
//! - The `Transaction` model and its validation rules
//! - The `LedgerStore` that owns the transactions and the daily limit and
//!   persists them to local storage
//! - Pure aggregation functions for totals, category breakdowns, the daily
//!   limit check and filtering

mod aggregation;
mod store;
mod transaction;

pub use aggregation::{
    ALL_CATEGORIES, Totals, TransactionFilter, category_expenses, filter_transactions, summarize,
    today_over_limit,
};
pub use store::LedgerStore;
#[cfg(test)]
pub use store::{DAILY_LIMIT_KEY, TRANSACTIONS_KEY};
pub use transaction::{CATEGORIES, Transaction, TransactionType, parse_amount};
