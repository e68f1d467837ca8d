//! Totals and filters derived from the ledger.
//!
//! Everything here is a pure function of a slice of transactions, so the
//! views can recompute whatever they need after each change.

use serde::{Deserialize, Serialize};

use crate::ledger::transaction::{Transaction, TransactionType};

/// The category filter value that matches every category.
pub const ALL_CATEGORIES: &str = "all";

/// The income, expense and balance totals of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Sum of all income amounts.
    pub income: f64,
    /// Sum of all expense amounts.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
}

impl Totals {
    /// The totals formatted to two decimal places, in the order income, expense, balance.
    pub fn display(&self) -> [String; 3] {
        [
            format!("{:.2}", self.income),
            format!("{:.2}", self.expense),
            format!("{:.2}", self.balance),
        ]
    }
}

/// Sum the income and expenses.
///
/// The sums keep full precision, rounding only happens in [Totals::display].
pub fn summarize(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for transaction in transactions {
        match transaction.type_ {
            TransactionType::Income => income += transaction.amount,
            TransactionType::Expense => expense += transaction.amount,
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Sum the expenses for each of `categories`.
///
/// The result has one entry per category in the same order, with zero for
/// categories that have no expenses. Expenses in categories not listed are
/// ignored.
pub fn category_expenses(transactions: &[Transaction], categories: &[&str]) -> Vec<f64> {
    categories
        .iter()
        .map(|&category| {
            transactions
                .iter()
                .filter(|transaction| {
                    transaction.type_ == TransactionType::Expense
                        && transaction.category == category
                })
                .map(|transaction| transaction.amount)
                .sum::<f64>()
        })
        .collect()
}

/// Sum the expenses whose date is exactly `today`.
///
/// `today` must be formatted with the same [crate::date_stamp::DateStamp]
/// that stamped the transactions.
pub fn today_expense(transactions: &[Transaction], today: &str) -> f64 {
    transactions
        .iter()
        .filter(|transaction| {
            transaction.type_ == TransactionType::Expense && transaction.date == today
        })
        .map(|transaction| transaction.amount)
        .sum()
}

/// Whether today's expenses are strictly greater than `limit`.
pub fn today_over_limit(transactions: &[Transaction], limit: f64, today: &str) -> bool {
    today_expense(transactions, today) > limit
}

/// A search over the transaction list.
///
/// Missing fields in a query string fall back to [TransactionFilter::default].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFilter {
    /// Text to look for in the note, ignoring case. Empty matches everything.
    pub keyword: String,
    /// The exact category to keep, or [ALL_CATEGORIES].
    pub category: String,
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            category: ALL_CATEGORIES.to_owned(),
        }
    }
}

impl TransactionFilter {
    /// Whether `transaction` matches both the keyword and the category.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let matches_keyword = transaction
            .note
            .to_lowercase()
            .contains(&self.keyword.to_lowercase());
        let matches_category =
            self.category == ALL_CATEGORIES || transaction.category == self.category;

        matches_keyword && matches_category
    }
}

/// Keep the transactions that match `filter`, in their original order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .collect()
}
