//! Defines the transaction model and its validation rules.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The categories shown in the charts and the category pickers.
///
/// Transactions may use other categories, but those are not shown in the
/// chart aggregation.
pub const CATEGORIES: [&str; 5] = ["Food", "Travel", "Shopping", "Salary", "Other"];

/// The largest amount a single transaction may have.
///
/// Keeps the totals of any realistic ledger finite.
pub const MAX_AMOUNT: f64 = 1e12;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in forms, storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The field order is also the order of the fields in the persisted JSON.
/// Deserializing goes through [Transaction::new], so stored records are held
/// to the same rules as new ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction")]
pub struct Transaction {
    /// The amount of money spent or earned, always positive.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub note: String,
    /// Whether this was income or an expense.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The category, usually one of [CATEGORIES].
    pub category: String,
    /// The date the transaction was recorded, formatted by [crate::date_stamp::DateStamp].
    pub date: String,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] if `amount` is not a positive, finite
    /// number no larger than [MAX_AMOUNT], or an [Error::EmptyNote] if `note`
    /// is blank.
    pub fn new(
        amount: f64,
        note: &str,
        type_: TransactionType,
        category: &str,
        date: String,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 || amount > MAX_AMOUNT {
            return Err(Error::InvalidAmount);
        }

        if note.trim().is_empty() {
            return Err(Error::EmptyNote);
        }

        Ok(Self {
            amount,
            note: note.to_owned(),
            type_,
            category: category.to_owned(),
            date,
        })
    }
}

/// A transaction as it is read from local storage, before validation.
#[derive(Debug, Deserialize)]
struct StoredTransaction {
    amount: f64,
    note: String,
    #[serde(rename = "type")]
    type_: TransactionType,
    category: String,
    date: String,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = Error;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        Transaction::new(
            stored.amount,
            &stored.note,
            stored.type_,
            &stored.category,
            stored.date,
        )
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(Error::InvalidTransactionType(text.to_owned())),
        }
    }
}

/// Formats the transaction as `date - note (category): amount [type]`.
impl Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}): {} [{}]",
            self.date, self.note, self.category, self.amount, self.type_
        )
    }
}

/// Parse the text from an amount input.
///
/// # Errors
/// Returns an [Error::InvalidAmount] if `text` is not a number.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    text.trim().parse().map_err(|_| Error::InvalidAmount)
}
