//! The ledger store owns the transactions and the daily limit, and keeps
//! them in sync with local storage.

use rusqlite::Connection;

use crate::{
    Error,
    ledger::transaction::{Transaction, TransactionType},
    local_storage::{get_item, set_item},
};

/// The storage key for the JSON array of transactions.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// The storage key for the daily spending limit.
pub const DAILY_LIMIT_KEY: &str = "dailyLimit";

/// The ordered list of transactions and the daily spending limit.
///
/// Every successful mutation rewrites the affected value in local storage in
/// full. The store is the only writer of those keys.
#[derive(Debug)]
pub struct LedgerStore {
    connection: Connection,
    transactions: Vec<Transaction>,
    daily_limit: f64,
}

impl LedgerStore {
    /// Load the ledger from local storage.
    ///
    /// Missing or unreadable values are replaced with an empty ledger and a
    /// zero limit. Stored transactions that break the rules of
    /// [Transaction::new] are skipped. `connection` must already have been
    /// initialized with [crate::initialize_db].
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if local storage cannot be read.
    pub fn load(connection: Connection) -> Result<Self, Error> {
        let transactions = match get_item(TRANSACTIONS_KEY, &connection)? {
            Some(json) => parse_transactions(&json),
            None => Vec::new(),
        };

        let daily_limit = get_item(DAILY_LIMIT_KEY, &connection)?
            .and_then(|text| parse_limit(&text))
            .unwrap_or(0.0);

        tracing::debug!(
            "loaded {} transactions with a daily limit of {daily_limit}",
            transactions.len()
        );

        Ok(Self {
            connection,
            transactions,
            daily_limit,
        })
    }

    /// The transactions in the order they were added.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The daily spending limit.
    pub fn daily_limit(&self) -> f64 {
        self.daily_limit
    }

    /// Validate and append a new transaction, then persist the whole list.
    ///
    /// `date` should come from [crate::date_stamp::DateStamp::today].
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] or [Error::EmptyNote] if the input is
    /// invalid, in which case the ledger is not changed. If the list cannot be
    /// saved, the new transaction is removed again and the storage error is
    /// returned.
    pub fn add(
        &mut self,
        amount: f64,
        note: &str,
        type_: TransactionType,
        category: &str,
        date: String,
    ) -> Result<&Transaction, Error> {
        let transaction = Transaction::new(amount, note, type_, category, date)?;

        self.transactions.push(transaction);

        if let Err(error) = self.save_transactions() {
            self.transactions.pop();
            return Err(error);
        }

        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// Set the daily limit from the text of the limit input.
    ///
    /// Returns `true` if the limit was updated. Text that is not a finite,
    /// non-negative number leaves the current limit in place and returns `false`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the new limit cannot be saved, in which
    /// case the previous limit is kept.
    pub fn set_limit(&mut self, value: &str) -> Result<bool, Error> {
        let Some(limit) = parse_limit(value) else {
            tracing::debug!("ignoring invalid daily limit {value:?}");
            return Ok(false);
        };

        set_item(DAILY_LIMIT_KEY, &limit.to_string(), &self.connection)?;
        self.daily_limit = limit;

        Ok(true)
    }

    fn save_transactions(&self) -> Result<(), Error> {
        let json = serde_json::to_string(&self.transactions)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        set_item(TRANSACTIONS_KEY, &json, &self.connection)
    }

    #[cfg(test)]
    pub(crate) fn into_connection(self) -> Connection {
        self.connection
    }
}

fn parse_transactions(json: &str) -> Vec<Transaction> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(records) => records,
        Err(error) => {
            tracing::debug!("ignoring unreadable transactions: {error}");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .filter_map(|record| {
            serde_json::from_value(record)
                .inspect_err(|error| tracing::debug!("ignoring invalid transaction: {error}"))
                .ok()
        })
        .collect()
}

fn parse_limit(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|limit| limit.is_finite() && *limit >= 0.0)
}
