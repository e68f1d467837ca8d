//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error, asset_cache::AssetCache, dashboard::ChartRenderer, date_stamp::DateStamp,
    db::initialize, ledger::LedgerStore,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions and daily limit, backed by the database.
    pub ledger: Arc<Mutex<LedgerStore>>,

    /// The live charts on the dashboard.
    pub charts: Arc<Mutex<ChartRenderer>>,

    /// The date convention for stamping transactions and finding "today".
    pub date_stamp: DateStamp,

    /// The static assets that are served before the static directory.
    pub asset_cache: Arc<AssetCache>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database and load the ledger from it.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland",
    /// and `date_format` a `time` format description such as
    /// [crate::DEFAULT_DATE_FORMAT].
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or read, or if
    /// the timezone or date format is invalid.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        date_format: &str,
        asset_cache: AssetCache,
    ) -> Result<Self, Error> {
        let date_stamp = DateStamp::new(local_timezone, date_format)?;

        initialize(&db_connection)?;
        let ledger = LedgerStore::load(db_connection)?;

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            charts: Arc::new(Mutex::new(ChartRenderer::new())),
            date_stamp,
            asset_cache: Arc::new(asset_cache),
        })
    }
}

impl FromRef<AppState> for Arc<AssetCache> {
    fn from_ref(state: &AppState) -> Self {
        state.asset_cache.clone()
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        DEFAULT_DATE_FORMAT, Error,
        asset_cache::{AssetCache, CACHE_NAME},
        db::initialize,
        ledger::{DAILY_LIMIT_KEY, TRANSACTIONS_KEY},
        local_storage::set_item,
    };

    use super::AppState;

    #[test]
    fn new_loads_persisted_ledger() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        set_item(
            TRANSACTIONS_KEY,
            r#"[{"amount":50,"note":"lunch","type":"expense","category":"Food","date":"1/2/2026"}]"#,
            &connection,
        )
        .unwrap();
        set_item(DAILY_LIMIT_KEY, "20", &connection).unwrap();

        let state = AppState::new(
            connection,
            "Etc/UTC",
            DEFAULT_DATE_FORMAT,
            AssetCache::empty(CACHE_NAME),
        )
        .unwrap();

        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.transactions()[0].note, "lunch");
        assert_eq!(ledger.daily_limit(), 20.0);
        assert_eq!(state.charts.lock().unwrap().live_handles(), 0);
    }

    #[test]
    fn new_rejects_invalid_timezone() {
        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Not/AZone",
            DEFAULT_DATE_FORMAT,
            AssetCache::empty(CACHE_NAME),
        );

        assert!(matches!(
            result,
            Err(Error::InvalidTimezoneError(timezone)) if timezone == "Not/AZone"
        ));
    }
}
