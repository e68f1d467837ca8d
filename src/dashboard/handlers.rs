//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and acting on the ledger
//! - State and form types used by the handlers

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    dashboard::{
        charts::ChartRenderer,
        list::transaction_list_view,
        page::{dashboard_view, ledger_view},
        summary::warning_view,
    },
    date_stamp::DateStamp,
    endpoints,
    ledger::{
        LedgerStore, TransactionFilter, TransactionType, filter_transactions, parse_amount,
        today_over_limit,
    },
};

/// The state needed for displaying and updating the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The transactions and daily limit.
    pub ledger: Arc<Mutex<LedgerStore>>,
    /// The live charts.
    pub charts: Arc<Mutex<ChartRenderer>>,
    /// The date convention for stamping transactions and finding "today".
    pub date_stamp: DateStamp,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            charts: state.charts.clone(),
            date_stamp: state.date_stamp.clone(),
        }
    }
}

/// The form data for adding a transaction.
///
/// Every field is kept as text and missing fields are empty, so bad input is
/// reported by the handler with an alert.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    /// The text of the amount input, parsed by the handler.
    pub amount: String,
    /// Text describing the transaction.
    pub note: String,
    /// Whether the transaction is "income" or an "expense".
    #[serde(rename = "type")]
    pub type_: String,
    /// The category of the transaction.
    pub category: String,
}

/// The form data for updating the daily limit.
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyLimitForm {
    /// The text of the limit input.
    pub daily_limit: String,
}

fn lock_ledger(state: &DashboardState) -> Result<MutexGuard<'_, LedgerStore>, Error> {
    state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

fn lock_charts(state: &DashboardState) -> Result<MutexGuard<'_, ChartRenderer>, Error> {
    state
        .charts
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire charts lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// Display the dashboard with the whole ledger.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let ledger = lock_ledger(&state)?;
    let mut charts = lock_charts(&state)?;
    let today = state.date_stamp.today()?;

    Ok(dashboard_view(&ledger, &mut charts, &today).into_response())
}

/// A route handler for adding a transaction stamped with today's date.
///
/// htmx requests get the refreshed ledger, other requests are redirected to
/// the dashboard. Invalid input is rejected with an alert and nothing is saved.
pub async fn create_transaction_endpoint(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    Form(form): Form<TransactionForm>,
) -> Response {
    let amount = match parse_amount(&form.amount) {
        Ok(amount) => amount,
        Err(error) => {
            tracing::debug!("rejected transaction amount {:?}", form.amount);
            return error.into_alert_response();
        }
    };

    let type_ = match form.type_.parse::<TransactionType>() {
        Ok(type_) => type_,
        Err(error) => {
            tracing::debug!("rejected transaction type {:?}", form.type_);
            return error.into_alert_response();
        }
    };

    let today = match state.date_stamp.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match lock_ledger(&state) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    match ledger.add(amount, &form.note, type_, &form.category, today.clone()) {
        Ok(transaction) => tracing::info!("added transaction: {transaction}"),
        Err(error) => {
            tracing::debug!("could not add transaction: {error}");
            return error.into_alert_response();
        }
    }

    if !is_htmx_request {
        return Redirect::to(endpoints::ROOT).into_response();
    }

    let mut charts = match lock_charts(&state) {
        Ok(charts) => charts,
        Err(error) => return error.into_alert_response(),
    };

    ledger_view(&ledger, &mut charts, &today).into_response()
}

/// A route handler for setting the daily limit, responds with the refreshed warning.
///
/// Text that is not a valid limit is ignored and the current limit is kept.
pub async fn update_daily_limit_endpoint(
    State(state): State<DashboardState>,
    Form(form): Form<DailyLimitForm>,
) -> Response {
    let mut ledger = match lock_ledger(&state) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    match ledger.set_limit(&form.daily_limit) {
        Ok(true) => tracing::info!("daily limit set to {}", ledger.daily_limit()),
        Ok(false) => {}
        Err(error) => return error.into_alert_response(),
    }

    let today = match state.date_stamp.today() {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let over_limit = today_over_limit(ledger.transactions(), ledger.daily_limit(), &today);

    warning_view(over_limit).into_response()
}

/// A route handler for searching the transactions, responds with the filtered list.
pub async fn filter_transactions_endpoint(
    State(state): State<DashboardState>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let ledger = match lock_ledger(&state) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    let transactions = filter_transactions(ledger.transactions(), &filter);

    transaction_list_view(&transactions).into_response()
}
