//! Dashboard module
//!
//! Provides the single page of the app: the entry form, the daily limit, the
//! summary totals, the searchable transaction list and the expense charts.

mod charts;
mod handlers;
mod list;
mod page;
mod summary;

pub use charts::ChartRenderer;
pub use handlers::{
    create_transaction_endpoint, filter_transactions_endpoint, get_dashboard_page,
    update_daily_limit_endpoint,
};
