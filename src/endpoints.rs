//! The route URIs.
//!
//! Every path not listed here is looked up as a static asset, see
//! [crate::asset_cache].

/// The dashboard page.
pub const ROOT: &str = "/";
/// The route for adding a transaction (POST) and for filtering the list (GET).
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for updating the daily spending limit.
pub const DAILY_LIMIT_API: &str = "/api/daily_limit";
/// The route for downloading the PDF report.
pub const REPORT_API: &str = "/api/report";
