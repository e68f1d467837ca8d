//! Application router configuration.

use std::path::Path;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    asset_cache::cache_first,
    dashboard::{
        create_transaction_endpoint, filter_transactions_endpoint, get_dashboard_page,
        update_daily_limit_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    report::get_report,
};

/// Return a router with all the app's routes.
///
/// Any path that is not a route is answered from the asset cache, then from
/// the files in `static_dir`, and finally with a 404 page.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(static_dir).not_found_service(get_404_not_found.into_service());

    Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(
            endpoints::TRANSACTIONS_API,
            get(filter_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::DAILY_LIMIT_API, put(update_daily_limit_endpoint))
        .route(endpoints::REPORT_API, get(get_report))
        .fallback_service(static_files)
        .layer(middleware::from_fn_with_state(state.clone(), cache_first))
        .with_state(state)
}
