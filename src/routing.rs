//! Application router configuration.

use axum::{
    Json, Router,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    balance::get_balances_endpoint,
    endpoints,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, list_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_root))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(endpoints::BALANCES, get(get_balances_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Say hello, useful for checking the server is up.
async fn get_root() -> Response {
    Json(json!({
        "hello": "world"
    }))
    .into_response()
}
