//! Defines the endpoint for the per-category balance summary.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, balance::core::get_category_balances};

/// The state needed for the [get_balances_endpoint](crate::balance::get_balances_endpoint) route handler.
#[derive(Debug, Clone)]
pub struct BalanceState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BalanceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Responds with a JSON object mapping each category to its total amount.
pub async fn get_balances_endpoint(State(state): State<BalanceState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_category_balances(&connection) {
        Ok(balances) => Json(balances).into_response(),
        Err(error) => {
            tracing::error!("could not get category balances: {error}");
            error.into_response()
        }
    }
}
