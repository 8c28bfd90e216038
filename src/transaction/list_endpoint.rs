//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{
        create_endpoint::TransactionState,
        query::{DateFilter, DateFilterQuery, list_transactions},
    },
};

/// A route handler for listing transactions, newest first.
///
/// The optional `startDate` and `endDate` query parameters limit the result
/// to an inclusive date range. Invalid dates are rejected with
/// `400 Bad Request` before the database is touched.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    query: Result<Query<DateFilterQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("rejected query string: {rejection}");
            return Error::InvalidQuery(rejection.body_text()).into_response();
        }
    };

    let filter = match DateFilter::try_from(query) {
        Ok(filter) => filter,
        Err(error) => {
            tracing::debug!("rejected date filter: {error}");
            return error.into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match list_transactions(filter, &connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("could not list transactions: {error}");
            error.into_response()
        }
    }
}
