//! Defines the app level error type and its conversion to JSON responses.

use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body for a new transaction failed validation.
    ///
    /// Holds every offending field, not just the first one found.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// A date filter in the query string was not a valid `YYYY-MM-DD` date.
    #[error("invalid {field} \"{value}\": expected a date in the format YYYY-MM-DD")]
    InvalidDateFilter {
        /// The name of the query parameter, e.g. "startDate".
        field: &'static str,
        /// The value the client sent.
        value: String,
    },

    /// The query string could not be parsed, e.g. a parameter was repeated.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The request body could not be read as a JSON object.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent for errors that carry a single message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// A human readable description of what went wrong.
    pub message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            error @ (Error::InvalidDateFilter { .. }
            | Error::InvalidQuery(_)
            | Error::InvalidBody(_)) => {
                message_response(StatusCode::BAD_REQUEST, error.to_string())
            }
            Error::NotFound => {
                message_response(StatusCode::NOT_FOUND, Error::NotFound.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                message_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_owned(),
                )
            }
        }
    }
}

fn message_response(status_code: StatusCode, message: String) -> Response {
    (status_code, Json(ErrorMessage { message })).into_response()
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct FieldError {
    /// The name of the field in the request body.
    pub field: String,
    /// A short, machine readable name for the rule that failed, e.g. "maxLength".
    pub rule: String,
    /// A human readable description of the failure.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: &str, rule: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            rule: rule.to_owned(),
            message: message.into(),
        }
    }
}

/// The collected validation failures for one request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// The offending fields, in the order they were checked.
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a failed field.
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Whether no field has failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether `field` has at least one failure.
    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self
            .errors
            .iter()
            .map(|error| error.message.as_str())
            .collect();

        write!(f, "{}", messages.join("; "))
    }
}
