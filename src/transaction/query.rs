//! Database query for listing transactions within a date range.

use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    transaction::{
        core::{Transaction, map_transaction_row},
        domain::parse_date,
    },
};

/// The raw query string for listing transactions, e.g.
/// `?startDate=2025-08-02&endDate=2025-08-03`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilterQuery {
    /// The earliest date to include, in the format `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// The latest date to include, in the format `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// An inclusive date range where either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    /// Only include transactions on or after this date.
    pub start: Option<Date>,
    /// Only include transactions on or before this date.
    pub end: Option<Date>,
}

impl TryFrom<DateFilterQuery> for DateFilter {
    type Error = Error;

    /// Parse the query string dates.
    ///
    /// Empty values are treated the same as missing values.
    fn try_from(query: DateFilterQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            start: parse_filter_date("startDate", query.start_date)?,
            end: parse_filter_date("endDate", query.end_date)?,
        })
    }
}

fn parse_filter_date(field: &'static str, value: Option<String>) -> Result<Option<Date>, Error> {
    match value {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => match parse_date(&value) {
            Some(date) => Ok(Some(date)),
            None => Err(Error::InvalidDateFilter { field, value }),
        },
    }
}

/// Get the transactions within `filter`, newest first.
///
/// Transactions on the same date are ordered by ID, so the most recently
/// stored one comes first.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn list_transactions(
    filter: DateFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, currency, date, description, category, created_at, updated_at
             FROM transactions
             WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
             ORDER BY date DESC, id DESC",
        )?
        .query_map((filter.start, filter.end), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
