//! Per-category balance aggregation over the transactions table.

use std::collections::BTreeMap;

use rusqlite::Connection;

use crate::{Error, transaction::Amount};

/// The total amount for each category, keyed by category name.
///
/// Only categories with at least one transaction are present.
pub type CategoryBalances = BTreeMap<String, f64>;

/// Sum the amounts of all transactions grouped by category.
///
/// A missing sum is treated as zero.
///
/// # Arguments
/// * `connection` - Database connection reference
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - The sum overflows a 64-bit integer
pub fn get_category_balances(connection: &Connection) -> Result<CategoryBalances, Error> {
    connection
        .prepare("SELECT category, SUM(amount) FROM transactions GROUP BY category")?
        .query_map([], |row| {
            let category: String = row.get(0)?;
            let total: Option<i64> = row.get(1)?;

            Ok((category, Amount::from_cents(total.unwrap_or(0)).as_f64()))
        })?
        .map(|balance_result| balance_result.map_err(Error::SqlError))
        .collect()
}
