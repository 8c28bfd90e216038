//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::domain::{Amount, CategoryName, CurrencyCode},
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are append-only: once stored they are never updated or
/// deleted. To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: Amount,
    /// The currency `amount` is in.
    pub currency: CurrencyCode,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The label used to group the transaction in the balance summary.
    pub category: CategoryName,
    /// When the transaction was stored.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [NewTransaction] for discoverability.
    pub fn build(
        amount: Amount,
        currency: CurrencyCode,
        date: Date,
        category: CategoryName,
    ) -> NewTransaction {
        NewTransaction {
            amount,
            currency,
            date,
            description: String::new(),
            category,
        }
    }
}

/// A validated transaction that has not been stored yet.
///
/// The description defaults to an empty string, use
/// [NewTransaction::description] to set it.
#[derive(Debug, PartialEq, Clone)]
pub struct NewTransaction {
    /// The monetary amount of the transaction.
    ///
    /// The sign is stored as given. Whether a negative amount is an expense
    /// or a refund is left to the client.
    pub amount: Amount,

    /// The currency of the amount, e.g. "USD".
    pub currency: CurrencyCode,

    /// The date when the transaction occurred.
    pub date: Date,

    /// A human-readable description of the transaction, at most 255 characters.
    pub description: String,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category: CategoryName,
}

impl NewTransaction {
    /// The maximum number of characters in a description.
    pub const MAX_DESCRIPTION_LENGTH: usize = 255;

    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Store a new transaction and return it with its assigned ID and timestamps.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let now = OffsetDateTime::now_utc();

    let transaction = connection
        .prepare(
            "INSERT INTO transactions (amount, currency, date, description, category, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING id, amount, currency, date, description, category, created_at, updated_at",
        )?
        .query_row(
            (
                new_transaction.amount.cents(),
                new_transaction.currency.as_ref(),
                new_transaction.date,
                new_transaction.description,
                new_transaction.category.as_ref(),
                now,
            ),
            map_transaction_row,
        )?;

    tracing::debug!("created transaction {}", transaction.id);

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, currency, date, description, category, created_at, updated_at
             FROM transactions WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    // `amount` holds hundredths, e.g. 1025 for 10.25.
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                currency TEXT NOT NULL CHECK (length(currency) = 3),
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '' CHECK (length(description) <= 255),
                category TEXT NOT NULL CHECK (length(category) <= 64),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Used by the listing query, which filters and sorts on date then id.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_date_id ON transactions(date, id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
///
/// Expects the columns in table order: id, amount, currency, date,
/// description, category, created_at, updated_at.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = Amount::from_cents(row.get(1)?);
    let currency = CurrencyCode::new_unchecked(&row.get::<usize, String>(2)?);
    let date = row.get(3)?;
    let description = row.get(4)?;
    let category = CategoryName::new_unchecked(&row.get::<usize, String>(5)?);
    let created_at = row.get(6)?;
    let updated_at = row.get(7)?;

    Ok(Transaction {
        id,
        amount,
        currency,
        date,
        description,
        category,
        created_at,
        updated_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
