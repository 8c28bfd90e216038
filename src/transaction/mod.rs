//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validated value types it is made of
//! - Validation of the JSON body used to create a transaction
//! - Database functions for storing and listing transactions
//! - Route handlers for the transaction endpoints

mod core;
mod create_endpoint;
mod domain;
mod form;
mod list_endpoint;
mod query;

pub use core::{
    NewTransaction, Transaction, count_transactions, create_transaction, create_transaction_table,
    get_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use domain::{Amount, CategoryName, CurrencyCode};
pub use list_endpoint::list_transactions_endpoint;
pub use query::{DateFilter, list_transactions};
