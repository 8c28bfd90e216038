//! Per-category balances derived from the stored transactions.

mod balances_endpoint;
mod core;

pub use balances_endpoint::get_balances_endpoint;
pub use core::{CategoryBalances, get_category_balances};
