//! The API endpoint URIs.

/// The root route, which doubles as a liveness check.
pub const ROOT: &str = "/";
/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for the per-category balance summary.
pub const BALANCES: &str = "/balances";
