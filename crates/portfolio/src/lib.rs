//! Portfolio accounting for the paper trading simulator.
//!
//! This crate owns the trading rules: buy/sell execution with fee
//! deduction and weighted-average lot merging, the append-only transaction
//! log, and the full recomputation of valuation figures from current
//! prices.
//!
//! Trade failures are local, recoverable conditions surfaced as
//! [`TradeError`] values. Nothing here panics across the API boundary,
//! and a failed trade leaves no state change behind.

mod account;
mod error;

pub use account::{Account, FEE_RATE, order_total};
pub use error::TradeError;
