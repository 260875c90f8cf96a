//! Core types for the paper trading simulator.
//!
//! This crate provides all shared data types used across the simulation:
//! identifier newtypes, fixed-point monetary values, the instrument model
//! with its rolling price history, and the portfolio/transaction records.

// =============================================================================
// Module Declarations
// =============================================================================

mod ids;
mod instrument;
mod money;
mod portfolio;

// =============================================================================
// Re-exports
// =============================================================================

pub use ids::{EventId, Symbol, Timestamp, TransactionId};
pub use instrument::{Instrument, PricePoint, Sector, Sentiment, VolatilityTier};
pub use money::{Cash, PRICE_SCALE, Price, Quantity};
pub use portfolio::{Holding, Portfolio, TradeSide, Transaction};
