//! Identifier and time aliases shared across the simulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock ticker symbol (e.g., "AAPL", "MSFT").
pub type Symbol = String;

/// Wall clock timestamp in milliseconds since epoch.
///
/// All simulated time (event expiry, history throttling, session hours)
/// is expressed in this unit and sourced from an injectable clock.
pub type Timestamp = u64;

/// Unique identifier for market events (and the news items derived from them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// Unique identifier for portfolio transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Txn({})", self.0)
    }
}
