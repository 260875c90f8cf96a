//! Portfolio, holding, and transaction records.
//!
//! These are pure data carriers; the accounting rules that mutate them live
//! in the `portfolio` crate.

use crate::ids::{Symbol, Timestamp, TransactionId};
use crate::money::{Cash, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// TradeSide
// =============================================================================

/// Which direction a trade goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

// =============================================================================
// Holding
// =============================================================================

/// A position in one instrument, tracked at weighted-average cost.
///
/// Created on first buy, merged on subsequent buys, reduced on sells, and
/// removed when quantity reaches zero; a holding with zero quantity never
/// appears in the portfolio. All fields other than `quantity`,
/// `average_cost`, and `total_cost` are derived and overwritten on every
/// refresh from current prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument this position is in.
    pub symbol: Symbol,
    /// Number of shares held. Always positive.
    pub quantity: Quantity,
    /// Weighted-average cost per share.
    pub average_cost: Price,
    /// Latest price, refreshed from the instrument.
    pub current_price: Price,
    /// `quantity * current_price`.
    pub total_value: Cash,
    /// Cost basis of the position (`quantity * average_cost` at rest).
    pub total_cost: Cash,
    /// `total_value - total_cost`.
    pub gain_loss: Cash,
    /// Gain/loss as a percentage of cost basis.
    pub gain_loss_percent: f64,
    /// `(current_price - previous_close) * quantity`.
    pub day_change: Cash,
    /// Day change as a percentage of the previous close.
    pub day_change_percent: f64,
}

impl Holding {
    /// Open a new position at the given price.
    pub fn opened(symbol: impl Into<Symbol>, quantity: Quantity, price: Price) -> Self {
        let cost = price * quantity;
        Self {
            symbol: symbol.into(),
            quantity,
            average_cost: price,
            current_price: price,
            total_value: cost,
            total_cost: cost,
            gain_loss: Cash::ZERO,
            gain_loss_percent: 0.0,
            day_change: Cash::ZERO,
            day_change_percent: 0.0,
        }
    }
}

// =============================================================================
// Portfolio
// =============================================================================

/// The user's portfolio: cash plus holdings, with derived valuation figures.
///
/// One portfolio per session. The derived totals are recomputed from
/// holdings and latest prices on every refresh, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Available cash balance.
    pub cash: Cash,
    /// Open positions, unique by symbol.
    pub holdings: Vec<Holding>,
    /// `cash + sum(holding.total_value)`.
    pub total_value: Cash,
    /// Sum of per-holding day changes.
    pub day_change: Cash,
    /// Day change relative to the previous total value.
    pub day_change_percent: f64,
    /// `total_value - initial_value`.
    pub all_time_return: Cash,
    /// All-time return as a percentage of the initial value.
    pub all_time_return_percent: f64,
    /// Fixed starting value of the session.
    pub initial_value: Cash,
}

impl Portfolio {
    /// Create a fresh portfolio holding only cash.
    pub fn with_initial_cash(cash: Cash) -> Self {
        Self {
            cash,
            holdings: Vec::new(),
            total_value: cash,
            day_change: Cash::ZERO,
            day_change_percent: 0.0,
            all_time_return: Cash::ZERO,
            all_time_return_percent: 0.0,
            initial_value: cash,
        }
    }

    /// Look up the holding for a symbol.
    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Combined market value of all holdings.
    pub fn holdings_value(&self) -> Cash {
        self.holdings.iter().map(|h| h.total_value).sum()
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// An immutable, append-only record of one executed trade.
///
/// The fee is tracked separately and excluded from `gross_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier.
    pub id: TransactionId,
    /// Buy or sell.
    pub side: TradeSide,
    /// Instrument traded.
    pub symbol: Symbol,
    /// Display name of the instrument at execution time.
    pub stock_name: String,
    /// Number of shares.
    pub quantity: Quantity,
    /// Execution price per share.
    pub price: Price,
    /// When the trade executed.
    pub timestamp: Timestamp,
    /// `quantity * price`, before fees.
    pub gross_value: Cash,
    /// Fee charged on the trade.
    pub fee: Cash,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} @ {}",
            self.id, self.side, self.quantity, self.symbol, self.price
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
