//! Trade rejection taxonomy.

use thiserror::Error;
use types::{Cash, Quantity, Symbol};

/// Why a trade was rejected. All variants are recoverable; the caller
/// decides whether to adjust and resubmit. A rejected trade never mutates
/// portfolio state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// Buy cost including the fee exceeds available cash.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds { required: Cash, available: Cash },

    /// Sell quantity exceeds the held quantity (or the symbol is not held).
    #[error("insufficient shares of {symbol}: tried to sell {requested}, holding {held}")]
    InsufficientShares {
        symbol: Symbol,
        requested: Quantity,
        held: Quantity,
    },

    /// The symbol does not exist in the instrument catalog.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(Symbol),

    /// Quantity must be a positive whole number of shares.
    #[error("quantity must be a positive whole number of shares")]
    InvalidQuantity,
}
