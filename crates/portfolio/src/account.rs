//! The trading account: buy/sell execution and portfolio valuation.
//!
//! ## Cost Basis
//!
//! Positions are tracked at weighted average cost:
//! - On buy: `new_avg_cost = (old_qty * old_avg + buy_qty * buy_price) / (old_qty + buy_qty)`
//! - On partial sell: quantity and cost basis shrink proportionally while
//!   the average cost itself is unchanged (FIFO-agnostic semantics)
//!
//! ## Fees
//!
//! A fixed 0.1% fee applies to both sides and is never refunded. The fee is
//! recorded on the transaction separately from the gross value, and the
//! [`order_total`] preview uses the same constant so quoted totals match
//! executed totals exactly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use types::{
    Cash, Holding, Instrument, Portfolio, Price, Quantity, Symbol, Timestamp, TradeSide,
    Transaction, TransactionId,
};

use crate::error::TradeError;

/// Fixed transaction fee rate applied to both buys and sells.
pub const FEE_RATE: f64 = 0.001;

/// Total cost or proceeds of an order, as shown in an order preview.
///
/// Uses the same [`FEE_RATE`] as execution.
pub fn order_total(quantity: Quantity, price: Price, include_fee: bool) -> Cash {
    let gross = price * quantity;
    if include_fee { gross + fee_for(gross) } else { gross }
}

fn fee_for(gross: Cash) -> Cash {
    Cash::from_float(gross.to_float() * FEE_RATE)
}

// =============================================================================
// Account
// =============================================================================

/// The user's trading account: one portfolio plus its transaction log.
///
/// Trades are evaluated once against current state and either applied
/// atomically or rejected with no state change. The transaction log is
/// append-only; entries are never mutated or deleted short of a full
/// session reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    portfolio: Portfolio,
    transactions: Vec<Transaction>,
    next_txn_id: u64,
}

impl Account {
    /// Open a fresh account with the given starting cash.
    pub fn new(initial_cash: Cash) -> Self {
        Self {
            portfolio: Portfolio::with_initial_cash(initial_cash),
            transactions: Vec::new(),
            next_txn_id: 1,
        }
    }

    /// Rebuild an account from persisted state.
    pub fn from_parts(portfolio: Portfolio, transactions: Vec<Transaction>) -> Self {
        let next_txn_id = transactions.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        Self {
            portfolio,
            transactions,
            next_txn_id,
        }
    }

    /// The current portfolio.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// The transaction log, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The most recently recorded transaction.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    // =========================================================================
    // Trading
    // =========================================================================

    /// Buy `quantity` shares at `price`.
    ///
    /// Fails without state change if the cost including the fee exceeds
    /// available cash. On success the position is opened or merged at
    /// weighted average cost and a buy transaction is appended.
    pub fn execute_buy(
        &mut self,
        symbol: &str,
        stock_name: &str,
        quantity: Quantity,
        price: Price,
        now: Timestamp,
    ) -> Result<(), TradeError> {
        if quantity.is_zero() {
            return Err(TradeError::InvalidQuantity);
        }

        let gross = price * quantity;
        let fee = fee_for(gross);
        let total = gross + fee;

        if self.portfolio.cash < total {
            return Err(TradeError::InsufficientFunds {
                required: total,
                available: self.portfolio.cash,
            });
        }

        self.portfolio.cash -= total;

        match self
            .portfolio
            .holdings
            .iter_mut()
            .find(|h| h.symbol == symbol)
        {
            Some(holding) => {
                let new_quantity = holding.quantity + quantity;
                let new_total_cost = holding.total_cost + gross;
                holding.average_cost =
                    Price::from_float(new_total_cost.to_float() / new_quantity.raw() as f64);
                holding.quantity = new_quantity;
                holding.total_cost = new_total_cost;
                holding.current_price = price;
                holding.total_value = price * new_quantity;
            }
            None => {
                self.portfolio
                    .holdings
                    .push(Holding::opened(symbol, quantity, price));
            }
        }

        self.record(TradeSide::Buy, symbol, stock_name, quantity, price, now, gross, fee);
        Ok(())
    }

    /// Sell `quantity` shares at `price`.
    ///
    /// Fails without state change if the symbol is not held or the held
    /// quantity is too small. Selling the entire position removes the
    /// holding; a partial sell reduces quantity and cost basis
    /// proportionally, leaving the average cost unchanged.
    pub fn execute_sell(
        &mut self,
        symbol: &str,
        stock_name: &str,
        quantity: Quantity,
        price: Price,
        now: Timestamp,
    ) -> Result<(), TradeError> {
        if quantity.is_zero() {
            return Err(TradeError::InvalidQuantity);
        }

        let Some(index) = self
            .portfolio
            .holdings
            .iter()
            .position(|h| h.symbol == symbol)
        else {
            return Err(TradeError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held: Quantity::ZERO,
            });
        };

        let held = self.portfolio.holdings[index].quantity;
        if held < quantity {
            return Err(TradeError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held,
            });
        }

        let gross = price * quantity;
        let fee = fee_for(gross);
        self.portfolio.cash += gross - fee;

        if held == quantity {
            self.portfolio.holdings.remove(index);
        } else {
            let holding = &mut self.portfolio.holdings[index];
            holding.quantity -= quantity;
            holding.total_cost -= holding.average_cost * quantity;
            holding.current_price = price;
            holding.total_value = price * holding.quantity;
        }

        self.record(TradeSide::Sell, symbol, stock_name, quantity, price, now, gross, fee);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        side: TradeSide,
        symbol: &str,
        stock_name: &str,
        quantity: Quantity,
        price: Price,
        now: Timestamp,
        gross: Cash,
        fee: Cash,
    ) {
        let txn = Transaction {
            id: TransactionId(self.next_txn_id),
            side,
            symbol: symbol.to_string(),
            stock_name: stock_name.to_string(),
            quantity,
            price,
            timestamp: now,
            gross_value: gross,
            fee,
        };
        self.next_txn_id += 1;

        tracing::info!(
            side = %txn.side,
            symbol = %txn.symbol,
            quantity = %txn.quantity,
            price = %txn.price,
            fee = %txn.fee,
            "trade executed"
        );
        self.transactions.push(txn);
    }

    // =========================================================================
    // Valuation
    // =========================================================================

    /// Recompute every derived figure from current instrument prices.
    ///
    /// Holdings and portfolio totals are fully recomputed, never patched:
    /// the instrument's price and previous close are the single source of
    /// truth for valuation. The portfolio's previous total value is derived
    /// as `total_value - day_change` from these freshly recomputed figures,
    /// with the percentage denominator guarded against zero.
    pub fn refresh(&mut self, instruments: &HashMap<Symbol, Instrument>) {
        for holding in &mut self.portfolio.holdings {
            let Some(instrument) = instruments.get(&holding.symbol) else {
                tracing::warn!(
                    symbol = %holding.symbol,
                    "holding references an instrument missing from the catalog; keeping stale valuation"
                );
                continue;
            };

            let price = instrument.price;
            holding.current_price = price;
            holding.total_value = price * holding.quantity;
            holding.gain_loss = holding.total_value - holding.total_cost;
            holding.gain_loss_percent = if holding.total_cost.is_positive() {
                holding.gain_loss.to_float() / holding.total_cost.to_float() * 100.0
            } else {
                0.0
            };

            let day_move = price - instrument.previous_close;
            holding.day_change = day_move * holding.quantity;
            holding.day_change_percent = if instrument.previous_close.is_positive() {
                day_move.to_float() / instrument.previous_close.to_float() * 100.0
            } else {
                0.0
            };
        }

        let portfolio = &mut self.portfolio;
        let holdings_value: Cash = portfolio.holdings.iter().map(|h| h.total_value).sum();
        portfolio.total_value = portfolio.cash + holdings_value;
        portfolio.all_time_return = portfolio.total_value - portfolio.initial_value;
        portfolio.all_time_return_percent = if portfolio.initial_value.is_positive() {
            portfolio.all_time_return.to_float() / portfolio.initial_value.to_float() * 100.0
        } else {
            0.0
        };

        portfolio.day_change = portfolio.holdings.iter().map(|h| h.day_change).sum();
        let previous_total = portfolio.total_value - portfolio.day_change;
        portfolio.day_change_percent = if previous_total.is_positive() {
            portfolio.day_change.to_float() / previous_total.to_float() * 100.0
        } else {
            0.0
        };
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Sector, VolatilityTier};

    fn account(cash: f64) -> Account {
        Account::new(Cash::from_float(cash))
    }

    fn instrument(symbol: &str, price: f64, previous_close: f64) -> Instrument {
        Instrument::seeded(
            symbol,
            format!("{symbol} Corp"),
            Sector::Technology,
            VolatilityTier::Medium,
            Price::from_float(price),
            Price::from_float(previous_close),
            1_000_000,
            Cash::from_float(1e9),
            "test instrument",
        )
    }

    fn instruments(entries: &[(&str, f64, f64)]) -> HashMap<Symbol, Instrument> {
        entries
            .iter()
            .map(|(s, p, pc)| (s.to_string(), instrument(s, *p, *pc)))
            .collect()
    }

    #[test]
    fn test_order_total_preview() {
        let no_fee = order_total(Quantity(5), Price::from_float(100.0), false);
        let with_fee = order_total(Quantity(5), Price::from_float(100.0), true);

        assert_eq!(no_fee, Cash::from_float(500.0));
        assert_eq!(with_fee, Cash::from_float(500.5));
    }

    #[test]
    fn test_average_cost_merge() {
        let mut account = account(100_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(10), Price::from_float(100.0), 0)
            .unwrap();
        account
            .execute_buy("AAA", "AAA Corp", Quantity(10), Price::from_float(120.0), 1)
            .unwrap();

        let holding = account.portfolio().holding("AAA").unwrap();
        assert_eq!(holding.quantity, 20);
        assert_eq!(holding.average_cost, Price::from_float(110.0));
        assert_eq!(holding.total_cost, Cash::from_float(2_200.0));
    }

    #[test]
    fn test_buy_sell_round_trip_pays_fees_twice() {
        let mut account = account(10_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(5), Price::from_float(100.0), 0)
            .unwrap();
        account
            .execute_sell("AAA", "AAA Corp", Quantity(5), Price::from_float(100.0), 1)
            .unwrap();

        // 10,000 − 2 × fee(500) = 10,000 − 2 × 0.5
        assert_eq!(account.portfolio().cash, Cash::from_float(9_999.0));
        assert!(account.portfolio().holding("AAA").is_none());
        assert_eq!(account.transactions().len(), 2);
    }

    #[test]
    fn test_insufficient_funds_rejected_without_change() {
        let mut account = account(100.0);
        let result =
            account.execute_buy("AAA", "AAA Corp", Quantity(1), Price::from_float(150.0), 0);

        assert!(matches!(result, Err(TradeError::InsufficientFunds { .. })));
        assert_eq!(account.portfolio().cash, Cash::from_float(100.0));
        assert!(account.portfolio().holdings.is_empty());
        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_insufficient_shares_rejected_without_change() {
        let mut account = account(1_000.0);
        let before = account.portfolio().clone();

        let result =
            account.execute_sell("AAA", "AAA Corp", Quantity(1), Price::from_float(50.0), 0);

        assert!(matches!(result, Err(TradeError::InsufficientShares { .. })));
        assert_eq!(account.portfolio(), &before);

        // Partial overdraw is also rejected
        account
            .execute_buy("AAA", "AAA Corp", Quantity(2), Price::from_float(50.0), 1)
            .unwrap();
        let result =
            account.execute_sell("AAA", "AAA Corp", Quantity(3), Price::from_float(50.0), 2);
        assert!(matches!(
            result,
            Err(TradeError::InsufficientShares { held, .. }) if held == Quantity(2)
        ));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut account = account(1_000.0);
        assert_eq!(
            account.execute_buy("AAA", "AAA Corp", Quantity::ZERO, Price::from_float(10.0), 0),
            Err(TradeError::InvalidQuantity)
        );
        assert_eq!(
            account.execute_sell("AAA", "AAA Corp", Quantity::ZERO, Price::from_float(10.0), 0),
            Err(TradeError::InvalidQuantity)
        );
    }

    #[test]
    fn test_partial_sell_preserves_average_cost() {
        let mut account = account(100_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(10), Price::from_float(100.0), 0)
            .unwrap();
        account
            .execute_sell("AAA", "AAA Corp", Quantity(4), Price::from_float(130.0), 1)
            .unwrap();

        let holding = account.portfolio().holding("AAA").unwrap();
        assert_eq!(holding.quantity, 6);
        assert_eq!(holding.average_cost, Price::from_float(100.0));
        assert_eq!(holding.total_cost, Cash::from_float(600.0));
    }

    #[test]
    fn test_total_value_identity_after_refresh() {
        let mut account = account(50_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(10), Price::from_float(100.0), 0)
            .unwrap();
        account
            .execute_buy("BBB", "BBB Corp", Quantity(20), Price::from_float(50.0), 1)
            .unwrap();

        let map = instruments(&[("AAA", 107.5, 100.0), ("BBB", 48.25, 50.0)]);
        account.refresh(&map);

        let portfolio = account.portfolio();
        let expected = portfolio.cash + portfolio.holdings_value();
        assert_eq!(portfolio.total_value, expected);
    }

    #[test]
    fn test_scenario_single_instrument() {
        // Seed AAA at 100.00 / previous close 100.00, cash 1000.
        let mut account = account(1_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(5), Price::from_float(100.0), 0)
            .unwrap();

        // fee 0.1% of 500 → 0.5
        assert_eq!(account.portfolio().cash, Cash::from_float(499.5));
        let holding = account.portfolio().holding("AAA").unwrap();
        assert_eq!(holding.quantity, 5);
        assert_eq!(holding.average_cost, Price::from_float(100.0));
        assert_eq!(holding.total_cost, Cash::from_float(500.0));

        let txn = account.last_transaction().unwrap();
        assert_eq!(txn.gross_value, Cash::from_float(500.0));
        assert_eq!(txn.fee, Cash::from_float(0.5));

        // Price ticks to 110 (simulated directly), then recompute.
        let map = instruments(&[("AAA", 110.0, 100.0)]);
        account.refresh(&map);

        let holding = account.portfolio().holding("AAA").unwrap();
        assert_eq!(holding.total_value, Cash::from_float(550.0));
        assert_eq!(holding.gain_loss, Cash::from_float(50.0));
        assert!((holding.gain_loss_percent - 10.0).abs() < 1e-9);

        let portfolio = account.portfolio();
        assert_eq!(portfolio.total_value, Cash::from_float(1_049.5));
        assert_eq!(portfolio.day_change, Cash::from_float(50.0));
        assert_eq!(portfolio.all_time_return, Cash::from_float(49.5));
    }

    #[test]
    fn test_day_change_aggregates_across_holdings() {
        let mut account = account(100_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(10), Price::from_float(100.0), 0)
            .unwrap();
        account
            .execute_buy("BBB", "BBB Corp", Quantity(10), Price::from_float(100.0), 1)
            .unwrap();

        // AAA up 2, BBB down 5 on the day
        let map = instruments(&[("AAA", 102.0, 100.0), ("BBB", 95.0, 100.0)]);
        account.refresh(&map);

        let portfolio = account.portfolio();
        assert_eq!(portfolio.day_change, Cash::from_float(-30.0));
        let previous_total = portfolio.total_value - portfolio.day_change;
        let expected_pct =
            portfolio.day_change.to_float() / previous_total.to_float() * 100.0;
        assert!((portfolio.day_change_percent - expected_pct).abs() < 1e-9);
    }

    #[test]
    fn test_resume_from_parts_continues_ids() {
        let mut account = account(10_000.0);
        account
            .execute_buy("AAA", "AAA Corp", Quantity(1), Price::from_float(10.0), 0)
            .unwrap();
        account
            .execute_buy("AAA", "AAA Corp", Quantity(1), Price::from_float(10.0), 1)
            .unwrap();

        let resumed = Account::from_parts(
            account.portfolio().clone(),
            account.transactions().to_vec(),
        );
        let mut resumed = resumed;
        resumed
            .execute_sell("AAA", "AAA Corp", Quantity(2), Price::from_float(10.0), 2)
            .unwrap();

        let ids: Vec<u64> = resumed.transactions().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
