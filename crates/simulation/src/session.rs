//! The trading session: one explicitly owned simulation context.
//!
//! A [`TradingSession`] bundles the engine, the trading account, the clock,
//! and the persistence collaborator. It is created once per session and
//! never reconstructed behind the caller's back; [`TradingSession::reset`]
//! explicitly discards and recreates the simulation state.
//!
//! Ticks are driven by an external cadence (e.g. a timer owned by the
//! host). The session owns no timer, so stopping the cadence is the whole
//! teardown story: each tick is atomic and synchronous, there is nothing
//! in flight to cancel.
//!
//! In a multi-threaded host the engine, event set, and portfolio form one
//! logical resource: a tick and a concurrent read/trade must not
//! interleave, or the reader can observe a half-updated instrument set.
//! [`SharedSession`] is the intended way to hold a session across threads.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use market::{Clock, MarketClockState};
use news::{MarketEvent, NewsFeed};
use portfolio::{Account, TradeError};
use storage::{StorageError, Store};
use types::{Instrument, Portfolio, Price, Quantity, Sentiment, Timestamp, Transaction};

use crate::catalog;
use crate::config::SimulationConfig;
use crate::engine::MarketEngine;

/// A session shared across threads. Lock for the duration of a tick or a
/// read/trade, never longer.
pub type SharedSession = Arc<Mutex<TradingSession>>;

// =============================================================================
// SessionError
// =============================================================================

/// Failures surfaced by session operations: a rejected trade, or a
/// persistence failure after the trade already applied.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The trade was rejected; no state changed.
    #[error(transparent)]
    Trade(#[from] TradeError),

    /// The persistence collaborator failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// =============================================================================
// TradingSession
// =============================================================================

/// One user-facing simulation session.
pub struct TradingSession {
    config: SimulationConfig,
    engine: MarketEngine,
    account: Account,
    clock: Box<dyn Clock>,
    store: Box<dyn Store>,
}

impl TradingSession {
    /// Start (or resume) a session.
    ///
    /// If the store holds a cached instrument snapshot the session resumes
    /// mid-session prices; otherwise instruments are seeded from the
    /// catalog. Likewise the portfolio and transaction log are restored
    /// when present.
    pub fn new(
        config: SimulationConfig,
        clock: Box<dyn Clock>,
        store: Box<dyn Store>,
    ) -> Result<Self, StorageError> {
        let now = clock.now();

        let instruments = match store.load_instruments()? {
            Some(cached) if !cached.is_empty() => {
                tracing::info!(count = cached.len(), "resuming cached instruments");
                cached
            }
            _ => Self::seeded_instruments(&config, now),
        };

        let account = match store.load_portfolio()? {
            Some(saved) => Account::from_parts(saved, store.load_transactions()?),
            None => Account::new(config.initial_cash),
        };

        let engine = MarketEngine::new(instruments, &config, now);

        let mut session = Self {
            config,
            engine,
            account,
            clock,
            store,
        };
        session.account.refresh(session.engine.instrument_map());
        Ok(session)
    }

    fn seeded_instruments(config: &SimulationConfig, now: Timestamp) -> Vec<Instrument> {
        let mut instruments = catalog::default_catalog();
        // Backfill uses its own stream so seeding does not perturb the
        // price or event sequences.
        let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(2));
        for instrument in &mut instruments {
            catalog::backfill_history(
                instrument,
                config.backfill_history_days,
                now,
                config.price.max_history_points,
                &mut rng,
            );
        }
        instruments
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Advance the simulation by one tick and recompute the portfolio from
    /// the updated prices.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.engine.tick(now);
        self.account.refresh(self.engine.instrument_map());
    }

    /// Set the global market sentiment.
    pub fn set_sentiment(&mut self, sentiment: Sentiment) {
        self.engine.set_sentiment(sentiment);
    }

    // =========================================================================
    // Trading
    // =========================================================================

    /// Buy `quantity` shares of `symbol` at its current price.
    ///
    /// The symbol must exist in the catalog. On success the transaction is
    /// appended to the store and the portfolio is persisted.
    pub fn buy(&mut self, symbol: &str, quantity: Quantity) -> Result<(), SessionError> {
        let (name, price) = self.quote(symbol)?;
        self.account
            .execute_buy(symbol, &name, quantity, price, self.clock.now())?;
        self.after_trade()
    }

    /// Sell `quantity` shares of `symbol` at its current price.
    ///
    /// The symbol must exist in the catalog. On success the transaction is
    /// appended to the store and the portfolio is persisted.
    pub fn sell(&mut self, symbol: &str, quantity: Quantity) -> Result<(), SessionError> {
        let (name, price) = self.quote(symbol)?;
        self.account
            .execute_sell(symbol, &name, quantity, price, self.clock.now())?;
        self.after_trade()
    }

    fn quote(&self, symbol: &str) -> Result<(String, Price), TradeError> {
        let instrument = self
            .engine
            .instrument(symbol)
            .ok_or_else(|| TradeError::UnknownSymbol(symbol.to_string()))?;
        Ok((instrument.name.clone(), instrument.price))
    }

    fn after_trade(&mut self) -> Result<(), SessionError> {
        self.account.refresh(self.engine.instrument_map());
        if let Some(transaction) = self.account.last_transaction() {
            self.store.append_transaction(transaction)?;
        }
        self.store.save_portfolio(self.account.portfolio())?;
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Persist the portfolio and the instrument snapshot.
    ///
    /// Transactions are already appended at trade time; calling this
    /// additionally caches instrument prices so a restart resumes
    /// mid-session instead of re-seeding.
    pub fn persist(&self) -> Result<(), StorageError> {
        self.store.save_portfolio(self.account.portfolio())?;
        self.store
            .save_instruments(&self.engine.instrument_snapshot())?;
        Ok(())
    }

    /// Discard all session state and start over from the seed catalog.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        tracing::info!("resetting session");
        self.store.clear()?;
        let now = self.clock.now();
        self.engine = MarketEngine::new(Self::seeded_instruments(&self.config, now), &self.config, now);
        self.account = Account::new(self.config.initial_cash);
        self.account.refresh(self.engine.instrument_map());
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Instruments in catalog order.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.engine.instruments()
    }

    /// Look up one instrument.
    pub fn instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.engine.instrument(symbol)
    }

    /// The portfolio, as of the last tick or trade.
    pub fn portfolio(&self) -> &Portfolio {
        self.account.portfolio()
    }

    /// The transaction log, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        self.account.transactions()
    }

    /// The news feed, newest first.
    pub fn news(&self) -> &NewsFeed {
        self.engine.news()
    }

    /// Currently live market events.
    pub fn active_events(&self) -> &[MarketEvent] {
        self.engine.active_events()
    }

    /// The exposed market clock state.
    pub fn clock_state(&self) -> &MarketClockState {
        self.engine.clock_state()
    }

    /// The session configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
