//! Simulation crate: the tick loop and session lifecycle for the paper
//! trading simulator.
//!
//! # Architecture
//!
//! The simulation runs in discrete ticks driven by an external cadence:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │             TradingSession.tick()            │
//! │                                              │
//! │  1. Read the injected clock                  │
//! │  2. Refresh market clock state (open/closed) │
//! │  3. Maybe spawn a market event + news item   │
//! │  4. Sum active event impacts per symbol,     │
//! │     pruning expired events in the same pass  │
//! │  5. Advance every instrument's price         │
//! │  6. Recompute the portfolio from new prices  │
//! │                                              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Trading commands flow the other way: the presentation layer calls
//! [`TradingSession::buy`]/[`TradingSession::sell`], which look up the
//! instrument's current price, apply the accounting rules, and persist the
//! outcome through the storage collaborator.
//!
//! # Example
//!
//! ```ignore
//! use simulation::{SimulationConfig, TradingSession};
//! use market::SystemClock;
//! use storage::MemoryStore;
//! use types::Quantity;
//!
//! let mut session = TradingSession::new(
//!     SimulationConfig::default(),
//!     Box::new(SystemClock),
//!     Box::new(MemoryStore::new()),
//! )?;
//!
//! session.tick();                          // on the host's cadence
//! session.buy("AAPL", Quantity(5))?;       // at the current price
//! println!("{}", session.portfolio().total_value);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod session;

pub use config::SimulationConfig;
pub use engine::MarketEngine;
pub use session::{SessionError, SharedSession, TradingSession};

// Re-exported so hosts can quote order totals with the execution constants.
pub use portfolio::{FEE_RATE, order_total};
