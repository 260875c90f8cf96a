//! Market mechanics for the paper trading simulator.
//!
//! This crate provides the two leaf components of the simulation engine:
//! - **Clock**: injectable time source, session-hours tracking, and the
//!   exposed market clock state (open/closed, sentiment)
//! - **Price model**: the per-instrument random-walk update with volatility
//!   tiers, sentiment bias, event impact, and throttled history recording
//!
//! Both components are pure with respect to time and randomness: the clock
//! is a trait so tests can simulate time advancement without real delays,
//! and the price model draws from a caller-owned seeded RNG so exact
//! outputs can be asserted.

mod clock;
mod model;

pub use clock::{
    Clock, ManualClock, MarketClock, MarketClockState, SystemClock, is_session_open,
    session_bounds,
};
pub use model::{PriceModel, PriceModelConfig, TickContext};
