//! Market events and the news system for the paper trading simulator.
//!
//! This crate provides:
//! - **Events**: time-bounded, symbol-targeted price shocks ([`MarketEvent`])
//! - **Generator**: stochastic event creation with deterministic seeding
//! - **Feed**: the bounded, newest-first list of display news items
//!
//! # Event Lifecycle
//!
//! Events carry a creation timestamp and a duration in minutes. An event is
//! active iff `now < created_at + duration`; expiry is a computed predicate,
//! not a separate timer. The engine prunes inactive events as a side effect
//! of the per-tick impact pass:
//!
//! ```text
//! Tick N:
//!   1. EventGenerator::maybe_spawn() → Option<MarketEvent>   (mutable)
//!   2. Derive NewsItem, prepend to NewsFeed (trim to cap)    (mutable)
//!   3. Sum active impacts per symbol, retain active events   (mutable)
//!   4. Price model reads the summed impacts                  (immutable)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod events;
pub mod feed;
pub mod generator;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::EventGeneratorConfig;
pub use events::{EventKind, EventTemplate, MarketEvent};
pub use feed::{ImpactDirection, NewsFeed, NewsItem, Severity};
pub use generator::EventGenerator;
