//! Stochastic market event generator.
//!
//! The generator is deterministic given the same seed, enabling reproducible
//! simulations for testing and debugging.
//!
//! # Usage
//!
//! ```ignore
//! let mut generator = EventGenerator::new(EventGeneratorConfig::default(), 42);
//!
//! // Each tick
//! if let Some(event) = generator.maybe_spawn(now, &symbols) {
//!     // derive a NewsItem, add to the live event set
//! }
//! ```

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use types::{EventId, Symbol, Timestamp};

use crate::config::EventGeneratorConfig;
use crate::events::{EventKind, MarketEvent};

// =============================================================================
// EventGenerator
// =============================================================================

/// Spawns zero or one [`MarketEvent`] per tick with a small fixed probability.
pub struct EventGenerator {
    /// Configuration for event generation.
    config: EventGeneratorConfig,

    /// Random number generator.
    rng: StdRng,

    /// Next event ID.
    next_id: u64,
}

impl EventGenerator {
    /// Create a new generator.
    ///
    /// # Arguments
    /// * `config` - Event generation configuration
    /// * `seed` - Random seed for deterministic generation
    pub fn new(config: EventGeneratorConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Roll for an event this tick.
    ///
    /// Returns at most one event. The kind is sampled uniformly from the
    /// fixed set; the affected symbols are 1–5 distinct entries drawn
    /// uniformly from `symbols` without replacement (no weighting by sector
    /// or size); impact and duration come from the kind's template.
    pub fn maybe_spawn(&mut self, now: Timestamp, symbols: &[Symbol]) -> Option<MarketEvent> {
        if !self.config.enabled || symbols.is_empty() {
            return None;
        }

        if !self.rng.random_bool(self.config.probability_per_tick) {
            return None;
        }

        let kinds = EventKind::all();
        let kind = kinds[self.rng.random_range(0..kinds.len())];
        let template = kind.template();

        let max_affected = self.config.max_affected_symbols.max(1).min(symbols.len());
        let count = self.rng.random_range(1..=max_affected);
        let affected_symbols: SmallVec<[Symbol; 5]> = symbols
            .choose_multiple(&mut self.rng, count)
            .cloned()
            .collect();

        let (lo, hi) = template.impact_range;
        let price_impact_pct = self.rng.random_range(lo..=hi);

        let event = MarketEvent {
            id: EventId(self.next_id),
            kind,
            title: template.title.to_string(),
            description: template.description.to_string(),
            created_at: now,
            affected_symbols,
            price_impact_pct,
            duration_minutes: template.duration_minutes,
        };

        self.next_id += 1;

        Some(event)
    }

    /// Get current configuration (for debugging/inspection).
    pub fn config(&self) -> &EventGeneratorConfig {
        &self.config
    }
}

// =============================================================================
// Tests
// =============================================================================
