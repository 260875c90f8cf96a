//! Configuration for the event generator.

use serde::{Deserialize, Serialize};

/// Declarative configuration for stochastic event generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGeneratorConfig {
    /// Probability of spawning an event each tick (0.0 to 1.0).
    pub probability_per_tick: f64,

    /// Upper bound on the affected-symbol count (sampled uniformly in
    /// `1..=max_affected_symbols`, capped by the catalog size).
    pub max_affected_symbols: usize,

    /// Whether event generation is enabled at all.
    pub enabled: bool,
}

impl EventGeneratorConfig {
    /// Create a configuration with the given per-tick probability.
    pub fn new(probability_per_tick: f64) -> Self {
        Self {
            probability_per_tick: probability_per_tick.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// A configuration that never generates events (for deterministic tests).
    pub fn disabled() -> Self {
        Self {
            probability_per_tick: 0.0,
            enabled: false,
            ..Self::default()
        }
    }

    /// A configuration that generates an event every tick (for tests).
    pub fn always() -> Self {
        Self::new(1.0)
    }
}

impl Default for EventGeneratorConfig {
    fn default() -> Self {
        Self {
            // 0.1% chance per tick
            probability_per_tick: 0.001,
            max_affected_symbols: 5,
            enabled: true,
        }
    }
}
