//! Simulation configuration options.

use market::PriceModelConfig;
use news::EventGeneratorConfig;
use serde::{Deserialize, Serialize};
use types::Cash;

/// Configuration for one trading session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for all stochastic components. The same seed reproduces the
    /// same price paths and event stream.
    pub seed: u64,

    /// Starting (and baseline) cash for the portfolio.
    pub initial_cash: Cash,

    /// Event generation settings.
    pub events: EventGeneratorConfig,

    /// Price model settings.
    pub price: PriceModelConfig,

    /// Maximum number of retained news items.
    pub max_news_items: usize,

    /// Days of synthetic daily history to backfill at seeding.
    /// Zero disables backfill.
    pub backfill_history_days: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_cash: Cash::from_float(100_000.0),
            events: EventGeneratorConfig::default(),
            price: PriceModelConfig::default(),
            max_news_items: 50,
            backfill_history_days: 365,
        }
    }
}

impl SimulationConfig {
    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting cash.
    pub fn with_initial_cash(mut self, cash: Cash) -> Self {
        self.initial_cash = cash;
        self
    }

    /// Set the event generation settings.
    pub fn with_events(mut self, events: EventGeneratorConfig) -> Self {
        self.events = events;
        self
    }

    /// Set the price model settings.
    pub fn with_price(mut self, price: PriceModelConfig) -> Self {
        self.price = price;
        self
    }

    /// Set the news retention cap.
    pub fn with_max_news_items(mut self, max: usize) -> Self {
        self.max_news_items = max;
        self
    }

    /// Set the history backfill length in days.
    pub fn with_backfill_days(mut self, days: u32) -> Self {
        self.backfill_history_days = days;
        self
    }
}
