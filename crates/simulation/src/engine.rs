//! The market engine: one discrete tick over the whole instrument set.
//!
//! The engine holds the authoritative in-memory instrument collection, the
//! live event set, and the news feed; no other component owns them. It is
//! invoked on a fixed external cadence and never schedules itself.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use market::{MarketClock, MarketClockState, PriceModel, TickContext};
use news::{EventGenerator, MarketEvent, NewsFeed, NewsItem};
use types::{Instrument, Sentiment, Symbol, Timestamp};

use crate::config::SimulationConfig;

// =============================================================================
// MarketEngine
// =============================================================================

/// Orchestrates clock, event generator, and price model over one tick.
pub struct MarketEngine {
    /// Session clock state (open/closed, sentiment lever).
    clock: MarketClock,

    /// The per-instrument price process.
    price_model: PriceModel,

    /// Stochastic event source.
    generator: EventGenerator,

    /// Authoritative instrument collection, keyed by symbol.
    instruments: HashMap<Symbol, Instrument>,

    /// Catalog ordering for stable iteration.
    catalog_order: Vec<Symbol>,

    /// Live (possibly expired-but-unpruned) market events.
    events: Vec<MarketEvent>,

    /// Bounded newest-first news list.
    news: NewsFeed,

    /// Noise source for the price model, separate stream from the
    /// event generator's.
    rng: StdRng,
}

impl MarketEngine {
    /// Build an engine over the given instruments.
    pub fn new(instruments: Vec<Instrument>, config: &SimulationConfig, now: Timestamp) -> Self {
        let catalog_order: Vec<Symbol> = instruments.iter().map(|i| i.symbol.clone()).collect();
        let instruments = instruments
            .into_iter()
            .map(|i| (i.symbol.clone(), i))
            .collect();

        Self {
            clock: MarketClock::new(now),
            price_model: PriceModel::new(config.price.clone()),
            generator: EventGenerator::new(config.events.clone(), config.seed),
            instruments,
            catalog_order,
            events: Vec::new(),
            news: NewsFeed::new(config.max_news_items),
            rng: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// # Phases
    ///
    /// 1. Refresh clock state (open/closed)
    /// 2. Maybe spawn a market event; derive its news item synchronously
    /// 3. Sum active event impacts per symbol, pruning expired events in
    ///    the same pass
    /// 4. Run the price model over every instrument
    pub fn tick(&mut self, now: Timestamp) {
        self.clock.refresh(now);

        if let Some(event) = self.generator.maybe_spawn(now, &self.catalog_order) {
            tracing::info!(
                id = %event.id,
                kind = ?event.kind,
                impact_pct = event.price_impact_pct,
                affected = event.affected_symbols.len(),
                "market event spawned"
            );
            self.news.push(NewsItem::from_event(&event));
            self.events.push(event);
        }

        // Impact pass doubles as the expiry sweep: only active events
        // contribute, and inactive ones are dropped from the live set.
        let mut impacts: HashMap<Symbol, f64> = HashMap::new();
        for event in self.events.iter().filter(|e| e.is_active(now)) {
            for symbol in &event.affected_symbols {
                *impacts.entry(symbol.clone()).or_insert(0.0) += event.impact_fraction();
            }
        }
        self.events.retain(|e| e.is_active(now));

        let market_open = self.clock.is_open();
        let sentiment = self.clock.sentiment();
        for symbol in &self.catalog_order {
            if let Some(instrument) = self.instruments.get_mut(symbol) {
                let ctx = TickContext {
                    now,
                    market_open,
                    sentiment,
                    event_impact: impacts.get(symbol).copied().unwrap_or(0.0),
                };
                self.price_model.advance(instrument, &ctx, &mut self.rng);
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Instruments in catalog order.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.catalog_order
            .iter()
            .filter_map(|s| self.instruments.get(s))
    }

    /// Look up one instrument by symbol.
    pub fn instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    /// The instrument collection keyed by symbol (for valuation lookups).
    pub fn instrument_map(&self) -> &HashMap<Symbol, Instrument> {
        &self.instruments
    }

    /// Snapshot of the instruments, in catalog order (for persistence).
    pub fn instrument_snapshot(&self) -> Vec<Instrument> {
        self.instruments().cloned().collect()
    }

    /// The exposed market clock state.
    pub fn clock_state(&self) -> &MarketClockState {
        self.clock.state()
    }

    /// The news feed, newest first.
    pub fn news(&self) -> &NewsFeed {
        &self.news
    }

    /// Currently live market events.
    pub fn active_events(&self) -> &[MarketEvent] {
        &self.events
    }

    /// Set the global sentiment lever.
    pub fn set_sentiment(&mut self, sentiment: Sentiment) {
        self.clock.set_sentiment(sentiment);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use news::EventGeneratorConfig;
    use types::Price;

    fn quiet_config() -> SimulationConfig {
        SimulationConfig::default()
            .with_events(EventGeneratorConfig::disabled())
            .with_backfill_days(0)
    }

    fn noisy_config() -> SimulationConfig {
        SimulationConfig::default()
            .with_events(EventGeneratorConfig::always())
            .with_backfill_days(0)
    }

    #[test]
    fn test_tick_moves_every_instrument() {
        let mut engine = MarketEngine::new(default_catalog(), &quiet_config(), 0);
        let before: Vec<Price> = engine.instruments().map(|i| i.price).collect();

        engine.tick(5_000);

        let after: Vec<Price> = engine.instruments().map(|i| i.price).collect();
        assert_eq!(before.len(), after.len());
        // A zero-probability coincidence aside, at least one price moved
        assert_ne!(before, after);
    }

    #[test]
    fn test_instruments_keep_catalog_order() {
        let catalog = default_catalog();
        let expected: Vec<Symbol> = catalog.iter().map(|i| i.symbol.clone()).collect();
        let mut engine = MarketEngine::new(catalog, &quiet_config(), 0);
        engine.tick(5_000);

        let actual: Vec<Symbol> = engine.instruments().map(|i| i.symbol.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_price_floor_invariant() {
        let mut engine = MarketEngine::new(default_catalog(), &noisy_config(), 0);
        for i in 1..=500u64 {
            engine.tick(i * 5_000);
            assert!(
                engine.instruments().all(|inst| inst.price >= Price::from_float(0.01)),
                "floor violated at tick {i}"
            );
        }
    }

    #[test]
    fn test_events_spawn_and_expire() {
        let mut engine = MarketEngine::new(default_catalog(), &noisy_config(), 0);

        engine.tick(0);
        assert_eq!(engine.active_events().len(), 1);
        let first = engine.active_events()[0].clone();
        assert!(!engine.news().is_empty());

        // Tick while the event is still active
        engine.tick(60_000);
        assert!(engine.active_events().iter().any(|e| e.id == first.id));

        // Jump past the longest event duration (240 minutes)
        let later = 241 * 60_000;
        engine.tick(later);
        assert!(
            engine.active_events().iter().all(|e| e.id != first.id),
            "expired event must be pruned from the active set"
        );
        // The event spawned this tick is active
        assert!(engine.active_events().iter().all(|e| e.is_active(later)));
    }

    #[test]
    fn test_news_cap() {
        let mut engine = MarketEngine::new(default_catalog(), &noisy_config(), 0);
        for i in 0..200u64 {
            engine.tick(i * 5_000);
        }
        assert_eq!(engine.news().len(), 50);
    }

    #[test]
    fn test_history_cap_over_long_run() {
        let config = SimulationConfig {
            price: market::PriceModelConfig {
                max_history_points: 100,
                ..Default::default()
            },
            ..quiet_config()
        };
        let mut engine = MarketEngine::new(default_catalog(), &config, 0);

        // One tick per simulated minute, well past the cap
        for i in 1..=300u64 {
            engine.tick(i * 60_000);
        }

        assert!(engine.instruments().all(|i| i.price_history.len() <= 100));
        assert!(engine.instruments().all(|i| i.price_history.len() >= 99));
    }

    #[test]
    fn test_sentiment_reaches_clock_state() {
        let mut engine = MarketEngine::new(default_catalog(), &quiet_config(), 0);
        engine.set_sentiment(Sentiment::Bearish);
        assert_eq!(engine.clock_state().sentiment, Sentiment::Bearish);
    }

    #[test]
    fn test_same_seed_same_path() {
        let config = quiet_config().with_seed(123);
        let mut a = MarketEngine::new(default_catalog(), &config, 0);
        let mut b = MarketEngine::new(default_catalog(), &config, 0);

        for i in 1..=50u64 {
            a.tick(i * 5_000);
            b.tick(i * 5_000);
        }

        let pa: Vec<Price> = a.instruments().map(|i| i.price).collect();
        let pb: Vec<Price> = b.instruments().map(|i| i.price).collect();
        assert_eq!(pa, pb);
    }
}
