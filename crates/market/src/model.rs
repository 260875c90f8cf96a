//! Per-instrument random-walk price model.
//!
//! One call to [`PriceModel::advance`] performs a single tick for one
//! instrument: a stochastic return around a small upward drift, scaled by
//! the instrument's volatility tier (damped when the market is closed),
//! shifted by the systemic sentiment offset, adjusted multiplicatively by
//! the summed impact of active events, and clamped to a positive floor.
//! Day-change fields are recomputed from the fixed previous close, and a
//! history point is recorded at most once per simulated minute.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use types::{Instrument, Price, PricePoint, Sentiment, Timestamp, VolatilityTier};

/// Per-tick cumulative volume accretion upper bound.
const TICK_VOLUME_MAX: u64 = 100_000;
/// Volume attributed to a recorded history point.
const POINT_VOLUME_MIN: u64 = 500_000;
const POINT_VOLUME_MAX: u64 = 1_500_000;

// =============================================================================
// PriceModelConfig
// =============================================================================

/// Declarative configuration for the price model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceModelConfig {
    /// Per-tick noise amplitude for low-volatility instruments.
    pub low_volatility: f64,
    /// Per-tick noise amplitude for medium-volatility instruments.
    pub medium_volatility: f64,
    /// Per-tick noise amplitude for high-volatility instruments.
    pub high_volatility: f64,

    /// Volatility multiplier while the market is closed. Closed-market
    /// drift stays visible but muted.
    pub closed_market_damping: f64,

    /// Constant positive per-tick return bias (long-run upward tendency).
    pub drift: f64,

    /// Absolute price offset applied to every instrument when sentiment is
    /// bearish.
    pub bearish_offset: f64,
    /// Absolute price offset applied to every instrument when sentiment is
    /// bullish.
    pub bullish_offset: f64,

    /// Minimum price after every perturbation.
    pub price_floor: Price,

    /// Minimum simulated time between recorded history points.
    pub history_interval_ms: u64,
    /// Maximum history points retained per instrument.
    pub max_history_points: usize,
}

impl Default for PriceModelConfig {
    fn default() -> Self {
        Self {
            low_volatility: 0.002,
            medium_volatility: 0.005,
            high_volatility: 0.01,
            closed_market_damping: 0.3,
            drift: 0.0001,
            bearish_offset: -0.001,
            bullish_offset: 0.001,
            price_floor: Price::from_float(0.01),
            history_interval_ms: 60_000, // one simulated minute
            max_history_points: 1_000,
        }
    }
}

impl PriceModelConfig {
    /// Resolve the base noise amplitude for a volatility tier.
    pub fn volatility_for(&self, tier: VolatilityTier) -> f64 {
        match tier {
            VolatilityTier::Low => self.low_volatility,
            VolatilityTier::Medium => self.medium_volatility,
            VolatilityTier::High => self.high_volatility,
        }
    }

    /// Resolve the systemic price offset for a sentiment value.
    pub fn sentiment_offset(&self, sentiment: Sentiment) -> f64 {
        match sentiment {
            Sentiment::Bearish => self.bearish_offset,
            Sentiment::Neutral => 0.0,
            Sentiment::Bullish => self.bullish_offset,
        }
    }
}

// =============================================================================
// TickContext
// =============================================================================

/// Inputs to one price update, assembled by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    /// Current simulated time.
    pub now: Timestamp,
    /// Whether the market session is open.
    pub market_open: bool,
    /// Global sentiment lever.
    pub sentiment: Sentiment,
    /// Summed fractional impact of active events targeting this symbol
    /// (e.g., two active events of +4% and −1% → 0.03).
    pub event_impact: f64,
}

// =============================================================================
// PriceModel
// =============================================================================

/// The random-walk price process applied to every instrument each tick.
#[derive(Debug, Clone, Default)]
pub struct PriceModel {
    config: PriceModelConfig,
}

impl PriceModel {
    /// Create a model with the given configuration.
    pub fn new(config: PriceModelConfig) -> Self {
        Self { config }
    }

    /// The model's configuration.
    pub fn config(&self) -> &PriceModelConfig {
        &self.config
    }

    /// Advance one instrument by one tick.
    ///
    /// The uniform noise term is sampled independently per instrument per
    /// tick; there is no cross-instrument correlation.
    pub fn advance(&self, instrument: &mut Instrument, ctx: &TickContext, rng: &mut StdRng) {
        let base = self.config.volatility_for(instrument.volatility);
        let volatility = if ctx.market_open {
            base
        } else {
            base * self.config.closed_market_damping
        };

        let shock = rng.random_range(-volatility..=volatility);
        let prior = instrument.price.to_float();
        let floor = self.config.price_floor.to_float();

        // Random walk with drift, plus the systemic sentiment offset
        let walked = (prior + prior * (self.config.drift + shock)
            + self.config.sentiment_offset(ctx.sentiment))
        .max(floor);

        // Active event impact applies multiplicatively on top
        let settled = (walked * (1.0 + ctx.event_impact)).max(floor);
        let new_price = Price::from_float(settled);

        instrument.volume += rng.random_range(0..=TICK_VOLUME_MAX);

        // Record a history point at most once per simulated minute; the live
        // price below updates regardless.
        if ctx.now.saturating_sub(instrument.last_history_at) >= self.config.history_interval_ms {
            let point = PricePoint {
                timestamp: ctx.now,
                open: instrument.price,
                high: instrument.price.max(new_price),
                low: instrument.price.min(new_price),
                close: new_price,
                volume: rng.random_range(POINT_VOLUME_MIN..=POINT_VOLUME_MAX),
            };
            instrument.record_price_point(point, self.config.max_history_points);
        }

        instrument.price = new_price;
        instrument.day_change = new_price - instrument.previous_close;
        instrument.day_change_percent = if instrument.previous_close.is_positive() {
            instrument.day_change.to_float() / instrument.previous_close.to_float() * 100.0
        } else {
            0.0
        };
    }
}

// =============================================================================
// Tests
// =============================================================================
