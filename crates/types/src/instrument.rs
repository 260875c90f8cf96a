//! Instrument model: tradable synthetic stocks and their price history.

use crate::ids::{Symbol, Timestamp};
use crate::money::{Cash, Price};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// =============================================================================
// Classification Enums
// =============================================================================

/// Industry sector an instrument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    Technology,
    Healthcare,
    Finance,
    Energy,
    ConsumerGoods,
    Industrial,
    Communications,
    RealEstate,
}

impl Sector {
    /// All sectors, in catalog display order.
    pub fn all() -> &'static [Sector] {
        &[
            Sector::Technology,
            Sector::Healthcare,
            Sector::Finance,
            Sector::Energy,
            Sector::ConsumerGoods,
            Sector::Industrial,
            Sector::Communications,
            Sector::RealEstate,
        ]
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sector::Technology => "Technology",
            Sector::Healthcare => "Healthcare",
            Sector::Finance => "Finance",
            Sector::Energy => "Energy",
            Sector::ConsumerGoods => "Consumer Goods",
            Sector::Industrial => "Industrial",
            Sector::Communications => "Communications",
            Sector::RealEstate => "Real Estate",
        };
        write!(f, "{}", name)
    }
}

/// Coarse classification controlling the magnitude of per-tick price noise.
///
/// The actual volatility coefficients live in the price model configuration;
/// the tier itself is just a label on the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for VolatilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolatilityTier::Low => write!(f, "low"),
            VolatilityTier::Medium => write!(f, "medium"),
            VolatilityTier::High => write!(f, "high"),
        }
    }
}

/// Global market mood applied uniformly to all instruments' drift.
///
/// Sentiment is an external lever (set by the presentation layer), never
/// self-adjusting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sentiment {
    Bearish,
    #[default]
    Neutral,
    Bullish,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Bearish => write!(f, "bearish"),
            Sentiment::Neutral => write!(f, "neutral"),
            Sentiment::Bullish => write!(f, "bullish"),
        }
    }
}

// =============================================================================
// PricePoint
// =============================================================================

/// Immutable OHLCV snapshot recorded in an instrument's rolling history.
///
/// Points are appended at most once per simulated minute; the live price
/// updates every tick without touching the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Wall clock timestamp of the snapshot.
    pub timestamp: Timestamp,
    /// Price at the start of the recorded interval.
    pub open: Price,
    /// Highest price during the interval.
    pub high: Price,
    /// Lowest price during the interval.
    pub low: Price,
    /// Price at the end of the interval.
    pub close: Price,
    /// Traded volume attributed to the interval.
    pub volume: u64,
}

// =============================================================================
// Instrument
// =============================================================================

/// A tradable synthetic stock with a price process.
///
/// Instruments are created once from the seed catalog, mutated once per tick
/// by the price model, and never deleted during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Ticker symbol (unique key).
    pub symbol: Symbol,
    /// Display name.
    pub name: String,
    /// Short blurb for display.
    pub description: String,
    /// Industry sector.
    pub sector: Sector,
    /// Noise magnitude classification.
    pub volatility: VolatilityTier,
    /// Current live price. Always positive (floor-clamped by the model).
    pub price: Price,
    /// Close of the previous session. Fixed at session start; the seed
    /// catalog guarantees it is positive.
    pub previous_close: Price,
    /// `price - previous_close`, recomputed every tick.
    pub day_change: Price,
    /// Day change as a percentage of the previous close.
    pub day_change_percent: f64,
    /// Cumulative traded volume.
    pub volume: u64,
    /// Market capitalization (display only).
    pub market_cap: Cash,
    /// Rolling OHLCV history, oldest first, bounded.
    pub price_history: VecDeque<PricePoint>,
    /// When the last history point was recorded (throttle reference).
    pub last_history_at: Timestamp,
}

impl Instrument {
    /// Create an instrument from catalog seed data.
    ///
    /// Day-change fields start at the seed's implied change and history
    /// starts empty; callers may backfill history afterwards.
    #[allow(clippy::too_many_arguments)]
    pub fn seeded(
        symbol: impl Into<Symbol>,
        name: impl Into<String>,
        sector: Sector,
        volatility: VolatilityTier,
        price: Price,
        previous_close: Price,
        volume: u64,
        market_cap: Cash,
        description: impl Into<String>,
    ) -> Self {
        let day_change = price - previous_close;
        let day_change_percent = if previous_close.is_positive() {
            day_change.to_float() / previous_close.to_float() * 100.0
        } else {
            0.0
        };
        Self {
            symbol: symbol.into(),
            name: name.into(),
            description: description.into(),
            sector,
            volatility,
            price,
            previous_close,
            day_change,
            day_change_percent,
            volume,
            market_cap,
            price_history: VecDeque::new(),
            last_history_at: 0,
        }
    }

    /// Append a history point, evicting the oldest beyond `max_points`.
    ///
    /// Updates the throttle reference to the point's timestamp.
    pub fn record_price_point(&mut self, point: PricePoint, max_points: usize) {
        self.last_history_at = point.timestamp;
        self.price_history.push_back(point);
        while self.price_history.len() > max_points {
            self.price_history.pop_front();
        }
    }

    /// The most recent history point, if any.
    pub fn latest_point(&self) -> Option<&PricePoint> {
        self.price_history.back()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn instrument() -> Instrument {
        Instrument::seeded(
            "TEST",
            "Test Corp",
            Sector::Technology,
            VolatilityTier::Medium,
            Price::from_float(105.0),
            Price::from_float(100.0),
            1_000_000,
            Cash::from_float(1e9),
            "A test instrument",
        )
    }

    fn point(ts: Timestamp, close: f64) -> PricePoint {
        let p = Price::from_float(close);
        PricePoint {
            timestamp: ts,
            open: p,
            high: p,
            low: p,
            close: p,
            volume: 1_000,
        }
    }

    #[test]
    fn test_seeded_day_change() {
        let inst = instrument();
        assert_eq!(inst.day_change, Price::from_float(5.0));
        assert!((inst.day_change_percent - 5.0).abs() < 1e-10);
        assert!(inst.price_history.is_empty());
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let mut inst = instrument();
        for i in 0..10 {
            inst.record_price_point(point(i * 60_000, 100.0 + i as f64), 5);
        }

        assert_eq!(inst.price_history.len(), 5);
        // Oldest surviving point is the 6th recorded one
        assert_eq!(inst.price_history.front().map(|p| p.timestamp), Some(5 * 60_000));
        assert_eq!(inst.last_history_at, 9 * 60_000);
    }

    #[test]
    fn test_latest_point() {
        let mut inst = instrument();
        assert!(inst.latest_point().is_none());
        inst.record_price_point(point(60_000, 101.0), 1000);
        assert_eq!(inst.latest_point().map(|p| p.timestamp), Some(60_000));
    }
}
