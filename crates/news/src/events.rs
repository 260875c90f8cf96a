//! Event types for the news system.
//!
//! This module defines:
//! - [`EventKind`]: the fixed set of market-moving event categories, each
//!   with a template controlling its headline, impact range, and duration
//! - [`MarketEvent`]: a time-bounded event targeting a set of symbols

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use types::{EventId, Symbol, Timestamp};

/// Milliseconds per simulated minute (event durations are in minutes).
pub(crate) const MINUTE_MS: u64 = 60_000;

// =============================================================================
// EventKind
// =============================================================================

/// Category of a market-moving event.
///
/// Crash and Regulation templates yield negative impacts; all others are
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Earnings,
    Merger,
    Crash,
    Rally,
    Regulation,
    ProductLaunch,
}

/// Static template for one event kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventTemplate {
    /// Headline shown in the news feed.
    pub title: &'static str,
    /// Body text shown in the news feed.
    pub description: &'static str,
    /// Signed percentage impact range the generator samples from.
    pub impact_range: (f64, f64),
    /// How long the event stays active, in simulated minutes.
    pub duration_minutes: u64,
}

impl EventKind {
    /// All event kinds, for uniform sampling.
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::Earnings,
            EventKind::Merger,
            EventKind::Crash,
            EventKind::Rally,
            EventKind::Regulation,
            EventKind::ProductLaunch,
        ]
    }

    /// The template governing this kind's headline, impact, and duration.
    pub fn template(self) -> EventTemplate {
        match self {
            EventKind::Earnings => EventTemplate {
                title: "Strong Earnings Report",
                description: "Company beats analyst expectations",
                impact_range: (2.0, 7.0),
                duration_minutes: 120,
            },
            EventKind::Merger => EventTemplate {
                title: "Merger Announcement",
                description: "Major acquisition in progress",
                impact_range: (3.0, 11.0),
                duration_minutes: 240,
            },
            EventKind::Crash => EventTemplate {
                title: "Market Correction",
                description: "Sudden price decline",
                impact_range: (-15.0, -5.0),
                duration_minutes: 180,
            },
            EventKind::Rally => EventTemplate {
                title: "Market Rally",
                description: "Strong bullish momentum",
                impact_range: (3.0, 9.0),
                duration_minutes: 150,
            },
            EventKind::Regulation => EventTemplate {
                title: "New Regulation",
                description: "Government policy changes",
                impact_range: (-5.0, -1.0),
                duration_minutes: 200,
            },
            EventKind::ProductLaunch => EventTemplate {
                title: "Product Launch",
                description: "New product announcement",
                impact_range: (2.0, 9.0),
                duration_minutes: 180,
            },
        }
    }
}

// =============================================================================
// MarketEvent
// =============================================================================

/// A time-bounded, symbol-targeted price shock.
///
/// Active from `created_at` for `duration_minutes` simulated minutes; while
/// active, `price_impact_pct` is applied multiplicatively to every affected
/// symbol each tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Event category.
    pub kind: EventKind,
    /// Headline from the kind's template.
    pub title: String,
    /// Body text from the kind's template.
    pub description: String,
    /// When the event was created.
    pub created_at: Timestamp,
    /// Symbols the event applies to. Non-empty, drawn without replacement
    /// from the catalog; at most five entries by construction.
    pub affected_symbols: SmallVec<[Symbol; 5]>,
    /// Signed percentage price impact (e.g., -7.5 = −7.5%).
    pub price_impact_pct: f64,
    /// Active window length in simulated minutes.
    pub duration_minutes: u64,
}

impl MarketEvent {
    /// Timestamp at which the event stops being active.
    pub fn expires_at(&self) -> Timestamp {
        self.created_at + self.duration_minutes * MINUTE_MS
    }

    /// Check if the event is active at the given time.
    pub fn is_active(&self, now: Timestamp) -> bool {
        now < self.expires_at()
    }

    /// Whether the event targets the given symbol.
    pub fn affects(&self, symbol: &str) -> bool {
        self.affected_symbols.iter().any(|s| s == symbol)
    }

    /// Impact as a fraction (−7.5% → −0.075) for multiplicative application.
    pub fn impact_fraction(&self) -> f64 {
        self.price_impact_pct / 100.0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn event(created_at: Timestamp, duration_minutes: u64) -> MarketEvent {
        MarketEvent {
            id: EventId(1),
            kind: EventKind::Earnings,
            title: "Strong Earnings Report".to_string(),
            description: "Company beats analyst expectations".to_string(),
            created_at,
            affected_symbols: smallvec!["AAPL".to_string()],
            price_impact_pct: 4.0,
            duration_minutes,
        }
    }

    #[test]
    fn test_event_is_active() {
        let e = event(100_000, 2); // active for 120,000 ms

        assert!(e.is_active(100_000));
        assert!(e.is_active(219_999));
        assert!(!e.is_active(220_000));
        assert!(!e.is_active(500_000));
    }

    #[test]
    fn test_impact_fraction() {
        let mut e = event(0, 1);
        e.price_impact_pct = -7.5;
        assert!((e.impact_fraction() - (-0.075)).abs() < 1e-12);
    }

    #[test]
    fn test_affects() {
        let e = event(0, 1);
        assert!(e.affects("AAPL"));
        assert!(!e.affects("MSFT"));
    }

    #[test]
    fn test_template_impact_signs() {
        for kind in EventKind::all() {
            let (lo, hi) = kind.template().impact_range;
            assert!(lo < hi, "{:?} range inverted", kind);
            match kind {
                EventKind::Crash | EventKind::Regulation => {
                    assert!(hi < 0.0, "{:?} must be negative", kind)
                }
                _ => assert!(lo > 0.0, "{:?} must be positive", kind),
            }
        }
    }
}
