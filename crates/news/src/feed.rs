//! Display-oriented news items and the bounded news feed.

use crate::events::MarketEvent;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use types::{EventId, Symbol, Timestamp};

/// Default maximum number of retained news items.
pub const DEFAULT_MAX_ITEMS: usize = 50;

// =============================================================================
// Severity & ImpactDirection
// =============================================================================

/// How significant a news item is, derived from the event's impact magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Derive the tier from a signed percentage impact.
    ///
    /// |impact| > 5 → High, > 2 → Medium, else Low.
    pub fn from_impact_pct(impact_pct: f64) -> Self {
        let magnitude = impact_pct.abs();
        if magnitude > 5.0 {
            Severity::High
        } else if magnitude > 2.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Display tag for the direction of a news item's price impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactDirection {
    Positive,
    Negative,
    Neutral,
}

impl ImpactDirection {
    /// Derive the tag from a signed percentage impact.
    pub fn from_impact_pct(impact_pct: f64) -> Self {
        if impact_pct > 0.0 {
            ImpactDirection::Positive
        } else if impact_pct < 0.0 {
            ImpactDirection::Negative
        } else {
            ImpactDirection::Neutral
        }
    }
}

// =============================================================================
// NewsItem
// =============================================================================

/// A display projection of a [`MarketEvent`].
///
/// Derived synchronously when the event spawns; shares the event's id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Identifier shared with the originating event.
    pub id: EventId,
    /// Headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// When the originating event was created.
    pub timestamp: Timestamp,
    /// Symbols the originating event targets.
    pub affected_symbols: SmallVec<[Symbol; 5]>,
    /// Direction tag for display.
    pub impact: ImpactDirection,
    /// Severity tier for display.
    pub severity: Severity,
}

impl NewsItem {
    /// Project a market event into its news item.
    pub fn from_event(event: &MarketEvent) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            content: event.description.clone(),
            timestamp: event.created_at,
            affected_symbols: event.affected_symbols.clone(),
            impact: ImpactDirection::from_impact_pct(event.price_impact_pct),
            severity: Severity::from_impact_pct(event.price_impact_pct),
        }
    }
}

// =============================================================================
// NewsFeed
// =============================================================================

/// Bounded most-recent-first list of news items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsFeed {
    items: VecDeque<NewsItem>,
    max_items: usize,
}

impl NewsFeed {
    /// Create an empty feed with the given retention cap.
    pub fn new(max_items: usize) -> Self {
        Self {
            items: VecDeque::new(),
            max_items,
        }
    }

    /// Prepend an item, trimming the oldest beyond the cap.
    pub fn push(&mut self, item: NewsItem) {
        self.items.push_front(item);
        self.items.truncate(self.max_items);
    }

    /// Items, newest first.
    pub fn items(&self) -> impl Iterator<Item = &NewsItem> {
        self.items.iter()
    }

    /// Number of retained items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the feed is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for NewsFeed {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITEMS)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use smallvec::smallvec;

    fn item(id: u64, impact_pct: f64) -> NewsItem {
        NewsItem::from_event(&MarketEvent {
            id: EventId(id),
            kind: EventKind::Rally,
            title: "Market Rally".to_string(),
            description: "Strong bullish momentum".to_string(),
            created_at: id * 1_000,
            affected_symbols: smallvec!["AAA".to_string()],
            price_impact_pct: impact_pct,
            duration_minutes: 150,
        })
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(Severity::from_impact_pct(6.0), Severity::High);
        assert_eq!(Severity::from_impact_pct(-5.5), Severity::High);
        assert_eq!(Severity::from_impact_pct(3.0), Severity::Medium);
        assert_eq!(Severity::from_impact_pct(-2.1), Severity::Medium);
        assert_eq!(Severity::from_impact_pct(2.0), Severity::Low);
        assert_eq!(Severity::from_impact_pct(-0.5), Severity::Low);
    }

    #[test]
    fn test_impact_direction() {
        assert_eq!(ImpactDirection::from_impact_pct(4.0), ImpactDirection::Positive);
        assert_eq!(ImpactDirection::from_impact_pct(-4.0), ImpactDirection::Negative);
        assert_eq!(ImpactDirection::from_impact_pct(0.0), ImpactDirection::Neutral);
    }

    #[test]
    fn test_feed_newest_first() {
        let mut feed = NewsFeed::new(10);
        feed.push(item(1, 3.0));
        feed.push(item(2, 3.0));

        let ids: Vec<u64> = feed.items().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_feed_cap() {
        let mut feed = NewsFeed::new(50);
        for i in 0..120 {
            feed.push(item(i, 3.0));
        }

        assert_eq!(feed.len(), 50);
        // Newest retained item is the last pushed
        assert_eq!(feed.items().next().map(|i| i.id.0), Some(119));
    }
}
