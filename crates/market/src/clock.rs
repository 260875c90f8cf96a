//! Time sources and market session tracking.
//!
//! The simulation never reads the system clock directly: components take a
//! [`Clock`] so tests can drive time with [`ManualClock`]. Session hours are
//! evaluated against local time: weekdays, 09:30 to 16:00, with no holiday
//! calendar and no timezone configuration.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use types::{Sentiment, Timestamp};

/// Session opens at 09:30 local time.
const OPEN_MINUTES: u32 = 9 * 60 + 30;
/// Session closes at 16:00 local time (exclusive).
const CLOSE_MINUTES: u32 = 16 * 60;

// =============================================================================
// Clock Sources
// =============================================================================

/// An injectable source of wall-clock time in milliseconds since epoch.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> Timestamp;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or_default()
    }
}

/// A settable clock for tests.
///
/// Clones share the same underlying instant, so a test can keep a handle
/// while the session owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock frozen at the given instant.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move forward by the given number of milliseconds.
    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Session Hours
// =============================================================================

fn local_datetime(ts: Timestamp) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ts as i64).earliest()
}

/// Whether the market session is open at the given instant.
///
/// Open iff the local day is Monday–Friday and the local time falls in
/// [09:30, 16:00). Instants that cannot be resolved to a local time read
/// as closed.
pub fn is_session_open(ts: Timestamp) -> bool {
    let Some(dt) = local_datetime(ts) else {
        return false;
    };

    if matches!(dt.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let minutes = dt.hour() * 60 + dt.minute();
    (OPEN_MINUTES..CLOSE_MINUTES).contains(&minutes)
}

/// The 09:30 open and 16:00 close of the calendar day containing `ts`.
pub fn session_bounds(ts: Timestamp) -> (Timestamp, Timestamp) {
    let Some(dt) = local_datetime(ts) else {
        return (ts, ts);
    };

    let date = dt.date_naive();
    let to_millis = |hour, minute| {
        date.and_hms_opt(hour, minute, 0)
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .map(|local| local.timestamp_millis() as Timestamp)
            .unwrap_or(ts)
    };

    (to_millis(9, 30), to_millis(16, 0))
}

// =============================================================================
// MarketClock
// =============================================================================

/// Snapshot of the market clock, exposed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketClockState {
    /// Whether the session is currently open.
    pub is_open: bool,
    /// Current simulated time.
    pub current_time: Timestamp,
    /// Session open of the day the clock was initialized on.
    pub session_open: Timestamp,
    /// Session close of the day the clock was initialized on.
    pub session_close: Timestamp,
    /// When the clock last refreshed.
    pub last_update: Timestamp,
    /// Global market sentiment (externally set).
    pub sentiment: Sentiment,
}

/// Tracks open/closed state from wall-clock time.
///
/// Session open/close timestamps are computed once at construction for the
/// current calendar day and are not re-derived on refresh.
#[derive(Debug, Clone)]
pub struct MarketClock {
    state: MarketClockState,
}

impl MarketClock {
    /// Initialize the clock at the given instant.
    pub fn new(now: Timestamp) -> Self {
        let (session_open, session_close) = session_bounds(now);
        Self {
            state: MarketClockState {
                is_open: is_session_open(now),
                current_time: now,
                session_open,
                session_close,
                last_update: now,
                sentiment: Sentiment::default(),
            },
        }
    }

    /// Advance the clock to a new instant, re-evaluating open/closed state.
    pub fn refresh(&mut self, now: Timestamp) {
        self.state.is_open = is_session_open(now);
        self.state.current_time = now;
        self.state.last_update = now;
    }

    /// Set the global sentiment lever.
    pub fn set_sentiment(&mut self, sentiment: Sentiment) {
        self.state.sentiment = sentiment;
    }

    /// Current sentiment.
    pub fn sentiment(&self) -> Sentiment {
        self.state.sentiment
    }

    /// Whether the session is currently open.
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// The full exposed state.
    pub fn state(&self) -> &MarketClockState {
        &self.state
    }
}

// =============================================================================
// Tests
// =============================================================================
