//! The static instrument seed catalog and initial history backfill.
//!
//! 53 instruments across 8 sectors. The engine tolerates any catalog whose
//! entries satisfy the instrument invariants (positive price and previous
//! close, unique symbols); this one exists so a session works out of the box.

use rand::Rng;
use rand::rngs::StdRng;
use types::{Cash, Instrument, Price, PricePoint, Sector, Timestamp, VolatilityTier};

use types::Sector::*;
use types::VolatilityTier::{High, Low, Medium};

const DAY_MS: u64 = 24 * 60 * 60 * 1_000;

#[allow(clippy::too_many_arguments)]
fn stock(
    symbol: &str,
    name: &str,
    price: f64,
    previous_close: f64,
    volume: u64,
    market_cap: f64,
    sector: Sector,
    volatility: VolatilityTier,
    description: &str,
) -> Instrument {
    Instrument::seeded(
        symbol,
        name,
        sector,
        volatility,
        Price::from_float(price),
        Price::from_float(previous_close),
        volume,
        Cash::from_float(market_cap),
        description,
    )
}

/// The built-in seed catalog.
#[rustfmt::skip]
pub fn default_catalog() -> Vec<Instrument> {
    vec![
        // Technology
        stock("AAPL", "Apple Inc.", 178.50, 175.30, 52_000_000, 2.80e12, Technology, Medium, "Consumer electronics and software giant"),
        stock("MSFT", "Microsoft Corporation", 378.25, 375.80, 28_000_000, 2.81e12, Technology, Medium, "Software, cloud computing, and AI leader"),
        stock("GOOGL", "Alphabet Inc.", 142.15, 140.90, 24_000_000, 1.78e12, Technology, Medium, "Search engine and digital advertising leader"),
        stock("AMZN", "Amazon.com Inc.", 178.35, 176.20, 48_000_000, 1.84e12, Technology, High, "E-commerce and cloud computing giant"),
        stock("META", "Meta Platforms Inc.", 488.75, 485.20, 16_000_000, 1.24e12, Technology, High, "Social media and virtual reality company"),
        stock("NVDA", "NVIDIA Corporation", 875.28, 868.50, 42_000_000, 2.16e12, Technology, High, "Graphics processing and AI chip manufacturer"),
        stock("TSLA", "Tesla Inc.", 242.84, 238.45, 95_000_000, 7.70e11, Technology, High, "Electric vehicles and clean energy"),
        stock("NFLX", "Netflix Inc.", 485.30, 482.15, 8_500_000, 2.10e11, Technology, High, "Streaming entertainment service"),
        stock("INTC", "Intel Corporation", 43.25, 42.80, 38_000_000, 1.80e11, Technology, Medium, "Semiconductor chip manufacturer"),
        stock("AMD", "Advanced Micro Devices", 168.45, 165.90, 52_000_000, 2.72e11, Technology, High, "Semiconductor and processor company"),
        stock("ORCL", "Oracle Corporation", 118.50, 117.25, 12_000_000, 3.25e11, Technology, Low, "Enterprise software and cloud solutions"),
        stock("ADBE", "Adobe Inc.", 562.75, 558.40, 3_200_000, 2.58e11, Technology, Medium, "Creative and marketing software"),
        stock("CRM", "Salesforce Inc.", 285.60, 282.90, 6_800_000, 2.78e11, Technology, Medium, "Cloud-based CRM software"),
        stock("CSCO", "Cisco Systems", 52.35, 51.90, 18_000_000, 2.12e11, Technology, Low, "Networking hardware and software"),

        // Healthcare
        stock("JNJ", "Johnson & Johnson", 156.80, 156.20, 8_500_000, 3.85e11, Healthcare, Low, "Pharmaceutical and consumer health products"),
        stock("UNH", "UnitedHealth Group", 524.30, 521.85, 3_200_000, 4.90e11, Healthcare, Low, "Health insurance and care services"),
        stock("PFE", "Pfizer Inc.", 28.45, 28.15, 42_000_000, 1.60e11, Healthcare, Medium, "Pharmaceutical manufacturer"),
        stock("ABBV", "AbbVie Inc.", 172.90, 171.50, 6_500_000, 3.05e11, Healthcare, Low, "Biopharmaceutical company"),
        stock("TMO", "Thermo Fisher Scientific", 548.25, 545.60, 1_800_000, 2.14e11, Healthcare, Low, "Life sciences and laboratory equipment"),
        stock("MRNA", "Moderna Inc.", 95.60, 92.80, 12_000_000, 3.70e10, Healthcare, High, "Biotechnology and mRNA therapeutics"),
        stock("LLY", "Eli Lilly and Company", 785.40, 778.90, 3_500_000, 7.45e11, Healthcare, Medium, "Pharmaceutical research and development"),

        // Finance
        stock("JPM", "JPMorgan Chase & Co.", 185.75, 184.30, 12_000_000, 5.40e11, Finance, Medium, "Banking and financial services"),
        stock("BAC", "Bank of America Corp", 38.45, 38.10, 48_000_000, 3.05e11, Finance, Medium, "Banking and financial services"),
        stock("WFC", "Wells Fargo & Company", 56.80, 56.25, 22_000_000, 2.05e11, Finance, Medium, "Banking and financial services"),
        stock("GS", "Goldman Sachs Group", 458.30, 455.60, 3_200_000, 1.55e11, Finance, Medium, "Investment banking and securities"),
        stock("MS", "Morgan Stanley", 102.45, 101.80, 8_500_000, 1.72e11, Finance, Medium, "Investment banking and wealth management"),
        stock("V", "Visa Inc.", 278.90, 276.50, 7_200_000, 5.78e11, Finance, Low, "Payment processing technology"),
        stock("MA", "Mastercard Inc.", 462.35, 459.80, 3_800_000, 4.38e11, Finance, Low, "Payment processing technology"),
        stock("PYPL", "PayPal Holdings", 78.25, 77.40, 14_000_000, 8.20e10, Finance, High, "Digital payments platform"),

        // Energy
        stock("XOM", "Exxon Mobil Corporation", 112.45, 111.30, 18_000_000, 4.65e11, Energy, Medium, "Oil and gas exploration and production"),
        stock("CVX", "Chevron Corporation", 158.70, 157.25, 9_500_000, 2.95e11, Energy, Medium, "Oil and gas multinational"),
        stock("COP", "ConocoPhillips", 124.35, 123.10, 7_800_000, 1.55e11, Energy, Medium, "Exploration and production company"),
        stock("SLB", "Schlumberger Limited", 52.80, 52.15, 12_000_000, 7.40e10, Energy, Medium, "Oilfield services company"),
        stock("NEE", "NextEra Energy", 78.45, 77.90, 8_200_000, 1.57e11, Energy, Low, "Electric power and renewable energy"),

        // Consumer Goods
        stock("WMT", "Walmart Inc.", 72.85, 72.30, 9_500_000, 5.90e11, ConsumerGoods, Low, "Retail corporation"),
        stock("PG", "Procter & Gamble", 165.40, 164.75, 6_800_000, 3.95e11, ConsumerGoods, Low, "Consumer goods corporation"),
        stock("KO", "The Coca-Cola Company", 61.25, 60.85, 14_000_000, 2.64e11, ConsumerGoods, Low, "Beverage manufacturer"),
        stock("PEP", "PepsiCo Inc.", 172.90, 172.15, 5_200_000, 2.38e11, ConsumerGoods, Low, "Food and beverage corporation"),
        stock("COST", "Costco Wholesale", 865.50, 860.25, 2_100_000, 3.84e11, ConsumerGoods, Low, "Membership warehouse club"),
        stock("NKE", "Nike Inc.", 108.75, 107.50, 8_500_000, 1.68e11, ConsumerGoods, Medium, "Athletic footwear and apparel"),
        stock("MCD", "McDonald's Corporation", 292.40, 290.85, 3_200_000, 2.12e11, ConsumerGoods, Low, "Fast food restaurant chain"),
        stock("SBUX", "Starbucks Corporation", 98.65, 97.90, 7_800_000, 1.13e11, ConsumerGoods, Medium, "Coffeehouse chain"),

        // Industrial
        stock("BA", "Boeing Company", 178.45, 176.80, 8_500_000, 1.09e11, Industrial, High, "Aerospace manufacturer"),
        stock("CAT", "Caterpillar Inc.", 328.75, 326.40, 3_200_000, 1.72e11, Industrial, Medium, "Construction and mining equipment"),
        stock("GE", "General Electric", 168.90, 167.25, 5_800_000, 1.85e11, Industrial, Medium, "Industrial conglomerate"),
        stock("MMM", "3M Company", 102.35, 101.70, 4_200_000, 5.70e10, Industrial, Low, "Diversified technology company"),
        stock("HON", "Honeywell International", 208.45, 206.90, 3_100_000, 1.39e11, Industrial, Low, "Industrial conglomerate"),

        // Communications
        stock("T", "AT&T Inc.", 21.85, 21.65, 32_000_000, 1.56e11, Communications, Low, "Telecommunications company"),
        stock("VZ", "Verizon Communications", 42.30, 42.05, 18_000_000, 1.77e11, Communications, Low, "Telecommunications conglomerate"),
        stock("DIS", "Walt Disney Company", 112.45, 111.30, 12_000_000, 2.05e11, Communications, Medium, "Entertainment and media conglomerate"),
        stock("CMCSA", "Comcast Corporation", 44.75, 44.35, 16_000_000, 1.82e11, Communications, Low, "Telecommunications conglomerate"),

        // Real Estate
        stock("AMT", "American Tower Corp", 218.50, 217.25, 2_100_000, 1.01e11, RealEstate, Low, "Real estate investment trust"),
        stock("PLD", "Prologis Inc.", 132.75, 131.90, 3_400_000, 1.20e11, RealEstate, Low, "Logistics real estate"),
    ]
}

// =============================================================================
// History Backfill
// =============================================================================

/// Synthesize `days` of daily OHLCV history ending at `now`.
///
/// A bounded random walk from ~20% below the current price with a slight
/// upward bias, using a per-tier daily volatility. The instrument's live
/// price is untouched; only the history buffer is populated.
pub fn backfill_history(
    instrument: &mut Instrument,
    days: u32,
    now: Timestamp,
    max_points: usize,
    rng: &mut StdRng,
) {
    if days == 0 {
        return;
    }

    let daily_volatility = match instrument.volatility {
        VolatilityTier::Low => 0.01,
        VolatilityTier::Medium => 0.02,
        VolatilityTier::High => 0.04,
    };

    // Start a year (or `days`) back, 20% below today's price
    let mut price = instrument.price.to_float() * 0.8;

    for i in (0..=days).rev() {
        let timestamp = now.saturating_sub(i as u64 * DAY_MS);

        let open = price * (1.0 + (rng.random_range(0.0..1.0) - 0.5) * daily_volatility * 0.5);
        // Slight upward bias: the walk recovers toward today's price
        let change = (rng.random_range(0.0..1.0) - 0.48) * daily_volatility;
        let close = open * (1.0 + change);
        let high = open.max(close) * (1.0 + rng.random_range(0.0..1.0) * daily_volatility * 0.5);
        let low = open.min(close) * (1.0 - rng.random_range(0.0..1.0) * daily_volatility * 0.5);
        let volume = rng.random_range(10_000_000..=60_000_000);

        instrument.record_price_point(
            PricePoint {
                timestamp,
                open: Price::from_float(open),
                high: Price::from_float(high),
                low: Price::from_float(low),
                close: Price::from_float(close),
                volume,
            },
            max_points,
        );

        price = close;
    }
}

// =============================================================================
// Tests
// =============================================================================
