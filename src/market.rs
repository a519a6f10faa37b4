use serde_json::Value;

use crate::fallback::{Fetched, with_fallback};
use crate::sources::{DataType, SignalQuery, SignalStore};
use crate::types::{MarketMetrics, MarketSentiment, OddsTriple, round3};

/// Home/away drift gaps inside this band read as no clear market lean.
const SENTIMENT_DEAD_BAND: f64 = 0.01;

/// Betting-market snapshot for a fixture: opening and current 1X2 odds,
/// per-outcome drift, and which side the market has moved toward. Absent
/// odds are a normal state for minor fixtures, hence the `Option`.
pub fn fetch(store: &dyn SignalStore, fixture_id: u32) -> Fetched<Option<MarketMetrics>> {
    with_fallback("market_odds", None, || {
        let rows = store.scraped_data(&SignalQuery::for_fixture(DataType::Odds, fixture_id))?;
        let Some(record) = rows.iter().find(|r| r.is_usable()) else {
            return Ok(None);
        };
        Ok(parse_market(&record.data).map(|m| (Some(m), record.source.clone())))
    })
}

fn parse_market(data: &Value) -> Option<MarketMetrics> {
    let opening = OddsTriple {
        home: field(data, "home_open")?,
        draw: field(data, "draw_open")?,
        away: field(data, "away_open")?,
    };
    let current = OddsTriple {
        home: field(data, "home_current")?,
        draw: field(data, "draw_current")?,
        away: field(data, "away_current")?,
    };

    let drift = OddsTriple {
        home: round3(current.home - opening.home),
        draw: round3(current.draw - opening.draw),
        away: round3(current.away - opening.away),
    };
    let drift_velocity =
        round3((drift.home.abs() + drift.draw.abs() + drift.away.abs()) / 3.0);

    Some(MarketMetrics {
        opening,
        current,
        drift,
        drift_velocity,
        sentiment: classify_sentiment(drift.home, drift.away),
    })
}

/// Shortening odds mean the market backs that outcome; the side whose odds
/// shortened more wins the sentiment call.
fn classify_sentiment(home_drift: f64, away_drift: f64) -> MarketSentiment {
    let gap = home_drift - away_drift;
    if gap < -SENTIMENT_DEAD_BAND {
        MarketSentiment::Home
    } else if gap > SENTIMENT_DEAD_BAND {
        MarketSentiment::Away
    } else {
        MarketSentiment::Neutral
    }
}

fn field(data: &Value, key: &str) -> Option<f64> {
    data.get(key).and_then(|v| v.as_f64())
}
