use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::fallback::{Fetched, with_fallback};
use crate::sources::{DataType, SignalQuery, SignalStore};
use crate::types::{WeatherMetrics, round2};

const HEAVY_RAIN_MM: f64 = 1.0;
const STRONG_WIND_KMH: f64 = 20.0;
const COLD_C: f64 = 0.0;
const HOT_C: f64 = 30.0;
const MODIFIER_MIN: f64 = 0.8;
const MODIFIER_MAX: f64 = 1.05;

/// Forecast conditions for a fixture. Every field is independently
/// nullable: a forecast with no wind reading is still a forecast.
pub fn fetch(store: &dyn SignalStore, fixture_id: u32) -> Fetched<Option<WeatherMetrics>> {
    with_fallback("weather", None, || {
        let rows = store.scraped_data(&SignalQuery::for_fixture(DataType::Weather, fixture_id))?;
        let Some(record) = rows.iter().find(|r| r.is_usable()) else {
            return Ok(None);
        };
        Ok(Some((Some(parse_weather(&record.data)), record.source.clone())))
    })
}

fn parse_weather(data: &Value) -> WeatherMetrics {
    let temperature_c = field(data, "temperature_c");
    let wind_speed_kmh = field(data, "wind_speed_kmh");
    let humidity_pct = field(data, "humidity_pct");
    let precipitation_mm = field(data, "precipitation_mm");

    WeatherMetrics {
        temperature_c,
        wind_speed_kmh,
        humidity_pct,
        precipitation_mm,
        condition: data
            .get("condition")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        xg_modifier: xg_modifier(temperature_c, wind_speed_kmh, precipitation_mm),
        forecast_at: data
            .get("forecast_at")
            .and_then(|v| v.as_str())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|t| t.with_timezone(&Utc)),
    }
}

/// Scoring suppression from adverse conditions. None when no driver field
/// is present; "no modifier" and "modifier of 1.0" are different states.
fn xg_modifier(temp: Option<f64>, wind: Option<f64>, rain: Option<f64>) -> Option<f64> {
    if temp.is_none() && wind.is_none() && rain.is_none() {
        return None;
    }

    let mut modifier: f64 = 1.0;
    if rain.is_some_and(|mm| mm > HEAVY_RAIN_MM) {
        modifier -= 0.07;
    }
    if wind.is_some_and(|kmh| kmh > STRONG_WIND_KMH) {
        modifier -= 0.05;
    }
    if temp.is_some_and(|c| c < COLD_C || c > HOT_C) {
        modifier -= 0.03;
    }
    Some(round2(modifier.clamp(MODIFIER_MIN, MODIFIER_MAX)))
}

fn field(data: &Value, key: &str) -> Option<f64> {
    data.get(key).and_then(|v| v.as_f64())
}
