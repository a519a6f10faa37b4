use serde_json::Value;

use crate::fallback::{Fetched, with_fallback};
use crate::sources::{DataType, SignalQuery, SignalStore};
use crate::types::{InjuryImpact, round1};

/// Severity at or above this marks a key absence (1-4 scale from the
/// injury scrapers; 2 is assumed when a row carries none).
const KEY_SEVERITY: i64 = 3;
const DEFAULT_SEVERITY: i64 = 2;
const IMPACT_PER_SEVERITY: f64 = 0.7;
const MAX_IMPACT: f64 = 10.0;
const MAX_POSITIONS: usize = 5;

/// Current injury burden for one team from the most recent usable
/// injuries row in the signal store.
pub fn fetch(store: &dyn SignalStore, team_id: u32) -> Fetched<InjuryImpact> {
    with_fallback("injuries", InjuryImpact::defaults(), || {
        let rows = store.scraped_data(&SignalQuery::for_team(DataType::Injuries, team_id))?;
        let Some(record) = rows.iter().find(|r| r.is_usable()) else {
            return Ok(None);
        };
        Ok(Some((parse_impact(&record.data), record.source.clone())))
    })
}

fn parse_impact(data: &Value) -> InjuryImpact {
    let players = data
        .get("players")
        .and_then(|p| p.as_array())
        .map(|a| a.as_slice())
        .unwrap_or(&[]);

    let mut key_players_out = 0u8;
    let mut severity_sum = 0i64;
    let mut positions: Vec<String> = Vec::new();

    for player in players {
        let severity = player
            .get("severity")
            .and_then(|s| s.as_i64())
            .unwrap_or(DEFAULT_SEVERITY);
        severity_sum += severity;
        if severity >= KEY_SEVERITY {
            key_players_out = key_players_out.saturating_add(1);
        }
        if positions.len() < MAX_POSITIONS
            && let Some(pos) = player.get("position").and_then(|p| p.as_str())
            && !pos.trim().is_empty()
            && !positions.iter().any(|existing| existing == pos)
        {
            positions.push(pos.to_string());
        }
    }

    InjuryImpact {
        key_players_out,
        impact_score: round1((severity_sum as f64 * IMPACT_PER_SEVERITY).min(MAX_IMPACT)),
        affected_positions: positions,
    }
}
