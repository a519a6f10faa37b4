use std::collections::HashMap;
use std::hint::black_box;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;

use xg_engine::extract::FeatureExtractor;
use xg_engine::form::compute_form;
use xg_engine::sources::{
    DataType, Fixture, FixtureLookup, ScrapedRecord, SignalQuery, SignalStore, TeamResult,
    team_results,
};
use xg_engine::types::{SideStats, Team};
use xg_engine::xg;

struct BenchLookup {
    fixtures: Vec<Fixture>,
    teams: HashMap<u32, Team>,
}

impl FixtureLookup for BenchLookup {
    fn fixture(&self, id: u32) -> Result<Option<Fixture>> {
        Ok(self.fixtures.iter().find(|f| f.id == id).copied())
    }

    fn team(&self, id: u32) -> Result<Option<Team>> {
        Ok(self.teams.get(&id).cloned())
    }

    fn fixtures(&self) -> Result<Vec<Fixture>> {
        Ok(self.fixtures.clone())
    }
}

struct BenchStore {
    rows: Vec<ScrapedRecord>,
}

impl SignalStore for BenchStore {
    fn scraped_data(&self, query: &SignalQuery) -> Result<Vec<ScrapedRecord>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.data_type == query.data_type)
            .filter(|r| query.team_id.is_none() || r.team_id == query.team_id)
            .filter(|r| query.fixture_id.is_none() || r.fixture_id == query.fixture_id)
            .cloned()
            .collect())
    }
}

/// A season's worth of fixtures across twenty teams plus one upcoming match.
fn sample_fixtures() -> Vec<Fixture> {
    let mut fixtures = Vec::new();
    let mut id = 1u32;
    for round in 0..19u32 {
        for pair in 0..10u32 {
            let home = (round + pair) % 20 + 1;
            let away = (round + pair + 10) % 20 + 1;
            fixtures.push(Fixture {
                id,
                league_id: 47,
                utc_time: Utc
                    .with_ymd_and_hms(2025, 8 + round / 5, round % 28 + 1, 15, 0, 0)
                    .unwrap(),
                home_id: home,
                away_id: away,
                home_goals: Some(((id * 7) % 4) as u8),
                away_goals: Some(((id * 5) % 3) as u8),
                finished: true,
                cancelled: false,
                awarded: false,
            });
            id += 1;
        }
    }
    fixtures.push(Fixture {
        id: 9000,
        league_id: 47,
        utc_time: Utc.with_ymd_and_hms(2026, 5, 1, 17, 0, 0).unwrap(),
        home_id: 1,
        away_id: 2,
        home_goals: None,
        away_goals: None,
        finished: false,
        cancelled: false,
        awarded: false,
    });
    fixtures
}

fn sample_rows() -> Vec<ScrapedRecord> {
    let at = Utc.with_ymd_and_hms(2026, 4, 30, 9, 0, 0).unwrap();
    vec![
        ScrapedRecord {
            source: "physioroom".to_string(),
            data_type: DataType::Injuries,
            fixture_id: None,
            team_id: Some(1),
            data: json!({"players": [{"name": "A", "severity": 3, "position": "Defender"}]}),
            scraped_at: at,
            confidence: 0.9,
        },
        ScrapedRecord {
            source: "oddsportal".to_string(),
            data_type: DataType::Odds,
            fixture_id: Some(9000),
            team_id: None,
            data: json!({
                "home_open": 2.00, "draw_open": 3.20, "away_open": 3.50,
                "home_current": 1.90, "draw_current": 3.25, "away_current": 3.70,
            }),
            scraped_at: at,
            confidence: 0.9,
        },
        ScrapedRecord {
            source: "openweather".to_string(),
            data_type: DataType::Weather,
            fixture_id: Some(9000),
            team_id: None,
            data: json!({"temperature_c": 12.0, "wind_speed_kmh": 15.0, "precipitation_mm": 0.0}),
            scraped_at: at,
            confidence: 0.9,
        },
    ]
}

fn bench_compute_form(c: &mut Criterion) {
    let fixtures = sample_fixtures();
    let results: Vec<TeamResult> = team_results(&fixtures, 1, 5);
    c.bench_function("compute_form", |b| {
        b.iter(|| {
            let form = compute_form(black_box(&results));
            black_box(form.last5_points);
        })
    });
}

fn bench_xg_estimate(c: &mut Criterion) {
    let home = SideStats {
        goals_per_game: 1.8,
        goals_conceded_per_game: 1.1,
    };
    let away = SideStats {
        goals_per_game: 1.2,
        goals_conceded_per_game: 1.6,
    };
    c.bench_function("xg_estimate", |b| {
        b.iter(|| {
            let metrics = xg::estimate(black_box(&home), black_box(&away), true);
            black_box(metrics.total_goals);
        })
    });
}

fn bench_outcome_grid(c: &mut Criterion) {
    c.bench_function("outcome_grid", |b| {
        b.iter(|| {
            let probs = xg::outcome_probabilities(black_box(1.7), black_box(1.1));
            black_box(probs.home);
        })
    });
}

fn bench_full_extract(c: &mut Criterion) {
    let fixtures = sample_fixtures();
    let teams = (1..=20u32)
        .map(|id| {
            (
                id,
                Team {
                    id,
                    name: format!("Team {id}"),
                    league_id: Some(47),
                },
            )
        })
        .collect();
    let extractor = FeatureExtractor::new(
        BenchLookup { fixtures, teams },
        BenchStore { rows: sample_rows() },
    );
    c.bench_function("full_extract", |b| {
        b.iter(|| {
            let features = extractor.extract(black_box(9000)).unwrap();
            black_box(features.quality.completeness);
        })
    });
}

criterion_group!(
    perf,
    bench_compute_form,
    bench_xg_estimate,
    bench_outcome_grid,
    bench_full_extract
);
criterion_main!(perf);
