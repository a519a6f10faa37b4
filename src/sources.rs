use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Team;

/// Scraped rows below this confidence are the scrapers' own synthetic
/// fallbacks; treat them as absent rather than real signal.
pub const MIN_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u32,
    pub league_id: u32,
    pub utc_time: DateTime<Utc>,
    pub home_id: u32,
    pub away_id: u32,
    pub home_goals: Option<u8>,
    pub away_goals: Option<u8>,
    pub finished: bool,
    pub cancelled: bool,
    pub awarded: bool,
}

impl Fixture {
    /// Settled on the pitch with both scores present. Cancelled and awarded
    /// matches carry no usable scoring signal.
    pub fn is_completed(&self) -> bool {
        self.finished
            && !self.cancelled
            && !self.awarded
            && self.home_goals.is_some()
            && self.away_goals.is_some()
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }
}

/// One completed match seen from a single team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    pub fixture_id: u32,
    pub utc_time: DateTime<Utc>,
    pub goals_for: u8,
    pub goals_against: u8,
    pub home: bool,
}

impl TeamResult {
    pub fn letter(&self) -> char {
        if self.goals_for > self.goals_against {
            'W'
        } else if self.goals_for == self.goals_against {
            'D'
        } else {
            'L'
        }
    }

    /// League points awarded for this result.
    pub fn points(&self) -> u8 {
        match self.letter() {
            'W' => 3,
            'D' => 1,
            _ => 0,
        }
    }

    fn from_fixture(fixture: &Fixture, team_id: u32) -> Option<Self> {
        if !fixture.is_completed() || !fixture.involves(team_id) {
            return None;
        }
        let home = fixture.home_id == team_id;
        let (goals_for, goals_against) = if home {
            (fixture.home_goals?, fixture.away_goals?)
        } else {
            (fixture.away_goals?, fixture.home_goals?)
        };
        Some(Self {
            fixture_id: fixture.id,
            utc_time: fixture.utc_time,
            goals_for,
            goals_against,
            home,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Injuries,
    Odds,
    Weather,
}

/// Standard container for one scraped row, mirroring what the scraping
/// executors persist: a source tag, a payload blob, and a confidence the
/// scraper assigned to its own parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedRecord {
    pub source: String,
    pub data_type: DataType,
    pub fixture_id: Option<u32>,
    pub team_id: Option<u32>,
    pub data: Value,
    pub scraped_at: DateTime<Utc>,
    pub confidence: f64,
}

impl ScrapedRecord {
    pub fn is_usable(&self) -> bool {
        self.confidence >= MIN_CONFIDENCE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalQuery {
    pub source: Option<String>,
    pub data_type: DataType,
    pub fixture_id: Option<u32>,
    pub team_id: Option<u32>,
}

impl SignalQuery {
    pub fn for_team(data_type: DataType, team_id: u32) -> Self {
        Self {
            source: None,
            data_type,
            fixture_id: None,
            team_id: Some(team_id),
        }
    }

    pub fn for_fixture(data_type: DataType, fixture_id: u32) -> Self {
        Self {
            source: None,
            data_type,
            fixture_id: Some(fixture_id),
            team_id: None,
        }
    }
}

/// Fixture/team lookup collaborator. Implementations wrap whatever storage
/// or API layer the host application uses.
pub trait FixtureLookup: Sync {
    fn fixture(&self, id: u32) -> Result<Option<Fixture>>;
    fn team(&self, id: u32) -> Result<Option<Team>>;
    /// Full fixture universe the engine filters history out of.
    fn fixtures(&self) -> Result<Vec<Fixture>>;
}

/// Scraped-signal store collaborator. Rows come back most-recent first;
/// an empty result is a valid, expected response, not an error.
pub trait SignalStore: Sync {
    fn scraped_data(&self, query: &SignalQuery) -> Result<Vec<ScrapedRecord>>;
}

/// Completed fixtures, most recent first. The sort is stable so equal
/// timestamps keep their input order.
pub fn completed_desc(fixtures: &[Fixture]) -> Vec<Fixture> {
    let mut out: Vec<Fixture> = fixtures.iter().filter(|f| f.is_completed()).copied().collect();
    out.sort_by(|a, b| b.utc_time.cmp(&a.utc_time));
    out
}

/// Up to `limit` most recent completed results for one team, newest first.
pub fn team_results(fixtures: &[Fixture], team_id: u32, limit: usize) -> Vec<TeamResult> {
    completed_desc(fixtures)
        .iter()
        .filter_map(|f| TeamResult::from_fixture(f, team_id))
        .take(limit)
        .collect()
}

/// Up to `limit` most recent completed meetings between the two teams,
/// newest first, either venue.
pub fn head_to_head(fixtures: &[Fixture], home_id: u32, away_id: u32, limit: usize) -> Vec<Fixture> {
    completed_desc(fixtures)
        .into_iter()
        .filter(|f| {
            (f.home_id == home_id && f.away_id == away_id)
                || (f.home_id == away_id && f.away_id == home_id)
        })
        .take(limit)
        .collect()
}

/// Up to `limit` most recent completed home-ground results for one team.
/// When a league filter is supplied, same-league matches are preferred and
/// other leagues only top up the remainder.
pub fn home_results(
    fixtures: &[Fixture],
    team_id: u32,
    league_id: Option<u32>,
    limit: usize,
) -> Vec<TeamResult> {
    let at_home: Vec<Fixture> = completed_desc(fixtures)
        .into_iter()
        .filter(|f| f.home_id == team_id)
        .collect();

    let mut picked: Vec<&Fixture> = Vec::with_capacity(limit);
    if let Some(league) = league_id {
        picked.extend(at_home.iter().filter(|f| f.league_id == league).take(limit));
        if picked.len() < limit {
            let remaining = limit - picked.len();
            picked.extend(at_home.iter().filter(|f| f.league_id != league).take(remaining));
        }
    } else {
        picked.extend(at_home.iter().take(limit));
    }

    picked
        .into_iter()
        .filter_map(|f| TeamResult::from_fixture(f, team_id))
        .collect()
}
