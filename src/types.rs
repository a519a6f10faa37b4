use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trend classification over a team's recent results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMetrics {
    pub last5_points: u8,
    pub goals_scored: u16,
    pub goals_conceded: u16,
    pub goal_difference: i16,
    pub trend: Trend,
    /// W/D/L symbols, most recent first, at most five.
    pub form_string: String,
    pub win_rate: f64,
}

impl FormMetrics {
    /// Fixed sentinel returned for a team with no match history. The values
    /// never vary so a default-shaped bundle is recognizable in diagnostics.
    pub fn defaults() -> Self {
        Self {
            last5_points: 7,
            goals_scored: 5,
            goals_conceded: 5,
            goal_difference: 0,
            trend: Trend::Stable,
            form_string: "WDWDL".to_string(),
            win_rate: 40.0,
        }
    }
}

/// Per-side scoring rates feeding the expected-goals model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideStats {
    pub goals_per_game: f64,
    pub goals_conceded_per_game: f64,
}

impl Default for SideStats {
    fn default() -> Self {
        Self {
            goals_per_game: 1.5,
            goals_conceded_per_game: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedGoalsMetrics {
    pub home: f64,
    pub away: f64,
    pub differential: f64,
    pub total_goals: f64,
    /// Poisson probability (percent) that the home side concedes zero goals.
    pub home_clean_sheet_prob: f64,
    pub away_clean_sheet_prob: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadMetrics {
    pub total_matches: u8,
    pub home_wins: u8,
    pub draws: u8,
    pub away_wins: u8,
    pub last_meeting_date: Option<DateTime<Utc>>,
    pub last_meeting_score: Option<String>,
    pub home_win_rate: f64,
}

impl HeadToHeadMetrics {
    /// Neutral default for pairs with no recorded meetings. The 33 is a
    /// deliberate literal, not a recomputed 100/3.
    pub fn defaults() -> Self {
        Self {
            total_matches: 0,
            home_wins: 0,
            draws: 0,
            away_wins: 0,
            last_meeting_date: None,
            last_meeting_score: None,
            home_win_rate: 33.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueMetrics {
    pub home_win_rate: f64,
    pub average_home_goals: f64,
    /// W/D/L symbols for the most recent home matches, at most five.
    pub recent_home_form: String,
    /// 0-10 blend of home win rate and home scoring rate.
    pub home_advantage_score: f64,
}

impl VenueMetrics {
    pub fn defaults() -> Self {
        Self {
            home_win_rate: 46.0,
            average_home_goals: 1.5,
            recent_home_form: String::new(),
            home_advantage_score: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryImpact {
    pub key_players_out: u8,
    pub impact_score: f64,
    /// Distinct position labels, input order, at most five.
    pub affected_positions: Vec<String>,
}

impl InjuryImpact {
    pub fn defaults() -> Self {
        Self {
            key_players_out: 0,
            impact_score: 0.0,
            affected_positions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsTriple {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSentiment {
    Home,
    Away,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMetrics {
    pub opening: OddsTriple,
    pub current: OddsTriple,
    /// Current minus opening, per outcome. Negative means odds shortened.
    pub drift: OddsTriple,
    pub drift_velocity: f64,
    pub sentiment: MarketSentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherMetrics {
    pub temperature_c: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub condition: Option<String>,
    /// Multiplier applied by downstream goal models; absent when no driver
    /// field was available.
    pub xg_modifier: Option<f64>,
    pub forecast_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Bounded 60-100; defaults still provide a usable baseline estimate.
    pub completeness: f64,
    pub recency: String,
    /// Primary lookup collaborator first, then adapters that returned real
    /// (non-default) data, in fan-out order.
    pub sources: Vec<String>,
}

/// Aggregate feature bundle for one fixture. Constructed fresh per
/// extraction call and never mutated after return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchFeatures {
    pub fixture_id: u32,
    pub home_team: Option<Team>,
    pub away_team: Option<Team>,
    pub home_form: FormMetrics,
    pub away_form: FormMetrics,
    pub expected_goals: ExpectedGoalsMetrics,
    pub head_to_head: HeadToHeadMetrics,
    pub venue: VenueMetrics,
    pub home_injuries: InjuryImpact,
    pub away_injuries: InjuryImpact,
    pub market: Option<MarketMetrics>,
    pub weather: Option<WeatherMetrics>,
    pub quality: DataQuality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub league_id: Option<u32>,
}

// Rounding happens only at output boundaries so derived quantities stay
// consistent with the unrounded intermediates.
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
