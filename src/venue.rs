use crate::fallback::{Fetched, with_fallback};
use crate::sources::{self, Fixture};
use crate::types::{VenueMetrics, round1};

pub const SOURCE: &str = "venue";
const VENUE_WINDOW: usize = 10;
const FORM_SYMBOLS: usize = 5;
/// Blend weights for the 0-10 advantage score: win rate carries more than
/// scoring rate.
const WIN_RATE_WEIGHT: f64 = 0.6;
const SCORING_WEIGHT: f64 = 0.4;
/// Scoring rate saturates the blend at this many goals per home match.
const GOALS_CEILING: f64 = 3.0;

/// Home-ground advantage profile from the team's recent home matches,
/// same-league preferred when a league filter is supplied.
pub fn fetch(fixtures: &[Fixture], team_id: u32, league_id: Option<u32>) -> Fetched<VenueMetrics> {
    with_fallback("venue", VenueMetrics::defaults(), || {
        let at_home = sources::home_results(fixtures, team_id, league_id, VENUE_WINDOW);
        if at_home.is_empty() {
            return Ok(None);
        }

        let n = at_home.len() as f64;
        let wins = at_home.iter().filter(|r| r.letter() == 'W').count() as f64;
        let goals: f64 = at_home.iter().map(|r| f64::from(r.goals_for)).sum();

        let win_rate = wins / n * 100.0;
        let average_home_goals = goals / n;
        let advantage = 10.0
            * (WIN_RATE_WEIGHT * (win_rate / 100.0)
                + SCORING_WEIGHT * (average_home_goals / GOALS_CEILING).min(1.0));

        let metrics = VenueMetrics {
            home_win_rate: round1(win_rate),
            average_home_goals: round1(average_home_goals),
            recent_home_form: at_home
                .iter()
                .take(FORM_SYMBOLS)
                .map(|r| r.letter())
                .collect(),
            home_advantage_score: round1(advantage),
        };
        Ok(Some((metrics, SOURCE.to_string())))
    })
}
