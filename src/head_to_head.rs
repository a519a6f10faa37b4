use crate::fallback::{Fetched, with_fallback};
use crate::sources::{self, Fixture};
use crate::types::{HeadToHeadMetrics, round1};

pub const SOURCE: &str = "head-to-head";
const H2H_WINDOW: usize = 10;

/// Head-to-head record over the most recent meetings, counted from the
/// current home team's perspective regardless of who hosted each meeting.
pub fn fetch(fixtures: &[Fixture], home_id: u32, away_id: u32) -> Fetched<HeadToHeadMetrics> {
    with_fallback("head_to_head", HeadToHeadMetrics::defaults(), || {
        let meetings = sources::head_to_head(fixtures, home_id, away_id, H2H_WINDOW);
        Ok(summarize(&meetings, home_id).map(|m| (m, SOURCE.to_string())))
    })
}

fn summarize(meetings: &[Fixture], home_id: u32) -> Option<HeadToHeadMetrics> {
    let last = meetings.first()?;

    let mut home_wins = 0u8;
    let mut draws = 0u8;
    let mut away_wins = 0u8;
    for meeting in meetings {
        let (hg, ag) = (meeting.home_goals?, meeting.away_goals?);
        let (for_goals, against_goals) = if meeting.home_id == home_id {
            (hg, ag)
        } else {
            (ag, hg)
        };
        if for_goals > against_goals {
            home_wins += 1;
        } else if for_goals == against_goals {
            draws += 1;
        } else {
            away_wins += 1;
        }
    }

    let total = meetings.len() as u8;
    Some(HeadToHeadMetrics {
        total_matches: total,
        home_wins,
        draws,
        away_wins,
        last_meeting_date: Some(last.utc_time),
        last_meeting_score: last
            .home_goals
            .zip(last.away_goals)
            .map(|(hg, ag)| format!("{hg}-{ag}")),
        home_win_rate: round1(f64::from(home_wins) / f64::from(total) * 100.0),
    })
}
