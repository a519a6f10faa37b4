use crate::sources::TeamResult;
use crate::types::{FormMetrics, Trend, round1};

/// Most recent match gets the heaviest weight; shorter histories use the
/// matching prefix.
const TREND_WEIGHTS: [f64; 5] = [5.0, 4.0, 3.0, 2.0, 1.0];
const TREND_THRESHOLD: f64 = 0.3;
/// Below this many matches the weighted score is too noisy to classify.
const TREND_MIN_MATCHES: usize = 3;

pub const FORM_WINDOW: usize = 5;

/// Summarize a team's recent results, newest first. An empty history yields
/// the fixed sentinel from [`FormMetrics::defaults`].
pub fn compute_form(results: &[TeamResult]) -> FormMetrics {
    if results.is_empty() {
        return FormMetrics::defaults();
    }

    let recent = &results[..results.len().min(FORM_WINDOW)];

    let mut wins = 0u8;
    let mut draws = 0u8;
    let mut goals_scored = 0u16;
    let mut goals_conceded = 0u16;
    let mut form_string = String::with_capacity(recent.len());

    for result in recent {
        match result.letter() {
            'W' => wins += 1,
            'D' => draws += 1,
            _ => {}
        }
        goals_scored += u16::from(result.goals_for);
        goals_conceded += u16::from(result.goals_against);
        form_string.push(result.letter());
    }

    let last5_points = 3 * wins + draws;
    let win_rate = round1(f64::from(wins) / recent.len() as f64 * 100.0);

    FormMetrics {
        last5_points,
        goals_scored,
        goals_conceded,
        goal_difference: goals_scored as i16 - goals_conceded as i16,
        trend: classify_trend(recent),
        form_string,
        win_rate,
    }
}

/// Recency-weighted average of per-match points, mapped onto -1..1 around
/// the 1.5 points-per-match midline.
fn classify_trend(recent: &[TeamResult]) -> Trend {
    if recent.len() < TREND_MIN_MATCHES {
        return Trend::Stable;
    }

    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    for (result, weight) in recent.iter().zip(TREND_WEIGHTS) {
        weighted += weight * f64::from(result.points());
        weight_sum += weight;
    }

    let score = (weighted / weight_sum - 1.5) / 1.5;
    if score > TREND_THRESHOLD {
        Trend::Improving
    } else if score < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
