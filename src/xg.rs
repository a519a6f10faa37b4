use serde::{Deserialize, Serialize};

use crate::sources::TeamResult;
use crate::types::{ExpectedGoalsMetrics, SideStats, round1, round2};

/// Average goals per team per match across the supported competitions.
pub const LEAGUE_AVG_GOALS: f64 = 2.7;
/// Multiplier on the home side's expected goals at its own ground.
const HOME_VENUE_BOOST: f64 = 1.15;
/// Attack/defense strengths never drop below this, so teams with zero or
/// negative historical averages still produce a sane estimate.
const MIN_STRENGTH: f64 = 0.5;
/// Goals-per-side ceiling of the score grid; tail mass folds into the last
/// bucket.
const MAX_GRID_GOALS: usize = 10;
/// How many recent results feed each side's scoring rates.
pub const STATS_WINDOW: usize = 10;

/// Win/draw/loss probabilities in percent, normalized to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbs {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

fn strength(rate: f64) -> f64 {
    if rate <= 0.0 {
        MIN_STRENGTH
    } else {
        rate / LEAGUE_AVG_GOALS
    }
}

/// Poisson attack/defense-strength estimate of both sides' expected goals.
/// Rounding happens only here at the boundary; the clean-sheet probabilities
/// are derived from the unrounded lambdas.
pub fn estimate(home: &SideStats, away: &SideStats, is_home_ground: bool) -> ExpectedGoalsMetrics {
    let boost = if is_home_ground { HOME_VENUE_BOOST } else { 1.0 };

    let home_xg = strength(home.goals_per_game)
        * strength(away.goals_conceded_per_game)
        * LEAGUE_AVG_GOALS
        * boost;
    let away_xg =
        strength(away.goals_per_game) * strength(home.goals_conceded_per_game) * LEAGUE_AVG_GOALS;

    ExpectedGoalsMetrics {
        home: round2(home_xg),
        away: round2(away_xg),
        differential: round2(home_xg - away_xg),
        total_goals: round2(home_xg + away_xg),
        home_clean_sheet_prob: round1(100.0 * (-away_xg).exp()),
        away_clean_sheet_prob: round1(100.0 * (-home_xg).exp()),
    }
}

/// Scoring rates from a team's recent completed results; no history means
/// the 1.5/1.5 input default.
pub fn side_stats(results: &[TeamResult]) -> SideStats {
    if results.is_empty() {
        return SideStats::default();
    }
    let recent = &results[..results.len().min(STATS_WINDOW)];
    let n = recent.len() as f64;
    SideStats {
        goals_per_game: recent.iter().map(|r| f64::from(r.goals_for)).sum::<f64>() / n,
        goals_conceded_per_game: recent.iter().map(|r| f64::from(r.goals_against)).sum::<f64>()
            / n,
    }
}

/// Probability (percent) of three or more total goals: one minus the first
/// three Poisson CDF terms at lambda = total expected goals.
pub fn over25_probability(total_xg: f64) -> f64 {
    round1(100.0 * (1.0 - poisson_cdf_2(total_xg)))
}

/// Complement of [`over25_probability`], from the same unrounded terms.
pub fn under25_probability(total_xg: f64) -> f64 {
    round1(100.0 * poisson_cdf_2(total_xg))
}

fn poisson_cdf_2(lambda: f64) -> f64 {
    let lambda = lambda.max(0.0);
    let p0 = (-lambda).exp();
    let p1 = lambda * p0;
    let p2 = lambda * lambda / 2.0 * p0;
    p0 + p1 + p2
}

/// Probability (percent) that both teams score: neither side records a
/// clean sheet, by inclusion-exclusion on the fractional clean-sheet
/// probabilities.
pub fn btts_probability(home_xg: f64, away_xg: f64) -> f64 {
    let cs_home = (-away_xg).exp();
    let cs_away = (-home_xg).exp();
    round1(100.0 * (1.0 - (cs_home + cs_away - cs_home * cs_away)))
}

/// Win/draw/loss probabilities from an independent-Poisson score grid.
/// Any tiny rounding residue lands in the draw bucket so the three always
/// sum to exactly 100.
pub fn outcome_probabilities(home_xg: f64, away_xg: f64) -> OutcomeProbs {
    let pmf_home = poisson_pmf(home_xg, MAX_GRID_GOALS);
    let pmf_away = poisson_pmf(away_xg, MAX_GRID_GOALS);

    let mut p_home = 0.0;
    let mut p_draw = 0.0;
    let mut p_away = 0.0;
    for (i, ph) in pmf_home.iter().enumerate() {
        for (j, pa) in pmf_away.iter().enumerate() {
            let p = ph * pa;
            if i > j {
                p_home += p;
            } else if i < j {
                p_away += p;
            } else {
                p_draw += p;
            }
        }
    }

    let sum = p_home + p_draw + p_away;
    let (p_home, p_away) = if sum > 0.0 {
        (round1(p_home / sum * 100.0), round1(p_away / sum * 100.0))
    } else {
        (33.3, 33.3)
    };

    OutcomeProbs {
        home: p_home,
        draw: round1(100.0 - p_home - p_away),
        away: p_away,
    }
}

fn poisson_pmf(lambda: f64, max_k: usize) -> Vec<f64> {
    let lambda = lambda.max(0.0);
    let mut out = vec![0.0; max_k + 1];
    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }

    // Fold the truncated tail into the last bucket so the pmf sums to one.
    let sum: f64 = out.iter().sum();
    if sum < 1.0 {
        out[max_k] += 1.0 - sum;
    }
    out
}
