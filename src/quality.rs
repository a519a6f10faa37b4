use crate::types::{DataQuality, FormMetrics, HeadToHeadMetrics};

/// Name of the fixture/team lookup collaborator; always credited because
/// every bundle is at least built from its fixture resolution.
pub const PRIMARY_SOURCE: &str = "fixtures";

const SHORT_FORM_PENALTY: f64 = 10.0;
const NO_H2H_PENALTY: f64 = 15.0;
const THIN_H2H_PENALTY: f64 = 5.0;
/// Completeness never drops below this; the Poisson defaults still provide
/// a baseline estimate even with no history at all.
const COMPLETENESS_FLOOR: f64 = 60.0;

const FULL_FORM_SYMBOLS: usize = 5;
const THIN_H2H_MATCHES: u8 = 3;

/// Aggregate completeness of a feature bundle from its history-derived
/// inputs plus the adapters that contributed real data.
pub fn score(
    home_form: &FormMetrics,
    away_form: &FormMetrics,
    h2h: &HeadToHeadMetrics,
    extra_sources: &[String],
) -> DataQuality {
    let mut completeness = 100.0;

    let full_form = home_form.form_string.chars().count() >= FULL_FORM_SYMBOLS
        && away_form.form_string.chars().count() >= FULL_FORM_SYMBOLS;
    if !full_form {
        completeness -= SHORT_FORM_PENALTY;
    }
    if h2h.total_matches == 0 {
        completeness -= NO_H2H_PENALTY;
    }
    // Stacks with the zero-meetings penalty.
    if h2h.total_matches < THIN_H2H_MATCHES {
        completeness -= THIN_H2H_PENALTY;
    }

    let mut sources = Vec::with_capacity(1 + extra_sources.len());
    sources.push(PRIMARY_SOURCE.to_string());
    for source in extra_sources {
        if !sources.contains(source) {
            sources.push(source.clone());
        }
    }

    DataQuality {
        completeness: completeness.max(COMPLETENESS_FLOOR),
        recency: if full_form {
            "last-5-matches".to_string()
        } else {
            "partial-history".to_string()
        },
        sources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trend;

    fn form(symbols: &str) -> FormMetrics {
        FormMetrics {
            last5_points: 0,
            goals_scored: 0,
            goals_conceded: 0,
            goal_difference: 0,
            trend: Trend::Stable,
            form_string: symbols.to_string(),
            win_rate: 0.0,
        }
    }

    fn h2h(total: u8) -> HeadToHeadMetrics {
        HeadToHeadMetrics {
            total_matches: total,
            home_wins: total,
            draws: 0,
            away_wins: 0,
            last_meeting_date: None,
            last_meeting_score: None,
            home_win_rate: 100.0,
        }
    }

    #[test]
    fn full_inputs_score_one_hundred() {
        let q = score(&form("WWWWW"), &form("DDDDD"), &h2h(5), &[]);
        assert_eq!(q.completeness, 100.0);
        assert_eq!(q.recency, "last-5-matches");
        assert_eq!(q.sources, vec![PRIMARY_SOURCE.to_string()]);
    }

    #[test]
    fn zero_meetings_stack_both_h2h_penalties() {
        let q = score(&form("WWWWW"), &form("DDDDD"), &h2h(0), &[]);
        assert_eq!(q.completeness, 80.0);
        assert!(q.completeness <= 85.0);
    }

    #[test]
    fn thin_h2h_costs_five() {
        let q = score(&form("WWWWW"), &form("DDDDD"), &h2h(2), &[]);
        assert_eq!(q.completeness, 95.0);
    }

    #[test]
    fn short_form_on_either_side_costs_ten() {
        let q = score(&form("WWL"), &form("DDDDD"), &h2h(5), &[]);
        assert_eq!(q.completeness, 90.0);
        assert_eq!(q.recency, "partial-history");
    }

    #[test]
    fn completeness_never_drops_below_the_floor() {
        let q = score(&form(""), &form(""), &h2h(0), &[]);
        assert_eq!(q.completeness, 70.0);
        assert!(q.completeness >= 60.0);
    }

    #[test]
    fn contributing_sources_follow_the_primary_deduped() {
        let extras = vec![
            "head-to-head".to_string(),
            "physioroom".to_string(),
            "physioroom".to_string(),
            "oddsportal".to_string(),
        ];
        let q = score(&form("WWWWW"), &form("DDDDD"), &h2h(5), &extras);
        assert_eq!(
            q.sources,
            vec!["fixtures", "head-to-head", "physioroom", "oddsportal"]
        );
    }
}
