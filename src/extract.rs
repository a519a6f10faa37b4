use std::time::Instant;

use tracing::{info, warn};

use crate::error::ExtractError;
use crate::fallback::Fetched;
use crate::sources::{self, Fixture, FixtureLookup, SignalStore};
use crate::types::{
    FormMetrics, HeadToHeadMetrics, InjuryImpact, MatchFeatures, SideStats, Team, VenueMetrics,
};
use crate::{form, head_to_head, injury, market, quality, venue, weather, xg};

/// The engine's sole public entry point. Holds the two collaborator
/// handles and nothing else; constructed once at process start, safe to
/// share across threads, every extraction is independent.
pub struct FeatureExtractor<L, S> {
    lookup: L,
    store: S,
}

impl<L: FixtureLookup, S: SignalStore> FeatureExtractor<L, S> {
    pub fn new(lookup: L, store: S) -> Self {
        Self { lookup, store }
    }

    /// Assemble the full feature bundle for one fixture.
    ///
    /// Fails only when the fixture or either team cannot be resolved. Every
    /// signal computation is isolated: a failing collaborator call degrades
    /// that one signal to its fixed default and the extraction carries on.
    pub fn extract(&self, fixture_id: u32) -> Result<MatchFeatures, ExtractError> {
        let started = Instant::now();
        info!(fixture_id, "feature extraction started");

        let fixture = self.resolve_fixture(fixture_id)?;
        let home_team = self.resolve_team(fixture.home_id)?;
        let away_team = self.resolve_team(fixture.away_id)?;

        let history = match self.lookup.fixtures() {
            Ok(fixtures) => fixtures,
            Err(err) => {
                warn!(fixture_id, error = %err, "fixture history unavailable, history signals use defaults");
                Vec::new()
            }
        };

        // Each slot starts at its signal's fixed default; a task overwrites
        // its own slot only. One task's outcome never blocks or aborts the
        // siblings, the join waits for all of them.
        let mut home_form = FormMetrics::defaults();
        let mut away_form = FormMetrics::defaults();
        let mut expected_goals =
            xg::estimate(&SideStats::default(), &SideStats::default(), true);
        let mut h2h = Fetched::fallback(HeadToHeadMetrics::defaults());
        let mut venue_profile = Fetched::fallback(VenueMetrics::defaults());
        let mut injuries = (
            Fetched::fallback(InjuryImpact::defaults()),
            Fetched::fallback(InjuryImpact::defaults()),
        );
        let mut market_odds = Fetched::fallback(None);
        let mut forecast = Fetched::fallback(None);

        let (home_id, away_id) = (fixture.home_id, fixture.away_id);
        let league_id = fixture.league_id;
        let history = &history;
        let store: &dyn SignalStore = &self.store;

        rayon::scope(|s| {
            s.spawn(|_| {
                home_form =
                    form::compute_form(&sources::team_results(history, home_id, form::FORM_WINDOW));
                away_form =
                    form::compute_form(&sources::team_results(history, away_id, form::FORM_WINDOW));
            });
            s.spawn(|_| {
                let home_stats =
                    xg::side_stats(&sources::team_results(history, home_id, xg::STATS_WINDOW));
                let away_stats =
                    xg::side_stats(&sources::team_results(history, away_id, xg::STATS_WINDOW));
                expected_goals = xg::estimate(&home_stats, &away_stats, true);
            });
            s.spawn(|_| h2h = head_to_head::fetch(history, home_id, away_id));
            s.spawn(|_| venue_profile = venue::fetch(history, home_id, Some(league_id)));
            s.spawn(|_| {
                injuries = (injury::fetch(store, home_id), injury::fetch(store, away_id));
            });
            s.spawn(|_| market_odds = market::fetch(store, fixture_id));
            s.spawn(|_| forecast = weather::fetch(store, fixture_id));
        });

        let extra_sources: Vec<String> = [
            &h2h.source,
            &venue_profile.source,
            &injuries.0.source,
            &injuries.1.source,
            &market_odds.source,
            &forecast.source,
        ]
        .into_iter()
        .filter_map(|s| s.clone())
        .collect();

        let quality = quality::score(&home_form, &away_form, &h2h.value, &extra_sources);

        let features = MatchFeatures {
            fixture_id,
            home_team: Some(home_team),
            away_team: Some(away_team),
            home_form,
            away_form,
            expected_goals,
            head_to_head: h2h.value,
            venue: venue_profile.value,
            home_injuries: injuries.0.value,
            away_injuries: injuries.1.value,
            market: market_odds.value,
            weather: forecast.value,
            quality,
        };

        info!(
            fixture_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            completeness = features.quality.completeness,
            "feature extraction complete"
        );
        Ok(features)
    }

    fn resolve_fixture(&self, id: u32) -> Result<Fixture, ExtractError> {
        match self.lookup.fixture(id) {
            Ok(Some(fixture)) => Ok(fixture),
            Ok(None) => Err(ExtractError::FixtureNotFound(id)),
            Err(err) => {
                warn!(fixture_id = id, error = %err, "fixture lookup failed");
                Err(ExtractError::FixtureNotFound(id))
            }
        }
    }

    fn resolve_team(&self, id: u32) -> Result<Team, ExtractError> {
        match self.lookup.team(id) {
            Ok(Some(team)) => Ok(team),
            Ok(None) => Err(ExtractError::TeamNotFound(id)),
            Err(err) => {
                warn!(team_id = id, error = %err, "team lookup failed");
                Err(ExtractError::TeamNotFound(id))
            }
        }
    }
}
