//! Scenario selection, triggering, and boost queries.

use log::debug;
use rand::Rng;

use crate::catalog::{find_scenario, ScenarioDefinition, SCENARIOS};
use crate::error::EngineError;
use crate::state::{Boost, GameState, Timestamp};
use crate::stats;

/// What a trigger did to the state.
#[derive(Clone, Debug, PartialEq)]
pub struct AppliedEffect {
    pub scenario_id: &'static str,
    /// Score actually added (0 when the scenario has no immediate delta).
    pub score_delta: f64,
    /// The boost appended to `active_boosts`, if any.
    pub boost: Option<Boost>,
}

/// Pick a scenario uniformly at random.
pub fn select_random<R: Rng>(rng: &mut R) -> &'static ScenarioDefinition {
    &SCENARIOS[rng.gen_range(0..SCENARIOS.len())]
}

/// Apply `scenario` at `now` and recompute derived stats.
///
/// The immediate delta applies regardless of duration. A boost is created only
/// when the duration is positive and at least one multiplier is set. Score is
/// floored at zero.
pub fn trigger(state: &mut GameState, scenario: &ScenarioDefinition, now: Timestamp) -> AppliedEffect {
    let mut score_delta = 0.0;
    if let Some(delta) = scenario.effect.immediate_score_delta {
        if delta != 0.0 {
            let before = state.score;
            state.score = (state.score + delta).max(0.0);
            score_delta = state.score - before;
        }
    }

    let boost = if scenario.duration_secs > 0 && scenario.effect.has_multiplier() {
        let boost = Boost {
            id: boost_id(state, scenario.id, now),
            title: scenario.title.to_string(),
            per_action_multiplier: scenario.effect.per_action_multiplier.unwrap_or(1.0),
            per_time_multiplier: scenario.effect.per_time_multiplier.unwrap_or(1.0),
            expires_at: Some(now + scenario.duration_secs as u64 * 1000),
        };
        state.active_boosts.push(boost.clone());
        Some(boost)
    } else {
        None
    };

    stats::recompute(state, now);
    debug!(
        "scenario {} triggered at {now}: delta={score_delta}, boost={}",
        scenario.id,
        boost.is_some()
    );

    AppliedEffect {
        scenario_id: scenario.id,
        score_delta,
        boost,
    }
}

/// `{scenario}_{now}`, suffixed with a counter when a boost already holds
/// that id (two triggers in the same millisecond).
fn boost_id(state: &GameState, scenario_id: &str, now: Timestamp) -> String {
    let base = format!("{scenario_id}_{now}");
    let taken = |id: &str| state.active_boosts.iter().any(|b| b.id == id);
    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Trigger a catalog scenario by id.
pub fn trigger_by_id(state: &mut GameState, id: &str, now: Timestamp) -> Result<AppliedEffect, EngineError> {
    let found = find_scenario(id);
    debug_assert!(found.is_ok(), "trigger for unknown scenario `{id}`");
    let scenario = found?;
    Ok(trigger(state, scenario, now))
}

/// The boost that expires soonest. Ties go to the earliest trigger; boosts
/// without an expiry are never featured.
pub fn soonest_expiring(state: &GameState) -> Option<&Boost> {
    let mut best: Option<(&Boost, Timestamp)> = None;
    for b in &state.active_boosts {
        if let Some(at) = b.expires_at {
            if best.map_or(true, |(_, best_at)| at < best_at) {
                best = Some((b, at));
            }
        }
    }
    best.map(|(b, _)| b)
}
