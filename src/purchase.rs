//! Upgrade cost curve and the purchase transition.

use crate::catalog::{find_upgrade, UpgradeDefinition};
use crate::error::EngineError;
use crate::state::GameState;

/// Result of a purchase attempt. Not affording it is a normal outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PurchaseOutcome {
    pub applied: bool,
    /// Price asked for the unit (charged only when `applied`).
    pub cost: f64,
}

/// `floor(base_cost * growth ^ owned)`.
pub fn cost_for(def: &UpgradeDefinition, owned: u32, growth_factor: f64) -> f64 {
    (def.base_cost * growth_factor.powi(owned as i32)).floor()
}

/// Price of the next unit of `id` given what `state` already owns.
pub fn cost(state: &GameState, id: &str, growth_factor: f64) -> Result<f64, EngineError> {
    let def = lookup(id)?;
    Ok(cost_for(def, state.owned(id), growth_factor))
}

/// Buy one unit of `id` if the score covers it.
///
/// Does not recompute derived stats; callers recompute once after their
/// batch of mutations.
pub fn purchase(
    state: &mut GameState,
    id: &str,
    growth_factor: f64,
) -> Result<PurchaseOutcome, EngineError> {
    let def = lookup(id)?;
    let cost = cost_for(def, state.owned(id), growth_factor);
    if state.score < cost {
        return Ok(PurchaseOutcome {
            applied: false,
            cost,
        });
    }
    state.score -= cost;
    *state.owned_upgrades.entry(id.to_string()).or_insert(0) += 1;
    Ok(PurchaseOutcome {
        applied: true,
        cost,
    })
}

fn lookup(id: &str) -> Result<&'static UpgradeDefinition, EngineError> {
    let found = find_upgrade(id);
    debug_assert!(found.is_ok(), "purchase for unknown upgrade `{id}`");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COST_GROWTH_FACTOR;

    #[test]
    fn first_unit_costs_base() {
        let state = GameState::new(0);
        assert_eq!(cost(&state, "cursor", COST_GROWTH_FACTOR).unwrap(), 15.0);
        assert_eq!(cost(&state, "factory", COST_GROWTH_FACTOR).unwrap(), 3000.0);
    }

    #[test]
    fn cost_follows_floored_curve() {
        let mut state = GameState::new(0);
        state.owned_upgrades.insert("cursor".into(), 1);
        assert_eq!(cost(&state, "cursor", COST_GROWTH_FACTOR).unwrap(), 24.0);
        state.owned_upgrades.insert("cursor".into(), 2);
        assert_eq!(cost(&state, "cursor", COST_GROWTH_FACTOR).unwrap(), 38.0); // 38.4
        state.owned_upgrades.insert("cursor".into(), 3);
        assert_eq!(cost(&state, "cursor", COST_GROWTH_FACTOR).unwrap(), 61.0); // 61.44
    }

    #[test]
    fn purchase_success() {
        let mut state = GameState::new(0);
        state.score = 100.0;
        let out = purchase(&mut state, "cursor", COST_GROWTH_FACTOR).unwrap();
        assert!(out.applied);
        assert_eq!(out.cost, 15.0);
        assert_eq!(state.owned("cursor"), 1);
        assert!((state.score - 85.0).abs() < 1e-9);
    }

    #[test]
    fn purchase_insufficient_funds_leaves_state_alone() {
        let mut state = GameState::new(0);
        state.score = 14.0;
        let before = state.clone();
        let out = purchase(&mut state, "cursor", COST_GROWTH_FACTOR).unwrap();
        assert!(!out.applied);
        assert_eq!(state, before);
    }

    #[test]
    fn purchase_exact_funds_reaches_zero() {
        let mut state = GameState::new(0);
        state.score = 100.0;
        assert!(purchase(&mut state, "brush", COST_GROWTH_FACTOR).unwrap().applied);
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn purchase_does_not_recompute() {
        let mut state = GameState::new(0);
        state.score = 100.0;
        purchase(&mut state, "brush", COST_GROWTH_FACTOR).unwrap();
        assert!((state.per_action_gain - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cost_uses_configured_growth() {
        let mut state = GameState::new(0);
        state.owned_upgrades.insert("brush".into(), 2);
        assert_eq!(cost(&state, "brush", 2.0).unwrap(), 400.0);
    }

    // debug_assert fires first in debug builds, release returns the error.
    #[test]
    #[cfg(not(debug_assertions))]
    fn purchase_unknown_upgrade_is_an_error() {
        let mut state = GameState::new(0);
        state.score = 1e9;
        let before = state.clone();
        assert!(matches!(
            purchase(&mut state, "rocket", COST_GROWTH_FACTOR),
            Err(EngineError::InvalidUpgrade(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unknown upgrade")]
    fn purchase_unknown_upgrade_asserts_in_debug() {
        let mut state = GameState::new(0);
        let _ = purchase(&mut state, "rocket", COST_GROWTH_FACTOR);
    }
}
