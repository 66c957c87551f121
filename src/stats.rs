//! Derived stats: per-action and per-second gain from upgrades and boosts.

use log::debug;

use crate::catalog::UPGRADES;
use crate::state::{GameState, Timestamp};

/// Per-action gain with no upgrades and no boosts.
pub const BASE_PER_ACTION: f64 = 1.0;

/// Recompute `per_action_gain` and `per_time_gain` at `now`.
///
/// Expired boosts are pruned first; nothing else prunes them. Calling this
/// twice at the same `now` gives the same result.
pub fn recompute(state: &mut GameState, now: Timestamp) {
    let mut per_action = BASE_PER_ACTION;
    let mut per_time = 0.0;
    for def in UPGRADES {
        let owned = state.owned(def.id) as f64;
        per_action += owned * def.per_action_bonus;
        per_time += owned * def.per_time_bonus;
    }

    let before = state.active_boosts.len();
    state.active_boosts.retain(|b| b.is_active(now));
    let expired = before - state.active_boosts.len();
    if expired > 0 {
        debug!("{expired} boost(s) expired at {now}");
    }

    let action_mul: f64 = state
        .active_boosts
        .iter()
        .map(|b| b.per_action_multiplier)
        .product();
    let time_mul: f64 = state
        .active_boosts
        .iter()
        .map(|b| b.per_time_multiplier)
        .product();

    state.per_action_gain = per_action * action_mul;
    state.per_time_gain = per_time * time_mul;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Boost;

    fn boost(id: &str, action: f64, time: f64, expires_at: Option<Timestamp>) -> Boost {
        Boost {
            id: id.into(),
            title: id.into(),
            per_action_multiplier: action,
            per_time_multiplier: time,
            expires_at,
        }
    }

    #[test]
    fn fresh_state_has_base_gains() {
        let mut state = GameState::new(0);
        recompute(&mut state, 0);
        assert!((state.per_action_gain - 1.0).abs() < 1e-9);
        assert!((state.per_time_gain - 0.0).abs() < 1e-9);
    }

    #[test]
    fn upgrades_add_bonuses() {
        let mut state = GameState::new(0);
        state.owned_upgrades.insert("cursor".into(), 10); // 1.0/s
        state.owned_upgrades.insert("wheel".into(), 2); // 4.0/s
        state.owned_upgrades.insert("brush".into(), 3); // +3/action
        recompute(&mut state, 0);
        assert!((state.per_action_gain - 4.0).abs() < 1e-9);
        assert!((state.per_time_gain - 5.0).abs() < 1e-9);
    }

    #[test]
    fn boosts_multiply_and_stack() {
        let mut state = GameState::new(0);
        state.owned_upgrades.insert("wheel".into(), 1); // 2.0/s
        state.active_boosts.push(boost("rush_1", 1.0, 2.0, Some(10_000)));
        state.active_boosts.push(boost("rush_2", 1.0, 2.0, Some(10_000)));
        state.active_boosts.push(boost("inspire_3", 2.0, 1.0, Some(10_000)));
        recompute(&mut state, 0);
        assert!((state.per_time_gain - 8.0).abs() < 1e-9);
        assert!((state.per_action_gain - 2.0).abs() < 1e-9);
    }

    #[test]
    fn expired_boost_is_pruned_and_ignored() {
        let mut state = GameState::new(0);
        state.active_boosts.push(boost("inspire_0", 2.0, 1.0, Some(999)));
        state.active_boosts.push(boost("forever", 3.0, 1.0, None));
        recompute(&mut state, 1_000);
        assert_eq!(state.active_boosts.len(), 1);
        assert_eq!(state.active_boosts[0].id, "forever");
        assert!((state.per_action_gain - 3.0).abs() < 1e-9);
    }

    #[test]
    fn boost_expiring_exactly_now_is_removed() {
        let mut state = GameState::new(0);
        state.active_boosts.push(boost("inspire_0", 2.0, 1.0, Some(1_000)));
        recompute(&mut state, 1_000);
        assert!(state.active_boosts.is_empty());
        assert!((state.per_action_gain - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_entry_counts_as_zero() {
        let mut state = GameState::new(0);
        state.owned_upgrades.clear();
        recompute(&mut state, 0);
        assert!((state.per_action_gain - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recompute_leaves_other_fields_alone() {
        let mut state = GameState::new(42);
        state.score = 77.0;
        state.owned_upgrades.insert("factory".into(), 1);
        let before = state.clone();
        recompute(&mut state, 50);
        assert_eq!(state.score, before.score);
        assert_eq!(state.owned_upgrades, before.owned_upgrades);
        assert_eq!(state.last_observed, before.last_observed);
    }
}
