//! Turning elapsed wall-clock time into score.
//!
//! Both entry points share one rule: `gained = per_time_gain * elapsed_secs`,
//! read after a fresh `recompute` so expired boosts and the latest upgrade
//! counts are reflected.

use log::debug;

use crate::state::{GameState, Timestamp};
use crate::stats;

/// Checkpoint for foreground ticks. Not persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    last_tick: Timestamp,
}

impl TickClock {
    pub fn new(now: Timestamp) -> Self {
        Self { last_tick: now }
    }

    pub fn last_tick(&self) -> Timestamp {
        self.last_tick
    }
}

/// Recompute at `now` and credit `elapsed_secs` of production.
fn accrue(state: &mut GameState, elapsed_secs: f64, now: Timestamp) -> f64 {
    stats::recompute(state, now);
    let gained = state.per_time_gain * elapsed_secs;
    state.score += gained;
    gained
}

/// Foreground tick. A non-positive elapsed span (clock went backwards or a
/// duplicate call) changes nothing, checkpoint included.
pub fn tick(state: &mut GameState, clock: &mut TickClock, now: Timestamp) -> f64 {
    if now <= clock.last_tick {
        return 0.0;
    }
    let elapsed = (now - clock.last_tick) as f64 / 1000.0;
    clock.last_tick = now;
    accrue(state, elapsed, now)
}

/// Offline catch-up on resume: one lump sum over `now - last_observed`.
///
/// Boosts are evaluated as they stand at `now`, not replayed across the gap.
/// Returns `None` when the gap is within `threshold_secs`; otherwise advances
/// `last_observed` and the caller must persist.
pub fn catch_up(state: &mut GameState, now: Timestamp, threshold_secs: f64) -> Option<f64> {
    let elapsed = now.saturating_sub(state.last_observed) as f64 / 1000.0;
    if elapsed <= threshold_secs {
        return None;
    }
    let gained = accrue(state, elapsed, now);
    state.last_observed = now;
    debug!("offline catch-up: {elapsed:.1}s -> +{gained}");
    Some(gained)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// State owning `wheels` wheels (2/s each).
    fn producing(wheels: u32, now: Timestamp) -> GameState {
        let mut state = GameState::new(now);
        state.owned_upgrades.insert("wheel".into(), wheels);
        state
    }

    #[test]
    fn tick_credits_elapsed_time() {
        // 5/s: two wheels and ten cursors
        let mut state = producing(2, 0);
        state.owned_upgrades.insert("cursor".into(), 10);
        let mut clock = TickClock::new(0);
        let gained = tick(&mut state, &mut clock, 3_000);
        assert!((gained - 15.0).abs() < 1e-9);
        assert!((state.score - 15.0).abs() < 1e-9);
        assert_eq!(clock.last_tick(), 3_000);
    }

    #[test]
    fn tick_with_no_elapsed_time_is_noop() {
        let mut state = producing(1, 0);
        let mut clock = TickClock::new(1_000);
        let before = state.clone();
        assert_eq!(tick(&mut state, &mut clock, 1_000), 0.0);
        assert_eq!(state, before);
    }

    #[test]
    fn tick_backwards_clock_is_noop() {
        let mut state = producing(1, 0);
        let mut clock = TickClock::new(5_000);
        assert_eq!(tick(&mut state, &mut clock, 4_000), 0.0);
        assert_eq!(state.score, 0.0);
        assert_eq!(clock.last_tick(), 5_000);
    }

    #[test]
    fn tick_uses_current_upgrades() {
        // per_time_gain is stale (0) until recompute; tick must refresh it.
        let mut state = producing(1, 0);
        assert_eq!(state.per_time_gain, 0.0);
        let mut clock = TickClock::new(0);
        tick(&mut state, &mut clock, 1_000);
        assert!((state.score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tick_drops_expired_boost_before_crediting() {
        let mut state = producing(1, 0);
        state.active_boosts.push(crate::state::Boost {
            id: "rush_0".into(),
            title: "Production Rush".into(),
            per_action_multiplier: 1.0,
            per_time_multiplier: 2.0,
            expires_at: Some(500),
        });
        let mut clock = TickClock::new(0);
        tick(&mut state, &mut clock, 1_000);
        assert!(state.active_boosts.is_empty());
        assert!((state.score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn catch_up_lump_sum() {
        let mut state = GameState::new(0);
        state.owned_upgrades.insert("wheel".into(), 1); // 2/s
        let gained = catch_up(&mut state, 100_000, 1.0).unwrap();
        assert!((gained - 200.0).abs() < 1e-9);
        assert!((state.score - 200.0).abs() < 1e-9);
        assert_eq!(state.last_observed, 100_000);
    }

    #[test]
    fn catch_up_matches_sequential_ticks() {
        let mut lump = producing(1, 0);
        catch_up(&mut lump, 100_000, 1.0);

        let mut ticked = producing(1, 0);
        let mut clock = TickClock::new(0);
        for i in 1..=400u64 {
            tick(&mut ticked, &mut clock, i * 250);
        }
        assert!((lump.score - ticked.score).abs() < 1e-6);
    }

    #[test]
    fn catch_up_below_threshold_is_ignored() {
        let mut state = producing(1, 0);
        assert_eq!(catch_up(&mut state, 1_000, 1.0), None);
        assert_eq!(catch_up(&mut state, 500, 1.0), None);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.last_observed, 0);
    }

    #[test]
    fn catch_up_future_timestamp_is_ignored() {
        let mut state = producing(1, 10_000);
        assert_eq!(catch_up(&mut state, 0, 1.0), None);
    }

    #[test]
    fn catch_up_is_not_granted_twice() {
        let mut state = producing(1, 0);
        assert!(catch_up(&mut state, 60_000, 1.0).is_some());
        assert_eq!(catch_up(&mut state, 60_000, 1.0), None);
        assert!((state.score - 120.0).abs() < 1e-9);
    }
}
