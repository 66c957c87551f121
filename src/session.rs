//! The running game: state plus its collaborators, behind one `&mut self`.
//!
//! Every entry point the shell calls lives here, and each one runs to
//! completion before the next can start, so no caller ever observes a
//! half-applied mutation.

use log::{debug, info};
use rand::Rng;

use crate::accrual::{self, TickClock};
use crate::catalog::{find_upgrade, ScenarioDefinition};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::purchase::{self, PurchaseOutcome};
use crate::save::{self, SaveStore};
use crate::scenario::{self, AppliedEffect};
use crate::state::{Boost, GameState, Timestamp};
use crate::stats;

/// One line of the scenario log.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub at: Timestamp,
    pub text: String,
}

pub struct Session<S: SaveStore, R: Rng> {
    pub state: GameState,
    config: EngineConfig,
    store: S,
    rng: R,
    clock: TickClock,
    /// Newest first.
    log: Vec<LogEntry>,
}

impl<S: SaveStore, R: Rng> Session<S, R> {
    /// Load (or default) the state, then credit time spent offline.
    pub fn open(mut store: S, rng: R, config: EngineConfig, now: Timestamp) -> Self {
        let state = save::load_state(&mut store, &config.storage_key, now);
        let mut session = Self {
            state,
            config,
            store,
            rng,
            clock: TickClock::new(now),
            log: Vec::new(),
        };
        stats::recompute(&mut session.state, now);
        session.resume(now);
        session
    }

    /// Offline catch-up. Persists when anything was credited so a crash
    /// loop cannot grant the same span twice.
    pub fn resume(&mut self, now: Timestamp) -> Option<f64> {
        let gained = accrual::catch_up(&mut self.state, now, self.config.offline_threshold_secs)?;
        info!("GeoClicker: credited {gained:.2} for time away");
        self.save(now);
        Some(gained)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    fn add_log(&mut self, at: Timestamp, text: String) {
        self.log.insert(0, LogEntry { at, text });
        self.log.truncate(self.config.log_capacity);
    }

    /// One player action.
    pub fn record_action(&mut self) -> f64 {
        let gain = self.state.per_action_gain;
        self.state.score += gain;
        gain
    }

    /// Price of the next unit of `id`.
    pub fn cost(&self, id: &str) -> Result<f64, EngineError> {
        purchase::cost(&self.state, id, self.config.growth_factor)
    }

    /// Buy one unit of `id`; on success recompute, log and persist.
    pub fn purchase(&mut self, id: &str, now: Timestamp) -> Result<PurchaseOutcome, EngineError> {
        let outcome = purchase::purchase(&mut self.state, id, self.config.growth_factor)?;
        if outcome.applied {
            stats::recompute(&mut self.state, now);
            self.save(now);
            let title = find_upgrade(id)?.title;
            self.add_log(now, format!("Bought {title}"));
        }
        Ok(outcome)
    }

    /// Apply `scenario`. Non-manual triggers are persisted.
    pub fn trigger(&mut self, scenario: &ScenarioDefinition, now: Timestamp, manual: bool) -> AppliedEffect {
        let effect = scenario::trigger(&mut self.state, scenario, now);
        let text = if effect.boost.is_some() {
            format!(
                "{}: {} (for {}s)",
                scenario.title, scenario.narration, scenario.duration_secs
            )
        } else {
            format!("{}: {}", scenario.title, scenario.narration)
        };
        self.add_log(now, text);
        if !manual {
            self.save(now);
        }
        effect
    }

    /// Pick a scenario uniformly and apply it.
    pub fn trigger_random(&mut self, now: Timestamp, manual: bool) -> AppliedEffect {
        let picked = scenario::select_random(&mut self.rng);
        self.trigger(picked, now, manual)
    }

    /// Periodic roll: fires a non-manual scenario with the configured chance.
    pub fn scenario_check(&mut self, now: Timestamp) -> Option<AppliedEffect> {
        let chance = self.config.scenario_chance.clamp(0.0, 1.0);
        if self.rng.gen_bool(chance) {
            Some(self.trigger_random(now, false))
        } else {
            None
        }
    }

    /// Foreground tick.
    pub fn tick(&mut self, now: Timestamp) -> f64 {
        accrual::tick(&mut self.state, &mut self.clock, now)
    }

    pub fn autosave(&mut self, now: Timestamp) {
        debug!("GeoClicker: autosave at {now}");
        self.save(now);
    }

    /// Persist the full state, advancing `last_observed`.
    pub fn save(&mut self, now: Timestamp) {
        save::save_state(&mut self.store, &self.config.storage_key, &mut self.state, now);
    }

    /// Clear the persisted state and start over. Confirmation is the caller's job.
    pub fn reset(&mut self, now: Timestamp) {
        self.store.remove(&self.config.storage_key);
        self.state = GameState::new(now);
        self.clock = TickClock::new(now);
        self.log.clear();
        stats::recompute(&mut self.state, now);
        info!("GeoClicker: state reset");
    }

    /// Boost shown as the current scenario.
    pub fn featured_boost(&self) -> Option<&Boost> {
        scenario::soonest_expiring(&self.state)
    }
}
