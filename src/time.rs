//! Fixed-cadence scheduling using an accumulator pattern.
//!
//! `draw_web()` calls at ~60fps with variable delta. Each `Cadence` converts
//! this into a whole number of firings of one periodic job; `Scheduler`
//! bundles the jobs the game runs (foreground tick, scenario roll, autosave).
//! The engine itself never looks at timers, only at the timestamps it is handed.

use crate::config::EngineConfig;

pub struct Cadence {
    /// Milliseconds between firings.
    period_ms: f64,
    /// Accumulated milliseconds not yet consumed as firings.
    accumulator: f64,
    /// Frame gaps longer than this are clamped.
    max_gap_ms: f64,
    /// Timestamp of the last update (ms), None if first frame.
    last_timestamp: Option<f64>,
}

impl Cadence {
    pub fn new(period_ms: f64, max_gap_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            accumulator: 0.0,
            max_gap_ms,
            last_timestamp: None,
        }
    }

    /// Feed a frame timestamp. Returns how many firings are due.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_gap_ms),
            None => 0.0, // First frame: no delta
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let fired = (self.accumulator / self.period_ms) as u32;
        self.accumulator -= fired as f64 * self.period_ms;
        fired
    }
}

/// Jobs due this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Due {
    pub tick: bool,
    pub scenario_checks: u32,
    pub autosave: bool,
}

pub struct Scheduler {
    tick: Cadence,
    scenario: Cadence,
    autosave: Cadence,
}

impl Scheduler {
    pub fn new(config: &EngineConfig) -> Self {
        // Long periods need a gap allowance of at least one period or a
        // throttled tab would never reach them.
        let gap = config.max_frame_gap_ms;
        Self {
            tick: Cadence::new(config.tick_interval_ms(), gap),
            scenario: Cadence::new(
                config.scenario_check_interval_ms as f64,
                gap.max(config.scenario_check_interval_ms as f64),
            ),
            autosave: Cadence::new(
                config.autosave_interval_ms as f64,
                gap.max(config.autosave_interval_ms as f64),
            ),
        }
    }

    pub fn poll(&mut self, now_ms: f64) -> Due {
        Due {
            // Accrual uses wall-clock elapsed time, so one tick covers any backlog.
            tick: self.tick.update(now_ms) > 0,
            scenario_checks: self.scenario.update(now_ms),
            autosave: self.autosave.update(now_ms) > 0,
        }
    }
}
