/// Tunable engine constants.

/// Cost multiplier applied per already-owned unit of an upgrade.
pub const COST_GROWTH_FACTOR: f64 = 1.6;

/// Foreground ticks per second.
pub const TICKS_PER_SEC: u32 = 4;

/// Autosave period in milliseconds.
pub const AUTOSAVE_INTERVAL_MS: u64 = 10_000;

/// How often the scheduler rolls for a random scenario, in milliseconds.
pub const SCENARIO_CHECK_INTERVAL_MS: u64 = 12_000;

/// Probability that a scenario check fires.
pub const SCENARIO_CHANCE: f64 = 0.12;

/// Offline spans shorter than this (seconds) are not credited on resume.
pub const OFFLINE_THRESHOLD_SECS: f64 = 1.0;

/// localStorage key.
pub const STORAGE_KEY: &str = "geoclicker_v1";

/// Scenario log lines kept in memory.
pub const LOG_CAPACITY: usize = 50;

/// Largest frame gap (ms) a cadence will replay. A backgrounded tab must not
/// fire a burst of queued scenario rolls when it comes back.
pub const MAX_FRAME_GAP_MS: f64 = 500.0;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub growth_factor: f64,
    pub ticks_per_sec: u32,
    pub autosave_interval_ms: u64,
    pub scenario_check_interval_ms: u64,
    pub scenario_chance: f64,
    pub offline_threshold_secs: f64,
    pub storage_key: String,
    pub log_capacity: usize,
    pub max_frame_gap_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            growth_factor: COST_GROWTH_FACTOR,
            ticks_per_sec: TICKS_PER_SEC,
            autosave_interval_ms: AUTOSAVE_INTERVAL_MS,
            scenario_check_interval_ms: SCENARIO_CHECK_INTERVAL_MS,
            scenario_chance: SCENARIO_CHANCE,
            offline_threshold_secs: OFFLINE_THRESHOLD_SECS,
            storage_key: STORAGE_KEY.to_string(),
            log_capacity: LOG_CAPACITY,
            max_frame_gap_ms: MAX_FRAME_GAP_MS,
        }
    }
}

impl EngineConfig {
    /// Milliseconds between foreground ticks.
    pub fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.ticks_per_sec.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let cfg = EngineConfig::default();
        assert!((cfg.growth_factor - 1.6).abs() < f64::EPSILON);
        assert_eq!(cfg.storage_key, "geoclicker_v1");
        assert!((cfg.tick_interval_ms() - 250.0).abs() < 0.001);
    }

    #[test]
    fn zero_tick_rate_does_not_divide_by_zero() {
        let cfg = EngineConfig {
            ticks_per_sec: 0,
            ..EngineConfig::default()
        };
        assert!((cfg.tick_interval_ms() - 1000.0).abs() < 0.001);
    }
}
