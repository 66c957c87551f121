//! Static upgrade and scenario tables.

use crate::error::EngineError;

/// A repeatably purchasable upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Cost of the first unit.
    pub base_cost: f64,
    /// Added to per-action gain per owned unit.
    pub per_action_bonus: f64,
    /// Added to per-second gain per owned unit.
    pub per_time_bonus: f64,
}

/// What a scenario does when triggered. Unset multipliers count as 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioEffect {
    pub per_action_multiplier: Option<f64>,
    pub per_time_multiplier: Option<f64>,
    pub immediate_score_delta: Option<f64>,
}

impl ScenarioEffect {
    pub fn has_multiplier(&self) -> bool {
        self.per_action_multiplier.is_some() || self.per_time_multiplier.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub narration: &'static str,
    pub effect: ScenarioEffect,
    /// 0 means a one-shot event that creates no boost.
    pub duration_secs: u32,
}

pub const UPGRADES: &[UpgradeDefinition] = &[
    UpgradeDefinition {
        id: "cursor",
        title: "Cursor",
        description: "Auto-generate shapes",
        base_cost: 15.0,
        per_action_bonus: 0.0,
        per_time_bonus: 0.1,
    },
    UpgradeDefinition {
        id: "brush",
        title: "Brush",
        description: "Better clicks",
        base_cost: 100.0,
        per_action_bonus: 1.0,
        per_time_bonus: 0.0,
    },
    UpgradeDefinition {
        id: "wheel",
        title: "Wheel",
        description: "Faster shapes/sec",
        base_cost: 500.0,
        per_action_bonus: 0.0,
        per_time_bonus: 2.0,
    },
    UpgradeDefinition {
        id: "factory",
        title: "Factory",
        description: "Big auto production",
        base_cost: 3000.0,
        per_action_bonus: 0.0,
        per_time_bonus: 15.0,
    },
];

pub const SCENARIOS: &[ScenarioDefinition] = &[
    ScenarioDefinition {
        id: "inspire",
        title: "Inspiration!",
        narration: "Clicks are twice as powerful for a while.",
        effect: ScenarioEffect {
            per_action_multiplier: Some(2.0),
            per_time_multiplier: None,
            immediate_score_delta: None,
        },
        duration_secs: 15,
    },
    ScenarioDefinition {
        id: "rush",
        title: "Production Rush",
        narration: "Auto production doubled!",
        effect: ScenarioEffect {
            per_action_multiplier: None,
            per_time_multiplier: Some(2.0),
            immediate_score_delta: None,
        },
        duration_secs: 20,
    },
    ScenarioDefinition {
        id: "market",
        title: "Market Boom",
        narration: "You found extra shapes!",
        effect: ScenarioEffect {
            per_action_multiplier: None,
            per_time_multiplier: None,
            immediate_score_delta: Some(250.0),
        },
        duration_secs: 0,
    },
    ScenarioDefinition {
        id: "cold",
        title: "Slowdown",
        narration: "Production slowed temporarily.",
        effect: ScenarioEffect {
            per_action_multiplier: None,
            per_time_multiplier: Some(0.5),
            immediate_score_delta: None,
        },
        duration_secs: 18,
    },
];

pub fn find_upgrade(id: &str) -> Result<&'static UpgradeDefinition, EngineError> {
    UPGRADES
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| EngineError::InvalidUpgrade(id.to_string()))
}

pub fn find_scenario(id: &str) -> Result<&'static ScenarioDefinition, EngineError> {
    SCENARIOS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| EngineError::InvalidScenario(id.to_string()))
}
