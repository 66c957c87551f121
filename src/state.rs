/// GeoClicker game state definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::UPGRADES;

/// Wall-clock instant in milliseconds since the Unix epoch.
pub type Timestamp = u64;

fn one() -> f64 {
    1.0
}

/// A temporary multiplier created by a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    /// Unique per trigger: scenario id plus trigger instant.
    pub id: String,
    pub title: String,
    #[serde(default = "one")]
    pub per_action_multiplier: f64,
    #[serde(default = "one")]
    pub per_time_multiplier: f64,
    /// `None` never expires.
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl Boost {
    /// Still in effect at `now`. A boost expiring exactly at `now` is gone.
    pub fn is_active(&self, now: Timestamp) -> bool {
        match self.expires_at {
            Some(at) => at > now,
            None => true,
        }
    }

    /// Whole seconds left at `now`, rounded like the countdown display.
    pub fn remaining_secs(&self, now: Timestamp) -> Option<u64> {
        self.expires_at
            .map(|at| (at.saturating_sub(now) as f64 / 1000.0).round() as u64)
    }
}

/// The single persisted aggregate.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Spendable score.
    pub score: f64,
    /// Derived by `stats::recompute`.
    pub per_action_gain: f64,
    /// Derived by `stats::recompute`.
    pub per_time_gain: f64,
    /// Owned count per catalog upgrade id.
    pub owned_upgrades: BTreeMap<String, u32>,
    /// Trigger order.
    pub active_boosts: Vec<Boost>,
    /// Last time the state was reconciled with the wall clock.
    pub last_observed: Timestamp,
}

impl GameState {
    pub fn new(now: Timestamp) -> Self {
        let owned_upgrades = UPGRADES.iter().map(|u| (u.id.to_string(), 0)).collect();
        Self {
            score: 0.0,
            per_action_gain: 1.0,
            per_time_gain: 0.0,
            owned_upgrades,
            active_boosts: Vec::new(),
            last_observed: now,
        }
    }

    /// Owned count for `id`; ids without an entry own nothing.
    pub fn owned(&self, id: &str) -> u32 {
        self.owned_upgrades.get(id).copied().unwrap_or(0)
    }

    /// Give every catalog upgrade an entry, leaving existing counts alone.
    pub fn ensure_catalog_entries(&mut self) {
        for u in UPGRADES {
            self.owned_upgrades.entry(u.id.to_string()).or_insert(0);
        }
    }
}
