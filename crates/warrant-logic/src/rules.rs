//! Tuning rules: every numeric knob of the simulation in one place.
//!
//! `Rules::default()` is the canonical balance. A host may load overrides
//! from JSON (any missing field keeps its default) and must run
//! [`validate_rules`] before starting a run with them.
//!
//! ```
//! use warrant_logic::rules::{Rules, validate_rules};
//!
//! let rules = Rules::from_json(r#"{ "node_count": 20 }"#).unwrap();
//! assert_eq!(rules.node_count, 20);
//! assert_eq!(rules.map_size, 100);
//! assert!(validate_rules(&rules).is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// Numeric tuning for map generation, ship defaults, travel, trade and
/// progression. These are parameters, not contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    // ── Map ──
    /// Coordinates are drawn from `0..map_size` on both axes.
    pub map_size: i32,
    pub node_count: usize,
    /// Nodes closer than this (strictly) are connected.
    pub connection_distance: f64,

    // ── Fresh ship ──
    pub initial_hull: i32,
    pub initial_fuel: i32,
    pub initial_supplies: i32,
    pub initial_profit_factor: i64,
    pub initial_morale: i32,

    // ── Cargo ──
    pub base_cargo_capacity: u32,
    pub cargo_per_upgrade: u32,

    // ── Travel costs per unit of distance ──
    pub fuel_cost_rate: f64,
    pub supplies_cost_rate: f64,

    // ── Cleansing rites ──
    pub cleanse_base_cost: i64,
    pub cleanse_amount: i32,

    // ── Upgrades ──
    pub hull_per_reinforcement: i32,
    pub profit_per_mandate: i64,
    /// Peril chance (percentage points) removed per navigator level.
    pub peril_reduction_per_navigator: f64,
    /// Legacy cost of the n-th level is `upgrade_cost_step * n`.
    pub upgrade_cost_step: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            map_size: 100,
            node_count: 15,
            connection_distance: 35.0,
            initial_hull: 100,
            initial_fuel: 500,
            initial_supplies: 50,
            initial_profit_factor: 1000,
            initial_morale: 100,
            base_cargo_capacity: 250,
            cargo_per_upgrade: 50,
            fuel_cost_rate: 1.0,
            supplies_cost_rate: 0.5,
            cleanse_base_cost: 200,
            cleanse_amount: 10,
            hull_per_reinforcement: 20,
            profit_per_mandate: 200,
            peril_reduction_per_navigator: 5.0,
            upgrade_cost_step: 1000,
        }
    }
}

impl Rules {
    /// Parse rules from JSON, then validate them.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let rules: Rules = serde_json::from_str(json)?;
        if let Some(err) = validate_rules(&rules).into_iter().next() {
            return Err(err);
        }
        Ok(rules)
    }
}

/// A rules value that would break the simulation.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("rules document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map_size must be positive, got {0}")]
    MapSize(i32),
    #[error("node_count must be at least 2, got {0}")]
    NodeCount(usize),
    #[error("connection_distance must be positive, got {0}")]
    ConnectionDistance(f64),
    #[error("initial_hull must be positive, got {0}")]
    InitialHull(i32),
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
}

/// Validate a rule set, returning all errors found.
pub fn validate_rules(rules: &Rules) -> Vec<RulesError> {
    let mut errors = Vec::new();

    if rules.map_size <= 0 {
        errors.push(RulesError::MapSize(rules.map_size));
    }
    if rules.node_count < 2 {
        errors.push(RulesError::NodeCount(rules.node_count));
    }
    if rules.connection_distance.is_nan() || rules.connection_distance <= 0.0 {
        errors.push(RulesError::ConnectionDistance(rules.connection_distance));
    }
    if rules.initial_hull <= 0 {
        errors.push(RulesError::InitialHull(rules.initial_hull));
    }

    let non_negative: [(&'static str, bool); 10] = [
        ("initial_fuel", rules.initial_fuel >= 0),
        ("initial_supplies", rules.initial_supplies >= 0),
        ("initial_profit_factor", rules.initial_profit_factor >= 0),
        ("fuel_cost_rate", rules.fuel_cost_rate >= 0.0),
        ("supplies_cost_rate", rules.supplies_cost_rate >= 0.0),
        ("cleanse_base_cost", rules.cleanse_base_cost >= 0),
        ("cleanse_amount", rules.cleanse_amount >= 0),
        ("hull_per_reinforcement", rules.hull_per_reinforcement >= 0),
        ("profit_per_mandate", rules.profit_per_mandate >= 0),
        (
            "peril_reduction_per_navigator",
            rules.peril_reduction_per_navigator >= 0.0,
        ),
    ];
    for (field, ok) in non_negative {
        if !ok {
            errors.push(RulesError::Negative { field });
        }
    }

    errors
}
