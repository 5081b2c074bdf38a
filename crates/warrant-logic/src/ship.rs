//! The player's vessel and its permanent upgrades.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::goods::Ledger;
use crate::map::NodeId;
use crate::rules::Rules;

/// Morale ceiling; rites cannot lift it higher.
pub const MORALE_MAX: i32 = 100;

/// Permanent upgrade levels, bought with legacy points between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Upgrades {
    /// +hull per level.
    pub reinforced_prow: u32,
    /// Lowers warp peril chance.
    pub sanctioned_navigator: u32,
    /// +starting profit factor per level.
    pub trade_mandate: u32,
    /// +cargo capacity per level.
    pub cargo_expansion: u32,
}

/// One of the four upgrade tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeTrack {
    ReinforcedProw,
    SanctionedNavigator,
    TradeMandate,
    CargoExpansion,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 4] = [
        UpgradeTrack::ReinforcedProw,
        UpgradeTrack::SanctionedNavigator,
        UpgradeTrack::TradeMandate,
        UpgradeTrack::CargoExpansion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ReinforcedProw => "Reinforced Prow",
            Self::SanctionedNavigator => "Sanctioned Navigator",
            Self::TradeMandate => "Trade Mandate",
            Self::CargoExpansion => "Cargo Expansion",
        }
    }
}

impl fmt::Display for UpgradeTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Upgrades {
    pub fn level(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::ReinforcedProw => self.reinforced_prow,
            UpgradeTrack::SanctionedNavigator => self.sanctioned_navigator,
            UpgradeTrack::TradeMandate => self.trade_mandate,
            UpgradeTrack::CargoExpansion => self.cargo_expansion,
        }
    }

    /// Copy with one track raised by a level.
    pub fn with_level_up(mut self, track: UpgradeTrack) -> Self {
        let level = match track {
            UpgradeTrack::ReinforcedProw => &mut self.reinforced_prow,
            UpgradeTrack::SanctionedNavigator => &mut self.sanctioned_navigator,
            UpgradeTrack::TradeMandate => &mut self.trade_mandate,
            UpgradeTrack::CargoExpansion => &mut self.cargo_expansion,
        };
        *level = level.saturating_add(1);
        self
    }
}

/// Ship condition, consumables, purse and hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub hull: i32,
    pub max_hull: i32,
    pub fuel: i32,
    pub max_fuel: i32,
    /// Consumed while travelling; never below 0.
    pub supplies: i32,
    /// Nominally 0–100. Penalties may push it below 0.
    pub morale: i32,
    /// 0–100+. Never below 0; reaching 100 ends the run.
    pub corruption: i32,
    /// Currency and score.
    pub profit_factor: i64,
    pub cargo: Ledger,
    pub location: NodeId,
    pub upgrades: Upgrades,
}

impl Ship {
    /// A fresh ship docked at `location`, with upgrade bonuses applied.
    pub fn fresh(rules: &Rules, upgrades: Upgrades, location: NodeId) -> Self {
        let prow = i32::try_from(upgrades.reinforced_prow).unwrap_or(i32::MAX);
        let hull = rules
            .initial_hull
            .saturating_add(rules.hull_per_reinforcement.saturating_mul(prow));
        Self {
            hull,
            max_hull: hull,
            fuel: rules.initial_fuel,
            max_fuel: rules.initial_fuel,
            supplies: rules.initial_supplies,
            morale: rules.initial_morale,
            corruption: 0,
            profit_factor: rules.initial_profit_factor.saturating_add(
                rules
                    .profit_per_mandate
                    .saturating_mul(i64::from(upgrades.trade_mandate)),
            ),
            cargo: Ledger::zeroed(),
            location,
            upgrades,
        }
    }

    /// Units currently in the hold.
    pub fn cargo_load(&self) -> u32 {
        self.cargo.total()
    }

    /// Maximum units the hold can carry.
    pub fn cargo_capacity(&self, rules: &Rules) -> u32 {
        rules
            .base_cargo_capacity
            .saturating_add(rules.cargo_per_upgrade.saturating_mul(self.upgrades.cargo_expansion))
    }

    /// Add corruption, never dropping below 0.
    pub(crate) fn shift_corruption(&mut self, delta: i32) {
        self.corruption = (self.corruption + delta).max(0);
    }
}
