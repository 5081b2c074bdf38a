//! Commodities, planet types, and the per-commodity ledger used for markets,
//! planetary stock, and ship cargo.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// COMMODITIES
// ============================================================================

/// A tradeable good. The set is closed: every table keyed by commodity is
/// an exhaustive `match`, so adding a variant breaks the build until each
/// table covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Commodity {
    Promethium = 0,
    /// Corpse-starch rations.
    Food = 1,
    /// Manufactorum parts.
    Parts = 2,
    /// Xenos artifacts (illicit).
    Artifacts = 3,
    /// Warp-relics (illicit).
    Relics = 4,
    /// Narthecium supplies.
    Medicine = 5,
}

impl Commodity {
    pub const ALL: [Commodity; 6] = [
        Commodity::Promethium,
        Commodity::Food,
        Commodity::Parts,
        Commodity::Artifacts,
        Commodity::Relics,
        Commodity::Medicine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Promethium => "Promethium",
            Self::Food => "Corpse-Starch",
            Self::Parts => "Manufactorum Parts",
            Self::Artifacts => "Xenos Artifacts",
            Self::Relics => "Warp-Relics",
            Self::Medicine => "Narthecium Supplies",
        }
    }

    /// Goods whose sale may taint the ship.
    pub fn is_illicit(&self) -> bool {
        matches!(self, Self::Artifacts | Self::Relics)
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        Self::ALL.get(val as usize).copied()
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// PLANET TYPES
// ============================================================================

/// Planet "personality" that drives its market modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlanetType {
    ForgeWorld = 0,
    HiveWorld = 1,
    AgriWorld = 2,
    DeathWorld = 3,
    FrontierOutpost = 4,
}

impl PlanetType {
    pub const ALL: [PlanetType; 5] = [
        PlanetType::ForgeWorld,
        PlanetType::HiveWorld,
        PlanetType::AgriWorld,
        PlanetType::DeathWorld,
        PlanetType::FrontierOutpost,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::ForgeWorld => "Forge World",
            Self::HiveWorld => "Hive World",
            Self::AgriWorld => "Agri-World",
            Self::DeathWorld => "Death World",
            Self::FrontierOutpost => "Frontier Outpost",
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        Self::ALL.get(val as usize).copied()
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// LEDGER
// ============================================================================

/// Unit counts (or unit prices) per commodity.
///
/// Always holds an entry for every commodity; reads of a missing entry
/// (e.g. from a hand-edited snapshot) yield 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(BTreeMap<Commodity, u32>);

impl Ledger {
    /// A ledger with every commodity at zero.
    pub fn zeroed() -> Self {
        Self(Commodity::ALL.iter().map(|&c| (c, 0)).collect())
    }

    pub fn get(&self, commodity: Commodity) -> u32 {
        self.0.get(&commodity).copied().unwrap_or(0)
    }

    pub fn set(&mut self, commodity: Commodity, value: u32) {
        self.0.insert(commodity, value);
    }

    pub fn add(&mut self, commodity: Commodity, amount: u32) {
        let entry = self.0.entry(commodity).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Remove up to `amount` units, returning how many were actually removed.
    pub fn take(&mut self, commodity: Commodity, amount: u32) -> u32 {
        let entry = self.0.entry(commodity).or_insert(0);
        let taken = amount.min(*entry);
        *entry -= taken;
        taken
    }

    /// Sum over all commodities.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Commodity, u32)> + '_ {
        Commodity::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_u8_roundtrip() {
        for c in Commodity::ALL {
            assert_eq!(Commodity::from_u8(c as u8), Some(c));
        }
        assert_eq!(Commodity::from_u8(6), None);
    }

    #[test]
    fn test_planet_type_u8_roundtrip() {
        for t in PlanetType::ALL {
            assert_eq!(PlanetType::from_u8(t as u8), Some(t));
        }
        assert_eq!(PlanetType::from_u8(5), None);
    }

    #[test]
    fn test_only_artifacts_and_relics_are_illicit() {
        let illicit: Vec<_> = Commodity::ALL.iter().filter(|c| c.is_illicit()).collect();
        assert_eq!(illicit, vec![&Commodity::Artifacts, &Commodity::Relics]);
    }

    #[test]
    fn test_ledger_zeroed_covers_everything() {
        let ledger = Ledger::zeroed();
        assert_eq!(ledger.iter().count(), 6);
        assert_eq!(ledger.total(), 0);
    }

    #[test]
    fn test_ledger_take_is_bounded() {
        let mut ledger = Ledger::zeroed();
        ledger.add(Commodity::Parts, 4);
        assert_eq!(ledger.take(Commodity::Parts, 10), 4);
        assert_eq!(ledger.get(Commodity::Parts), 0);
    }

    #[test]
    fn test_ledger_total() {
        let mut ledger = Ledger::zeroed();
        ledger.add(Commodity::Food, 3);
        ledger.add(Commodity::Relics, 7);
        assert_eq!(ledger.total(), 10);
    }
}
