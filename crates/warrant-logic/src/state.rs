//! The game state value: the single unit every command consumes and
//! produces, and the single unit of persistence.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chronicle::{Chronicle, LogCategory};
use crate::constants::messages;
use crate::map::{generate_map, MapNode, NodeId, StarMap};
use crate::rules::Rules;
use crate::ship::{Ship, Upgrades};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Demise {
    /// Hull reached 0.
    HullBreach,
    /// Corruption reached 100.
    WarpCollapse,
}

/// Everything about one run, plus the legacy points that outlive it.
///
/// Commands never mutate a state in place: they take `&GameState` and
/// return a new value, so a held reference always stays valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ship: Ship,
    pub map: StarMap,
    pub log: Chronicle,
    /// Starts at 1; +1 per completed jump.
    pub turn: u32,
    pub is_game_over: bool,
    #[serde(default)]
    pub demise: Option<Demise>,
    /// Persists across runs.
    pub legacy_points: u64,
}

impl GameState {
    /// Node the ship is docked at.
    pub fn current_node(&self) -> Option<&MapNode> {
        self.map.get(&self.ship.location)
    }

    /// Append a narrative entry stamped with the current turn.
    pub(crate) fn record(&mut self, message: impl Into<String>, category: LogCategory) {
        self.log.record(self.turn, message, category);
    }
}

/// Start a new run.
///
/// Generates a fresh map, docks a fresh ship (with upgrade bonuses) at the
/// first node, and carries `legacy_points` over unchanged.
pub fn create_new_game(
    legacy_points: u64,
    upgrades: Upgrades,
    rules: &Rules,
    rng: &mut impl Rng,
) -> GameState {
    let mut map = generate_map(rules, rng);
    // node_count >= 2 is enforced by validate_rules; an empty map only
    // arises from unvalidated rules.
    let start = map.start().cloned().unwrap_or_else(|| NodeId::new(""));
    if let Some(node) = map.get_mut(&start) {
        node.visited = true;
    }

    let mut log = Chronicle::new();
    log.record(0, messages::WARRANT_AUTHENTICATED, LogCategory::Neutral);

    log::info!(
        "New run: {} systems, start {}, legacy {}",
        map.len(),
        start,
        legacy_points
    );

    GameState {
        ship: Ship::fresh(rules, upgrades, start),
        map,
        log,
        turn: 1,
        is_game_over: false,
        demise: None,
        legacy_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_game_defaults() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = create_new_game(0, Upgrades::default(), &Rules::default(), &mut rng);
        assert_eq!(state.ship.hull, 100);
        assert_eq!(state.ship.max_hull, 100);
        assert_eq!(state.ship.fuel, 500);
        assert_eq!(state.ship.max_fuel, 500);
        assert_eq!(state.ship.supplies, 50);
        assert_eq!(state.ship.profit_factor, 1000);
        assert_eq!(state.ship.corruption, 0);
        assert_eq!(state.turn, 1);
        assert!(!state.is_game_over);
        assert_eq!(state.log.len(), 1);
        let opening = state.log.latest().unwrap();
        assert_eq!(opening.timestamp, "000.M42");
        assert_eq!(opening.category, LogCategory::Neutral);
    }

    #[test]
    fn test_starts_on_first_node_visited() {
        let mut rng = StdRng::seed_from_u64(2);
        let state = create_new_game(0, Upgrades::default(), &Rules::default(), &mut rng);
        assert_eq!(Some(&state.ship.location), state.map.start());
        assert!(state.current_node().unwrap().visited);
        assert_eq!(state.map.iter().filter(|n| n.visited).count(), 1);
    }

    #[test]
    fn test_legacy_points_carry_over() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = create_new_game(4321, Upgrades::default(), &Rules::default(), &mut rng);
        assert_eq!(state.legacy_points, 4321);
    }
}
