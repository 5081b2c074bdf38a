//! Read-only projections of a [`GameState`] for whatever renders it.
//!
//! Nothing here mutates or rolls dice.

use serde::{Deserialize, Serialize};

use crate::economy;
use crate::engine::{self, JumpCost};
use crate::goods::Commodity;
use crate::map::{Coordinates, NodeId};
use crate::rules::Rules;
use crate::state::GameState;

/// Units currently in the hold.
pub fn cargo_load(state: &GameState) -> u32 {
    state.ship.cargo_load()
}

/// Maximum units the hold can carry.
pub fn cargo_capacity(state: &GameState, rules: &Rules) -> u32 {
    state.ship.cargo_capacity(rules)
}

/// Profit factor the next cleansing rite would cost.
pub fn cleanse_cost(state: &GameState, rules: &Rules) -> i64 {
    engine::cleanse_cost(&state.ship, rules)
}

// ============================================================================
// TRAVEL QUOTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelQuote {
    pub cost: JumpCost,
    /// An edge leads from the current node to the target.
    pub routed: bool,
    pub affordable: bool,
}

impl TravelQuote {
    /// The jump would go through.
    pub fn possible(&self) -> bool {
        self.routed && self.affordable
    }
}

/// What a jump to `target` would cost, or `None` if the target is unknown.
pub fn travel_quote(state: &GameState, target: &NodeId, rules: &Rules) -> Option<TravelQuote> {
    let cost = engine::jump_cost(state, target, rules)?;
    let routed = state
        .current_node()
        .is_some_and(|node| node.is_connected_to(target));
    Some(TravelQuote {
        cost,
        routed,
        affordable: state.ship.fuel >= cost.fuel,
    })
}

// ============================================================================
// MARKET BOARD
// ============================================================================

/// One commodity line at the local market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRow {
    pub commodity: Commodity,
    pub buy_price: u32,
    /// What the planet pays this ship, corruption premium included.
    pub sell_price: u32,
    pub stock: u32,
    pub held: u32,
}

/// Every commodity at the docked planet, in [`Commodity::ALL`] order.
/// Empty if the ship is somehow not at a known node.
pub fn market_board(state: &GameState) -> Vec<MarketRow> {
    let Some(node) = state.current_node() else {
        return Vec::new();
    };
    let planet = &node.planet;
    Commodity::ALL
        .iter()
        .map(|&commodity| MarketRow {
            commodity,
            buy_price: planet.market.get(commodity),
            sell_price: economy::offered_price(planet, commodity, state.ship.corruption),
            stock: planet.inventory.get(commodity),
            held: state.ship.cargo.get(commodity),
        })
        .collect()
}

// ============================================================================
// CHART
// ============================================================================

/// Fog-of-war state of a node, as seen from the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// The ship is docked here.
    Current,
    Visited,
    /// Unvisited but one jump away.
    InRange,
    Uncharted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartNode {
    pub id: NodeId,
    /// `None` while uncharted.
    pub name: Option<String>,
    pub coordinates: Coordinates,
    pub visibility: Visibility,
    pub connections: Vec<NodeId>,
}

/// The star map as the captain sees it.
pub fn chart(state: &GameState) -> Vec<ChartNode> {
    let here = state.current_node();
    state
        .map
        .iter()
        .map(|node| {
            let visibility = if node.id() == &state.ship.location {
                Visibility::Current
            } else if node.visited {
                Visibility::Visited
            } else if here.is_some_and(|h| h.is_connected_to(node.id())) {
                Visibility::InRange
            } else {
                Visibility::Uncharted
            };
            ChartNode {
                id: node.id().clone(),
                name: (visibility != Visibility::Uncharted).then(|| node.planet.name.clone()),
                coordinates: node.planet.coordinates,
                visibility,
                connections: node.connections.clone(),
            }
        })
        .collect()
}

// ============================================================================
// TAINT
// ============================================================================

/// How far corruption has crept into the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaintLevel {
    /// Below 30.
    Pure,
    /// 30–59.
    Tainted,
    /// 60–89.
    Afflicted,
    /// 90 and above.
    Damned,
}

impl TaintLevel {
    pub fn of(corruption: i32) -> Self {
        match corruption {
            i32::MIN..=29 => TaintLevel::Pure,
            30..=59 => TaintLevel::Tainted,
            60..=89 => TaintLevel::Afflicted,
            _ => TaintLevel::Damned,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaintLevel::Pure => "Pure",
            TaintLevel::Tainted => "Tainted",
            TaintLevel::Afflicted => "Afflicted",
            TaintLevel::Damned => "Damned",
        }
    }
}

pub fn taint_level(state: &GameState) -> TaintLevel {
    TaintLevel::of(state.ship.corruption)
}
