//! Turn engine: the four player commands and how each one turns a game
//! state into the next.
//!
//! Every command takes the current state by reference and returns a new
//! state. Commands are total: a rejected command (not enough fuel, funds,
//! stock, cargo room…) returns the same numbers plus one `Danger` log entry
//! saying why. Once the run is over every command is a no-op.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use warrant_logic::engine::{apply, Command};
//! use warrant_logic::goods::Commodity;
//! use warrant_logic::rules::Rules;
//! use warrant_logic::ship::Upgrades;
//! use warrant_logic::state::create_new_game;
//!
//! let rules = Rules::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = create_new_game(0, Upgrades::default(), &rules, &mut rng);
//!
//! let buy = Command::Buy { commodity: Commodity::Food, quantity: 5 };
//! let next = apply(&state, &buy, &rules, &mut rng);
//! assert_eq!(next.ship.cargo.get(Commodity::Food), 5);
//! assert_eq!(state.ship.cargo.get(Commodity::Food), 0);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chronicle::LogCategory;
use crate::constants::{self, messages};
use crate::economy;
use crate::goods::Commodity;
use crate::legacy::legacy_award;
use crate::map::NodeId;
use crate::peril::{apply_peril, roll_peril};
use crate::rules::Rules;
use crate::ship::{Ship, MORALE_MAX};
use crate::state::{Demise, GameState};

/// Corruption at which the Geller field fails.
pub const CORRUPTION_LIMIT: i32 = 100;
/// Morale lost when a jump leaves the ship without supplies.
pub const STARVATION_MORALE: i32 = 10;
/// Morale restored by a cleansing rite.
pub const CLEANSE_MORALE: i32 = 5;
/// Corruption added when illicit goods taint a sale.
pub const TAINT_CORRUPTION: i32 = 2;
/// A sale of illicit goods taints the ship when a uniform roll exceeds this.
pub const TAINT_THRESHOLD: f64 = 0.7;

/// One player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Travel { target: NodeId },
    Buy { commodity: Commodity, quantity: u32 },
    Sell { commodity: Commodity, quantity: u32 },
    Cleanse,
}

/// Resolve one command.
pub fn apply(state: &GameState, command: &Command, rules: &Rules, rng: &mut impl Rng) -> GameState {
    match command {
        Command::Travel { target } => travel_to(state, target, rules, rng),
        Command::Buy {
            commodity,
            quantity,
        } => buy(state, *commodity, *quantity, rules, rng),
        Command::Sell {
            commodity,
            quantity,
        } => sell(state, *commodity, *quantity, rng),
        Command::Cleanse => cleanse(state, rules, rng),
    }
}

/// Fuel and supplies a jump will burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpCost {
    pub distance: f64,
    pub fuel: i32,
    pub supplies: i32,
}

impl JumpCost {
    pub fn for_distance(distance: f64, rules: &Rules) -> Self {
        Self {
            distance,
            fuel: (distance * rules.fuel_cost_rate).ceil() as i32,
            supplies: (distance * rules.supplies_cost_rate).ceil() as i32,
        }
    }
}

/// Cost of jumping from the current node to `target`, if both exist.
pub fn jump_cost(state: &GameState, target: &NodeId, rules: &Rules) -> Option<JumpCost> {
    let distance = state.map.distance(&state.ship.location, target)?;
    Some(JumpCost::for_distance(distance, rules))
}

/// Profit factor a cleansing rite costs right now.
///
/// `floor(base × (1 + corruption / 50))`. Deep stains cost more.
pub fn cleanse_cost(ship: &Ship, rules: &Rules) -> i64 {
    let scale = 1.0 + ship.corruption.max(0) as f64 / 50.0;
    (rules.cleanse_base_cost as f64 * scale).floor() as i64
}

fn finished(state: &GameState, command: &str) -> Option<GameState> {
    if state.is_game_over {
        log::debug!("Ignoring {} after the run has ended", command);
        return Some(state.clone());
    }
    None
}

fn rejected(state: &GameState, message: impl Into<String>) -> GameState {
    let mut next = state.clone();
    next.record(message, LogCategory::Danger);
    next
}

// ============================================================================
// TRAVEL
// ============================================================================

/// Jump to a neighbouring node.
///
/// Burns fuel and supplies, starves the crew if supplies run out, rolls the
/// warp exactly once, then docks at `target` and advances the turn. Ends the
/// run if the hull is gone or, failing that, if corruption reached the limit.
pub fn travel_to(
    state: &GameState,
    target: &NodeId,
    rules: &Rules,
    rng: &mut impl Rng,
) -> GameState {
    if let Some(same) = finished(state, "travel") {
        return same;
    }

    let routed = state
        .current_node()
        .is_some_and(|node| node.is_connected_to(target));
    let cost = match jump_cost(state, target, rules) {
        Some(cost) if routed => cost,
        _ => return rejected(state, messages::NO_ROUTE),
    };
    if state.ship.fuel < cost.fuel {
        return rejected(state, messages::NO_FUEL);
    }

    let mut next = state.clone();

    next.ship.fuel -= cost.fuel;
    next.ship.supplies = (next.ship.supplies - cost.supplies).max(0);
    if next.ship.supplies == 0 {
        next.ship.morale -= STARVATION_MORALE;
        next.record(messages::STARVATION, LogCategory::Danger);
    }

    let outcome = roll_peril(&next.ship, rules, rng);
    apply_peril(&mut next, outcome);

    next.ship.location = target.clone();
    if let Some(node) = next.map.get_mut(target) {
        node.visited = true;
    }
    next.turn += 1;

    let flavor = constants::pick(constants::TRAVEL_FLAVOR, rng);
    next.record(flavor, LogCategory::Neutral);

    if next.ship.hull <= 0 {
        end_run(&mut next, Demise::HullBreach);
    } else if next.ship.corruption >= CORRUPTION_LIMIT {
        end_run(&mut next, Demise::WarpCollapse);
    }

    next
}

fn end_run(state: &mut GameState, demise: Demise) {
    let award = legacy_award(state.ship.profit_factor, demise);
    state.is_game_over = true;
    state.demise = Some(demise);
    state.legacy_points = state.legacy_points.saturating_add(award);
    match demise {
        Demise::HullBreach => state.record(messages::HULL_LOST, LogCategory::Danger),
        Demise::WarpCollapse => state.record(messages::GELLER_COLLAPSE, LogCategory::Warp),
    }
    log::info!(
        "Run over on turn {}: {:?}, {} PF, +{} legacy",
        state.turn,
        demise,
        state.ship.profit_factor,
        award
    );
}

// ============================================================================
// TRADE
// ============================================================================

/// Buy `quantity` units from the local market at its current price.
pub fn buy(
    state: &GameState,
    commodity: Commodity,
    quantity: u32,
    rules: &Rules,
    rng: &mut impl Rng,
) -> GameState {
    if let Some(same) = finished(state, "buy") {
        return same;
    }
    if quantity == 0 {
        return rejected(state, messages::EMPTY_MANIFEST);
    }

    let capacity = state.ship.cargo_capacity(rules) as u64;
    if state.ship.cargo_load() as u64 + quantity as u64 > capacity {
        return rejected(state, messages::CARGO_FULL);
    }

    let mut next = state.clone();
    let location = next.ship.location.clone();
    let Some(node) = next.map.get_mut(&location) else {
        log::warn!("Ship docked at unknown node {}", location);
        let flavor = constants::pick(constants::FAIL_FLAVOR, rng);
        return rejected(state, format!("{flavor} (No market in range)"));
    };
    let planet = &mut node.planet;

    let total = planet.market.get(commodity) as i64 * quantity as i64;
    if next.ship.profit_factor < total || planet.inventory.get(commodity) < quantity {
        let flavor = constants::pick(constants::FAIL_FLAVOR, rng);
        return rejected(state, format!("{flavor} (Insufficient funds/stock)"));
    }

    next.ship.profit_factor -= total;
    next.ship.cargo.add(commodity, quantity);
    planet.inventory.take(commodity, quantity);

    let flavor = constants::pick(constants::BUY_FLAVOR, rng);
    next.record(
        format!("{flavor} ({quantity} {commodity}, -{total} PF)"),
        LogCategory::Success,
    );
    next
}

/// Sell `quantity` units from the hold to the local market.
///
/// Corruption earns an unscrupulous premium (see
/// [`economy::offered_price`]). Selling illicit goods may taint the ship.
pub fn sell(
    state: &GameState,
    commodity: Commodity,
    quantity: u32,
    rng: &mut impl Rng,
) -> GameState {
    if let Some(same) = finished(state, "sell") {
        return same;
    }
    if quantity == 0 {
        return rejected(state, messages::EMPTY_MANIFEST);
    }
    if state.ship.cargo.get(commodity) < quantity {
        return rejected(state, messages::NO_CARGO);
    }

    let mut next = state.clone();
    let location = next.ship.location.clone();
    let Some(node) = next.map.get_mut(&location) else {
        log::warn!("Ship docked at unknown node {}", location);
        let flavor = constants::pick(constants::FAIL_FLAVOR, rng);
        return rejected(state, format!("{flavor} (No market in range)"));
    };
    let planet = &mut node.planet;

    let price = economy::offered_price(planet, commodity, next.ship.corruption);
    let total = price as i64 * quantity as i64;

    next.ship.cargo.take(commodity, quantity);
    next.ship.profit_factor += total;
    planet.inventory.add(commodity, quantity);

    let flavor = constants::pick(constants::SELL_FLAVOR, rng);
    next.record(
        format!("{flavor} ({quantity} {commodity}, +{total} PF)"),
        LogCategory::Success,
    );

    if commodity.is_illicit() && rng.gen::<f64>() > TAINT_THRESHOLD {
        next.ship.shift_corruption(TAINT_CORRUPTION);
        next.record(messages::LINGERING_TAINT, LogCategory::Warp);
    }

    next
}

// ============================================================================
// CLEANSE
// ============================================================================

/// Pay for a rite that scrubs corruption and lifts morale.
pub fn cleanse(state: &GameState, rules: &Rules, rng: &mut impl Rng) -> GameState {
    if let Some(same) = finished(state, "cleanse") {
        return same;
    }

    let cost = cleanse_cost(&state.ship, rules);
    if state.ship.corruption <= 0 || state.ship.profit_factor < cost {
        return rejected(state, messages::RITUAL_DENIED);
    }

    let mut next = state.clone();
    next.ship.profit_factor -= cost;
    next.ship.shift_corruption(-rules.cleanse_amount);
    next.ship.morale = (next.ship.morale + CLEANSE_MORALE).min(MORALE_MAX);

    let flavor = constants::pick(constants::CLEANSE_FLAVOR, rng);
    next.record(flavor, LogCategory::Success);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronicle::stamp;
    use crate::constants::TRAVEL_FLAVOR;
    use crate::goods::{Ledger, PlanetType};
    use crate::map::{Coordinates, MapNode, Planet, StarMap};
    use crate::ship::Upgrades;
    use crate::state::create_new_game;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn node(id: &str, x: i32, y: i32, links: &[&str]) -> MapNode {
        let mut market = Ledger::zeroed();
        let mut inventory = Ledger::zeroed();
        for c in Commodity::ALL {
            market.set(c, 100);
            inventory.set(c, 30);
        }
        market.set(Commodity::Promethium, 60);
        MapNode {
            planet: Planet {
                id: NodeId::new(id),
                name: id.to_uppercase(),
                planet_type: PlanetType::HiveWorld,
                coordinates: Coordinates { x, y },
                market,
                inventory,
                description: String::new(),
            },
            visited: id == "home",
            connections: links.iter().map(|l| NodeId::new(*l)).collect(),
        }
    }

    /// home (0,0) links near (30,40) and far (90,0); "lone" (99,99) is unlinked.
    fn fixture() -> GameState {
        let rules = Rules::default();
        let mut state = create_new_game(0, Upgrades::default(), &rules, &mut rng());
        state.map = StarMap::from_nodes(vec![
            node("home", 0, 0, &["near", "far"]),
            node("near", 30, 40, &["home"]),
            node("far", 90, 0, &["home"]),
            node("lone", 99, 99, &[]),
        ]);
        state.ship.location = NodeId::new("home");
        state
    }

    fn quiet_travel(state: &GameState, target: &str) -> GameState {
        // A navigator this good keeps the warp quiet at low corruption.
        let mut calm = state.clone();
        calm.ship.upgrades.sanctioned_navigator = 100;
        let mut next = travel_to(&calm, &NodeId::new(target), &Rules::default(), &mut rng());
        next.ship.upgrades = state.ship.upgrades;
        next
    }

    // ── Travel ──

    #[test]
    fn test_travel_burns_fuel_and_supplies() {
        let state = fixture();
        let next = quiet_travel(&state, "near");
        // distance 50 → fuel 50, supplies 25
        assert_eq!(next.ship.fuel, 450);
        assert_eq!(next.ship.supplies, 25);
        assert_eq!(next.ship.location, NodeId::new("near"));
        assert_eq!(next.turn, 2);
        assert!(next.map.get(&NodeId::new("near")).unwrap().visited);
    }

    #[test]
    fn test_travel_leaves_input_untouched() {
        let state = fixture();
        let before = state.clone();
        let _ = quiet_travel(&state, "near");
        assert_eq!(state, before);
    }

    #[test]
    fn test_travel_without_fuel_rejected() {
        let mut state = fixture();
        state.ship.fuel = 49;
        let next = travel_to(&state, &NodeId::new("near"), &Rules::default(), &mut rng());
        assert_eq!(next.ship.fuel, 49);
        assert_eq!(next.ship.location, state.ship.location);
        assert_eq!(next.turn, state.turn);
        assert_eq!(next.log.len(), state.log.len() + 1);
        let entry = next.log.latest().unwrap();
        assert_eq!(entry.category, LogCategory::Danger);
        assert_eq!(entry.message, messages::NO_FUEL);
    }

    #[test]
    fn test_travel_to_unlinked_node_rejected() {
        let state = fixture();
        for target in ["lone", "home", "nowhere"] {
            let next = travel_to(&state, &NodeId::new(target), &Rules::default(), &mut rng());
            assert_eq!(next.ship, state.ship, "target {target}");
            assert_eq!(next.turn, state.turn);
            assert_eq!(next.log.latest().unwrap().message, messages::NO_ROUTE);
        }
    }

    #[test]
    fn test_starvation() {
        let mut state = fixture();
        state.ship.supplies = 10;
        let next = quiet_travel(&state, "near");
        assert_eq!(next.ship.supplies, 0);
        assert_eq!(next.ship.morale, 90);
        assert!(next.log.entries().any(|e| e.message == messages::STARVATION));
    }

    #[test]
    fn test_travel_logs_starvation_then_peril_then_arrival() {
        let mut state = fixture();
        state.ship.supplies = 1;
        state.ship.corruption = 40;
        let rules = Rules::default();

        let mut manifestations = 0;
        for seed in 0..64 {
            let next = travel_to(
                &state,
                &NodeId::new("near"),
                &rules,
                &mut StdRng::seed_from_u64(seed),
            );
            assert_eq!(next.turn, state.turn + 1);

            let added: Vec<_> = next
                .log
                .entries()
                .take(next.log.len() - state.log.len())
                .collect();
            let oldest_first: Vec<_> = added.into_iter().rev().collect();
            let (first, last) = (oldest_first[0], oldest_first[oldest_first.len() - 1]);

            assert_eq!(first.message, messages::STARVATION);
            assert_eq!(first.timestamp, stamp(state.turn));
            assert!(TRAVEL_FLAVOR.contains(&last.message.as_str()));
            assert_eq!(last.category, LogCategory::Neutral);
            assert_eq!(last.timestamp, stamp(next.turn));

            // At most one warp entry, always between the two.
            assert!(oldest_first.len() <= 3, "seed {}: {} entries", seed, oldest_first.len());
            if oldest_first.len() == 3 {
                let peril = oldest_first[1];
                assert_eq!(peril.timestamp, stamp(state.turn));
                if peril.message.starts_with("Manifestation") {
                    assert_eq!(peril.category, LogCategory::Danger);
                    assert_eq!(next.ship.corruption, 44);
                    assert!(next.ship.hull < state.ship.hull);
                    manifestations += 1;
                }
            }
        }
        assert!(manifestations > 0);
    }

    #[test]
    fn test_hull_breach_ends_run() {
        let mut state = fixture();
        state.ship.hull = 0;
        state.ship.profit_factor = 1234;
        let next = quiet_travel(&state, "near");
        assert!(next.is_game_over);
        assert_eq!(next.demise, Some(Demise::HullBreach));
        assert_eq!(next.legacy_points, 123);
        assert_eq!(next.log.latest().unwrap().message, messages::HULL_LOST);
    }

    #[test]
    fn test_corruption_collapse_ends_run() {
        let mut state = fixture();
        state.ship.corruption = 150;
        state.ship.profit_factor = 1234;
        let next = quiet_travel(&state, "near");
        assert!(next.is_game_over);
        assert_eq!(next.demise, Some(Demise::WarpCollapse));
        assert_eq!(next.legacy_points, 61);
        assert_eq!(next.log.latest().unwrap().category, LogCategory::Warp);
    }

    #[test]
    fn test_hull_breach_wins_tie() {
        let mut state = fixture();
        state.ship.hull = -5;
        state.ship.corruption = 150;
        state.ship.profit_factor = 1000;
        let next = quiet_travel(&state, "near");
        assert_eq!(next.demise, Some(Demise::HullBreach));
        assert_eq!(next.legacy_points, 100);
    }

    #[test]
    fn test_game_over_gates_every_command() {
        let mut state = fixture();
        state.is_game_over = true;
        state.ship.cargo.set(Commodity::Food, 5);
        state.ship.corruption = 40;
        let rules = Rules::default();
        let commands = [
            Command::Travel {
                target: NodeId::new("near"),
            },
            Command::Buy {
                commodity: Commodity::Food,
                quantity: 1,
            },
            Command::Sell {
                commodity: Commodity::Food,
                quantity: 1,
            },
            Command::Cleanse,
        ];
        for command in &commands {
            let next = apply(&state, command, &rules, &mut rng());
            assert_eq!(next, state, "{command:?}");
        }
    }

    // ── Buy ──

    #[test]
    fn test_buy_promethium() {
        let state = fixture();
        let next = buy(&state, Commodity::Promethium, 5, &Rules::default(), &mut rng());
        assert_eq!(next.ship.profit_factor, 700);
        assert_eq!(next.ship.cargo.get(Commodity::Promethium), 5);
        let home = next.map.get(&NodeId::new("home")).unwrap();
        assert_eq!(home.planet.inventory.get(Commodity::Promethium), 25);
        assert_eq!(next.log.len(), state.log.len() + 1);
        let entry = next.log.latest().unwrap();
        assert_eq!(entry.category, LogCategory::Success);
        assert!(entry.message.contains("5 Promethium, -300 PF"));
    }

    #[test]
    fn test_buy_over_capacity_rejected() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Parts, 248);
        let next = buy(&state, Commodity::Food, 3, &Rules::default(), &mut rng());
        assert_eq!(next.ship, state.ship);
        assert_eq!(next.log.latest().unwrap().message, messages::CARGO_FULL);
    }

    #[test]
    fn test_buy_uses_cargo_expansion() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Parts, 248);
        state.ship.upgrades.cargo_expansion = 1;
        let next = buy(&state, Commodity::Food, 3, &Rules::default(), &mut rng());
        assert_eq!(next.ship.cargo.get(Commodity::Food), 3);
    }

    #[test]
    fn test_buy_with_huge_cargo_expansion() {
        let mut state = fixture();
        state.ship.upgrades.cargo_expansion = 100_000_000;
        let next = buy(&state, Commodity::Food, 1, &Rules::default(), &mut rng());
        assert_eq!(next.ship.cargo.get(Commodity::Food), 1);
    }

    #[test]
    fn test_buy_without_funds_rejected() {
        let mut state = fixture();
        state.ship.profit_factor = 99;
        let next = buy(&state, Commodity::Parts, 1, &Rules::default(), &mut rng());
        assert_eq!(next.ship, state.ship);
        let entry = next.log.latest().unwrap();
        assert_eq!(entry.category, LogCategory::Danger);
        assert!(entry.message.ends_with("(Insufficient funds/stock)"));
    }

    #[test]
    fn test_buy_beyond_stock_rejected() {
        let mut state = fixture();
        state.ship.profit_factor = 1_000_000;
        let next = buy(&state, Commodity::Parts, 31, &Rules::default(), &mut rng());
        assert_eq!(next.ship, state.ship);
        assert_eq!(next.map, state.map);
    }

    #[test]
    fn test_buy_zero_rejected() {
        let state = fixture();
        let next = buy(&state, Commodity::Parts, 0, &Rules::default(), &mut rng());
        assert_eq!(next.ship, state.ship);
        assert_eq!(next.log.latest().unwrap().message, messages::EMPTY_MANIFEST);
    }

    // ── Sell ──

    #[test]
    fn test_sell_returns_goods_to_market() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Medicine, 4);
        let next = sell(&state, Commodity::Medicine, 4, &mut rng());
        // Hive world medicine: 100 × (1.5 / 1.8) × 0.8 = 66
        assert_eq!(next.ship.profit_factor, 1000 + 4 * 66);
        assert_eq!(next.ship.cargo.get(Commodity::Medicine), 0);
        let home = next.map.get(&NodeId::new("home")).unwrap();
        assert_eq!(home.planet.inventory.get(Commodity::Medicine), 34);
    }

    #[test]
    fn test_sell_with_corruption_premium() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Parts, 2);
        state.ship.corruption = 20;
        let next = sell(&state, Commodity::Parts, 2, &mut rng());
        // 80 × 1.1 = 88
        assert_eq!(next.ship.profit_factor, 1000 + 2 * 88);
    }

    #[test]
    fn test_sell_more_than_held_rejected() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Food, 1);
        let next = sell(&state, Commodity::Food, 2, &mut rng());
        assert_eq!(next.ship, state.ship);
        assert_eq!(next.log.latest().unwrap().message, messages::NO_CARGO);
    }

    #[test]
    fn test_illicit_sales_sometimes_taint() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Relics, 1000);
        let mut rng = rng();
        let mut tainted = 0;
        for _ in 0..200 {
            let next = sell(&state, Commodity::Relics, 1, &mut rng);
            if next.ship.corruption == 2 {
                tainted += 1;
                assert_eq!(next.log.latest().unwrap().message, messages::LINGERING_TAINT);
            } else {
                assert_eq!(next.ship.corruption, 0);
            }
        }
        assert!(tainted > 20 && tainted < 110, "tainted {tainted} of 200");
    }

    #[test]
    fn test_licit_sales_never_taint() {
        let mut state = fixture();
        state.ship.cargo.set(Commodity::Food, 1000);
        let mut rng = rng();
        for _ in 0..100 {
            let next = sell(&state, Commodity::Food, 1, &mut rng);
            assert_eq!(next.ship.corruption, 0);
        }
    }

    #[test]
    fn test_buy_then_sell_never_profits() {
        let mut state = fixture();
        state.ship.profit_factor = 100_000;
        let rules = Rules::default();
        for corruption in [0, 30, 60, 99] {
            state.ship.corruption = corruption;
            for c in Commodity::ALL {
                let bought = buy(&state, c, 3, &rules, &mut rng());
                let sold = sell(&bought, c, 3, &mut rng());
                assert!(sold.ship.profit_factor <= state.ship.profit_factor, "{c} at {corruption}");
            }
        }
    }

    // ── Cleanse ──

    #[test]
    fn test_cleanse_cost_scales() {
        let mut ship = fixture().ship;
        let rules = Rules::default();
        assert_eq!(cleanse_cost(&ship, &rules), 200);
        ship.corruption = 25;
        assert_eq!(cleanse_cost(&ship, &rules), 300);
        ship.corruption = 50;
        assert_eq!(cleanse_cost(&ship, &rules), 400);
    }

    #[test]
    fn test_cleanse() {
        let mut state = fixture();
        state.ship.corruption = 25;
        state.ship.morale = 97;
        let next = cleanse(&state, &Rules::default(), &mut rng());
        assert_eq!(next.ship.profit_factor, 700);
        assert_eq!(next.ship.corruption, 15);
        assert_eq!(next.ship.morale, 100);
        assert_eq!(next.log.latest().unwrap().category, LogCategory::Success);
    }

    #[test]
    fn test_cleanse_floors_corruption() {
        let mut state = fixture();
        state.ship.corruption = 4;
        let next = cleanse(&state, &Rules::default(), &mut rng());
        assert_eq!(next.ship.corruption, 0);
    }

    #[test]
    fn test_cleanse_pure_ship_rejected() {
        let mut state = fixture();
        state.ship.profit_factor = 1_000_000;
        let next = cleanse(&state, &Rules::default(), &mut rng());
        assert_eq!(next.ship, state.ship);
        assert_eq!(next.map, state.map);
        assert_eq!(next.turn, state.turn);
        assert_eq!(next.log.latest().unwrap().message, messages::RITUAL_DENIED);
    }

    #[test]
    fn test_cleanse_without_funds_rejected() {
        let mut state = fixture();
        state.ship.corruption = 50;
        state.ship.profit_factor = 399;
        let next = cleanse(&state, &Rules::default(), &mut rng());
        assert_eq!(next.ship, state.ship);
    }
}
