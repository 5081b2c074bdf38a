//! Properties that must hold for every seed and every command sequence.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use warrant_logic::constants::LOG_CAPACITY;
use warrant_logic::economy;
use warrant_logic::engine::{apply, buy, sell, Command};
use warrant_logic::goods::Commodity;
use warrant_logic::map::generate_map;
use warrant_logic::rules::Rules;
use warrant_logic::ship::Upgrades;
use warrant_logic::snapshot;
use warrant_logic::state::{create_new_game, GameState};

/// Raw command material, resolved against the state it is applied to.
type RawCommand = (u8, usize, u8, u32);

fn resolve(state: &GameState, raw: RawCommand) -> Command {
    let (kind, index, commodity, quantity) = raw;
    let commodity = Commodity::from_u8(commodity % 6).unwrap_or(Commodity::Food);
    match kind % 4 {
        0 => {
            let ids: Vec<_> = state.map.ids().cloned().collect();
            Command::Travel {
                target: ids[index % ids.len()].clone(),
            }
        }
        1 => Command::Buy {
            commodity,
            quantity,
        },
        2 => Command::Sell {
            commodity,
            quantity,
        },
        _ => Command::Cleanse,
    }
}

fn raw_commands() -> impl Strategy<Value = Vec<RawCommand>> {
    prop::collection::vec((any::<u8>(), any::<usize>(), any::<u8>(), 0_u32..40), 1..80)
}

proptest! {
    #[test]
    fn every_node_has_a_neighbour(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let map = generate_map(&Rules::default(), &mut rng);
        prop_assert_eq!(map.len(), 15);
        for node in map.iter() {
            prop_assert!(!node.connections.is_empty());
            for other in &node.connections {
                prop_assert!(map.get(other).unwrap().is_connected_to(node.id()));
            }
        }
    }

    #[test]
    fn sell_price_never_beats_buy_price(seed in any::<u64>(), corruption in 0_i32..200) {
        let mut rng = StdRng::seed_from_u64(seed);
        let map = generate_map(&Rules::default(), &mut rng);
        for node in map.iter() {
            for c in Commodity::ALL {
                let market = node.planet.market.get(c);
                prop_assert!(economy::sell_price(&node.planet, c) <= market);
                prop_assert!(economy::offered_price(&node.planet, c, corruption) <= market);
            }
        }
    }

    #[test]
    fn round_trip_trade_never_profits(
        seed in any::<u64>(),
        corruption in 0_i32..100,
        commodity in 0_u8..6,
        quantity in 1_u32..10,
    ) {
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = create_new_game(0, Upgrades::default(), &rules, &mut rng);
        state.ship.corruption = corruption;
        state.ship.profit_factor = 1_000_000;
        let c = Commodity::from_u8(commodity).unwrap();
        let bought = buy(&state, c, quantity, &rules, &mut rng);
        let sold = sell(&bought, c, quantity, &mut rng);
        prop_assert!(sold.ship.profit_factor <= state.ship.profit_factor);
    }

    #[test]
    fn random_play_keeps_invariants(seed in any::<u64>(), raws in raw_commands()) {
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = create_new_game(0, Upgrades::default(), &rules, &mut rng);

        for raw in raws {
            let command = resolve(&state, raw);
            let next = apply(&state, &command, &rules, &mut rng);

            prop_assert!(next.log.len() <= LOG_CAPACITY);
            prop_assert!(next.ship.corruption >= 0);
            prop_assert!(next.ship.supplies >= 0);
            prop_assert!(next.ship.fuel >= 0);
            prop_assert!(next.ship.cargo_load() <= next.ship.cargo_capacity(&rules));
            prop_assert!(next.turn >= state.turn);
            prop_assert!(next.map.contains(&next.ship.location));

            if state.is_game_over {
                prop_assert_eq!(&next, &state);
            }
            if next.is_game_over {
                prop_assert!(next.demise.is_some());
            }
            if next.turn > state.turn {
                prop_assert!(
                    matches!(command, Command::Travel { .. }),
                    "turn advanced on {:?}",
                    command
                );
                prop_assert!(next.map.get(&next.ship.location).unwrap().visited);
            }
            state = next;
        }

        let json = snapshot::to_json(&state).unwrap();
        prop_assert_eq!(snapshot::from_json(&json).unwrap(), state);
    }
}
