//! Warrant of Decay Headless Simulation Harness
//!
//! Plays many randomized runs against the pure rules and checks every
//! invariant the rules promise. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p warrant-simtest
//!   cargo run -p warrant-simtest -- --runs 500 --turns 120 --verbose
//!   cargo run -p warrant-simtest -- --rules tuning.json --json

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use warrant_core::session::Session;
use warrant_logic::constants::LOG_CAPACITY;
use warrant_logic::economy;
use warrant_logic::engine::{apply, Command};
use warrant_logic::goods::Commodity;
use warrant_logic::legacy::{rebirth, upgrade_cost};
use warrant_logic::map::generate_map;
use warrant_logic::rules::{validate_rules, Rules};
use warrant_logic::ship::{UpgradeTrack, Upgrades};
use warrant_logic::snapshot;
use warrant_logic::state::{create_new_game, GameState};

#[derive(Parser, Debug)]
#[command(name = "warrant-simtest")]
#[command(about = "Play randomized runs and validate the game rules")]
struct Args {
    /// Number of independent runs to play
    #[arg(long, default_value_t = 200)]
    runs: u32,

    /// Commands issued per run (the run may end sooner)
    #[arg(long, default_value_t = 80)]
    turns: u32,

    /// Seed for the first run; run n uses seed + n
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with rule overrides
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Print every check, not just failures
    #[arg(long, default_value_t = false)]
    verbose: bool,

    /// Print the report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, violations: &[String], ok_detail: String) -> Self {
        TestResult {
            name: name.into(),
            passed: violations.is_empty(),
            detail: match violations.first() {
                None => ok_detail,
                Some(first) => format!("{} violations, first: {}", violations.len(), first),
            },
        }
    }
}

fn main() {
    let args = Args::parse();
    if !args.json {
        println!("=== Warrant of Decay Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Rules
    let rules = match load_rules(&args, &mut results) {
        Some(rules) => rules,
        None => finish(&args, results),
    };

    // 2. Map generation
    results.extend(validate_maps(&args, &rules));

    // 3. Market pricing
    results.extend(validate_markets(&args, &rules));

    // 4. Random play
    let finished = {
        let (play_results, finished) = validate_play(&args, &rules);
        results.extend(play_results);
        finished
    };

    // 5. Game-over gate and rebirth
    results.extend(validate_endings(&args, &rules, &finished));

    // 6. Persistence
    results.extend(validate_persistence(&args, &rules, &finished));

    finish(&args, results)
}

fn finish(args: &Args, results: Vec<TestResult>) -> ! {
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if args.json {
        match serde_json::to_string_pretty(&results) {
            Ok(report) => println!("{}", report),
            Err(e) => eprintln!("could not encode report: {}", e),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || args.verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    std::process::exit(if failed > 0 { 1 } else { 0 })
}

fn heading(args: &Args, title: &str) {
    if !args.json {
        println!("--- {} ---", title);
    }
}

// ── 1. Rules ────────────────────────────────────────────────────────────

fn load_rules(args: &Args, results: &mut Vec<TestResult>) -> Option<Rules> {
    heading(args, "Rules");
    let rules = match &args.rules {
        None => Rules::default(),
        Some(path) => {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|text| Rules::from_json(&text).map_err(|e| e.to_string()));
            match parsed {
                Ok(rules) => rules,
                Err(e) => {
                    results.push(TestResult {
                        name: "rules_parse".into(),
                        passed: false,
                        detail: format!("{}: {}", path.display(), e),
                    });
                    return None;
                }
            }
        }
    };

    let errors: Vec<String> = validate_rules(&rules).iter().map(|e| e.to_string()).collect();
    let valid = errors.is_empty();
    results.push(TestResult::check(
        "rules_valid",
        &errors,
        format!("{} nodes on a {} map", rules.node_count, rules.map_size),
    ));
    valid.then_some(rules)
}

// ── 2. Map generation ───────────────────────────────────────────────────

fn validate_maps(args: &Args, rules: &Rules) -> Vec<TestResult> {
    heading(args, "Map Generation");
    let mut size = Vec::new();
    let mut ids = Vec::new();
    let mut bounds = Vec::new();
    let mut degree = Vec::new();
    let mut symmetry = Vec::new();
    let mut connected_maps = 0;
    let mut total_clusters = 0;

    for run in 0..args.runs {
        let seed = args.seed + run as u64;
        let mut rng = StdRng::seed_from_u64(seed);
        let map = generate_map(rules, &mut rng);

        if map.len() != rules.node_count {
            size.push(format!("seed {}: {} nodes", seed, map.len()));
        }
        let unique: HashSet<_> = map.ids().collect();
        if unique.len() != map.len() {
            ids.push(format!("seed {}: duplicate ids", seed));
        }
        for node in map.iter() {
            let c = node.planet.coordinates;
            if c.x < 0 || c.y < 0 || c.x >= rules.map_size || c.y >= rules.map_size {
                bounds.push(format!("seed {}: {} at ({}, {})", seed, node.id(), c.x, c.y));
            }
            if node.connections.is_empty() {
                degree.push(format!("seed {}: {} isolated", seed, node.id()));
            }
            for other in &node.connections {
                if !map.get(other).is_some_and(|o| o.is_connected_to(node.id())) {
                    symmetry.push(format!("seed {}: {} -> {} one-way", seed, node.id(), other));
                }
            }
        }
        let clusters = map.clusters().len();
        total_clusters += clusters;
        if clusters == 1 {
            connected_maps += 1;
        }
    }

    vec![
        TestResult::check("map_node_count", &size, format!("{} maps", args.runs)),
        TestResult::check("map_unique_ids", &ids, "ids unique".into()),
        TestResult::check("map_in_bounds", &bounds, "all coordinates in range".into()),
        TestResult::check("map_min_degree", &degree, "every node has a neighbour".into()),
        TestResult::check("map_symmetric_edges", &symmetry, "edges undirected".into()),
        // Informational: generation does not promise a connected graph.
        TestResult {
            name: "map_connectivity".into(),
            passed: true,
            detail: format!(
                "{}/{} maps fully connected, {:.2} clusters on average",
                connected_maps,
                args.runs,
                total_clusters as f64 / args.runs.max(1) as f64
            ),
        },
    ]
}

// ── 3. Market pricing ───────────────────────────────────────────────────

fn validate_markets(args: &Args, rules: &Rules) -> Vec<TestResult> {
    heading(args, "Markets");
    let mut spread = Vec::new();
    let mut stock = Vec::new();
    let mut band = Vec::new();

    for run in 0..args.runs {
        let mut rng = StdRng::seed_from_u64(args.seed + run as u64);
        let map = generate_map(rules, &mut rng);
        for node in map.iter() {
            let planet = &node.planet;
            for c in Commodity::ALL {
                let buy = planet.market.get(c);
                for corruption in [0, 50, 99, 150] {
                    let offered = economy::offered_price(planet, c, corruption);
                    if offered > buy {
                        spread.push(format!(
                            "{} {} at {}: {} > {}",
                            planet.name, c, corruption, offered, buy
                        ));
                    }
                }
                let units = planet.inventory.get(c);
                if !(10..60).contains(&units) {
                    stock.push(format!("{} {}: stock {}", planet.name, c, units));
                }
                let mods = economy::modifiers(planet.planet_type, c);
                let base = economy::base_price(c) as f64 * mods.buy;
                let (lo, hi) = ((base * 0.8).floor(), (base * 1.2).ceil());
                if (buy as f64) < lo || (buy as f64) > hi {
                    band.push(format!("{} {}: {} outside [{}, {}]", planet.name, c, buy, lo, hi));
                }
            }
        }
    }

    vec![
        TestResult::check("market_no_arbitrage", &spread, "sell never above buy".into()),
        TestResult::check("market_stock_range", &stock, "stock within [10, 60)".into()),
        TestResult::check("market_price_band", &band, "prices within ±20% of base".into()),
    ]
}

// ── 4. Random play ──────────────────────────────────────────────────────

fn random_command(state: &GameState, rng: &mut impl Rng) -> Command {
    let commodity = Commodity::ALL[rng.gen_range(0..Commodity::ALL.len())];
    match rng.gen_range(0..10) {
        0..=3 => {
            let target = state
                .current_node()
                .filter(|n| !n.connections.is_empty())
                .map(|n| n.connections[rng.gen_range(0..n.connections.len())].clone())
                .unwrap_or_else(|| state.ship.location.clone());
            Command::Travel { target }
        }
        4..=5 => Command::Buy {
            commodity,
            quantity: rng.gen_range(1..12),
        },
        6..=8 => Command::Sell {
            commodity,
            quantity: state.ship.cargo.get(commodity).max(1),
        },
        _ => Command::Cleanse,
    }
}

fn validate_play(args: &Args, rules: &Rules) -> (Vec<TestResult>, Vec<GameState>) {
    heading(args, "Random Play");
    let mut log_cap = Vec::new();
    let mut floors = Vec::new();
    let mut capacity = Vec::new();
    let mut turn_rule = Vec::new();
    let mut immutability = Vec::new();
    let mut one_entry = Vec::new();
    let mut finished = Vec::new();
    let mut commands = 0u64;

    for run in 0..args.runs {
        let seed = args.seed + run as u64;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = create_new_game(0, Upgrades::default(), rules, &mut rng);

        for step in 0..args.turns {
            if state.is_game_over {
                break;
            }
            let command = random_command(&state, &mut rng);
            let before = state.clone();
            let next = apply(&state, &command, rules, &mut rng);
            commands += 1;
            let at = format!("seed {} step {} {:?}", seed, step, command);

            if state != before {
                immutability.push(at.clone());
            }
            if next.log.len() > LOG_CAPACITY {
                log_cap.push(at.clone());
            }
            let s = &next.ship;
            if s.corruption < 0 || s.supplies < 0 || s.fuel < 0 {
                floors.push(format!(
                    "{}: corruption {} supplies {} fuel {}",
                    at, s.corruption, s.supplies, s.fuel
                ));
            }
            if s.cargo_load() > s.cargo_capacity(rules) {
                capacity.push(at.clone());
            }
            let travelled =
                next.turn == state.turn + 1 && matches!(command, Command::Travel { .. });
            if next.turn != state.turn && !travelled {
                turn_rule.push(at.clone());
            }
            if next.turn == state.turn && next.log.latest() == state.log.latest() {
                // A command that does not advance the turn still leaves a log entry.
                one_entry.push(at);
            }
            state = next;
        }

        if args.verbose && !args.json && run < 5 {
            println!(
                "  seed {}: turn {}, {} PF, corruption {}, {}",
                seed,
                state.turn,
                state.ship.profit_factor,
                state.ship.corruption,
                if state.is_game_over { "lost" } else { "alive" }
            );
        }
        if state.is_game_over {
            finished.push(state);
        }
    }

    let results = vec![
        TestResult::check(
            "play_inputs_untouched",
            &immutability,
            format!("{} commands", commands),
        ),
        TestResult::check(
            "play_log_capped",
            &log_cap,
            format!("log never above {}", LOG_CAPACITY),
        ),
        TestResult::check(
            "play_floors",
            &floors,
            "corruption, supplies and fuel never negative".into(),
        ),
        TestResult::check("play_cargo_capacity", &capacity, "hold never overfilled".into()),
        TestResult::check("play_turn_advance", &turn_rule, "turn moves only on travel".into()),
        TestResult::check(
            "play_command_logged",
            &one_entry,
            "every command leaves a log entry".into(),
        ),
        TestResult {
            name: "play_demise_rate".into(),
            passed: true,
            detail: format!("{}/{} runs ended in demise", finished.len(), args.runs),
        },
    ];
    (results, finished)
}

// ── 5. Endings ──────────────────────────────────────────────────────────

fn validate_endings(args: &Args, rules: &Rules, finished: &[GameState]) -> Vec<TestResult> {
    heading(args, "Endings");
    let mut gate = Vec::new();
    let mut demise = Vec::new();
    let mut rebirths = Vec::new();
    let mut rng = StdRng::seed_from_u64(args.seed);

    for state in finished {
        if state.demise.is_none() {
            demise.push(format!("turn {}: game over without a cause", state.turn));
        }
        let target = state
            .map
            .ids()
            .next()
            .cloned()
            .unwrap_or_else(|| state.ship.location.clone());
        let commands = [
            Command::Travel { target },
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
            if &apply(state, command, rules, &mut rng) != state {
                gate.push(format!("{:?} changed a finished run", command));
            }
        }

        let mut rich = state.clone();
        rich.legacy_points += upgrade_cost(&rich.ship.upgrades, UpgradeTrack::TradeMandate, rules);
        match rebirth(&rich, Some(UpgradeTrack::TradeMandate), rules, &mut rng) {
            Ok(next) => {
                if next.is_game_over
                    || next.turn != 1
                    || next.legacy_points != state.legacy_points
                {
                    rebirths.push(format!(
                        "reborn run: over {}, turn {}, legacy {} (expected {})",
                        next.is_game_over, next.turn, next.legacy_points, state.legacy_points
                    ));
                }
            }
            Err(e) => rebirths.push(e.to_string()),
        }
    }

    vec![
        TestResult::check(
            "gate_after_demise",
            &gate,
            format!("{} finished runs frozen", finished.len()),
        ),
        TestResult::check("demise_recorded", &demise, "every ending has a cause".into()),
        TestResult::check("rebirth", &rebirths, "reborn runs start clean".into()),
    ]
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(args: &Args, rules: &Rules, finished: &[GameState]) -> Vec<TestResult> {
    heading(args, "Persistence");
    let mut snapshots = Vec::new();
    let mut saves = Vec::new();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let fresh = create_new_game(0, Upgrades::default(), rules, &mut rng);
    for state in finished.iter().chain(std::iter::once(&fresh)) {
        match snapshot::to_json(state).and_then(|json| snapshot::from_json(&json)) {
            Ok(decoded) if &decoded == state => {}
            Ok(_) => snapshots.push(format!("turn {}: snapshot changed the state", state.turn)),
            Err(e) => snapshots.push(e.to_string()),
        }
    }

    let mut session = Session::seeded(rules.clone(), args.seed);
    for _ in 0..args.turns.min(20) {
        let command = random_command(session.state(), &mut rng);
        session.apply(&command);
    }
    let mut buffer = Vec::new();
    match session.save(&mut buffer).and_then(|_| Session::load(&buffer[..])) {
        Ok(loaded) if loaded.state() == session.state() => {}
        Ok(_) => saves.push("binary save changed the state".into()),
        Err(e) => saves.push(e.to_string()),
    }

    vec![
        TestResult::check(
            "snapshot_round_trip",
            &snapshots,
            format!("{} snapshots", finished.len() + 1),
        ),
        TestResult::check("save_round_trip", &saves, format!("{} byte save", buffer.len())),
    ]
}
