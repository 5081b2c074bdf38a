//! Warp peril: the random event rolled once on every jump.
//!
//! The chance of an event grows with corruption and shrinks with the
//! navigator upgrade. Severity is picked from the ship's corruption at the
//! moment of the roll:
//!
//! | Corruption | Severity | Effect |
//! |-----------|----------|--------|
//! | ≤ 30 | low | morale −5, corruption +2 |
//! | 31–70 | medium | hull −[5,15), corruption +4, morale −10 |
//! | > 70 | high | one of: hull −[15,35); half of one cargo kind lost (or morale −20 if empty); +[0,500) PF and corruption +10 |
//!
//! With no event, a 10% calm tide heals 1 corruption.
//!
//! Rolling and applying are split so the effects can be tested exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chronicle::LogCategory;
use crate::constants::messages;
use crate::goods::Commodity;
use crate::rules::Rules;
use crate::ship::Ship;
use crate::state::GameState;

/// Base event chance in percent.
pub const BASE_EVENT_CHANCE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Severity tier for a corruption level.
pub fn severity(corruption: i32) -> Severity {
    if corruption > 70 {
        Severity::High
    } else if corruption > 30 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Percent chance that a jump triggers an event. May fall below 0
/// (never triggers) or exceed 100 (always triggers).
pub fn event_chance(ship: &Ship, rules: &Rules) -> f64 {
    BASE_EVENT_CHANCE + ship.corruption as f64 / 2.0
        - ship.upgrades.sanctioned_navigator as f64 * rules.peril_reduction_per_navigator
}

/// What the warp did on one jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerilOutcome {
    /// Nothing happened.
    Quiet,
    /// No event, and the machine spirit was soothed.
    CalmTide,
    /// Low severity.
    Whispers,
    /// Medium severity.
    Manifestation { damage: i32 },
    /// High severity: catastrophic hull damage.
    RealityTear { damage: i32 },
    /// High severity: half of one cargo kind is lost.
    CargoFused { commodity: Commodity, lost: u32 },
    /// High severity: the chosen cargo kind was empty; the crew suffers instead.
    VoidStares { commodity: Commodity },
    /// High severity: a poisoned windfall.
    ForbiddenKnowledge { gain: i64 },
}

/// Roll the warp for one jump.
pub fn roll_peril(ship: &Ship, rules: &Rules, rng: &mut impl Rng) -> PerilOutcome {
    let roll = rng.gen::<f64>() * 100.0;
    if roll >= event_chance(ship, rules) {
        return if rng.gen::<f64>() > 0.9 {
            PerilOutcome::CalmTide
        } else {
            PerilOutcome::Quiet
        };
    }

    match severity(ship.corruption) {
        Severity::Low => PerilOutcome::Whispers,
        Severity::Medium => PerilOutcome::Manifestation {
            damage: rng.gen_range(5..15),
        },
        Severity::High => {
            let outcome = rng.gen::<f64>();
            if outcome < 0.3 {
                PerilOutcome::RealityTear {
                    damage: rng.gen_range(15..35),
                }
            } else if outcome < 0.6 {
                let commodity = Commodity::ALL[rng.gen_range(0..Commodity::ALL.len())];
                let held = ship.cargo.get(commodity);
                if held > 0 {
                    PerilOutcome::CargoFused {
                        commodity,
                        lost: held.div_ceil(2),
                    }
                } else {
                    PerilOutcome::VoidStares { commodity }
                }
            } else {
                PerilOutcome::ForbiddenKnowledge {
                    gain: rng.gen_range(0..500),
                }
            }
        }
    }
}

/// Apply a rolled outcome to the ship and record it in the log.
pub(crate) fn apply_peril(state: &mut GameState, outcome: PerilOutcome) {
    match outcome {
        PerilOutcome::Quiet => {}
        PerilOutcome::CalmTide => {
            state.ship.shift_corruption(-1);
            state.record(messages::CALM_TIDE, LogCategory::Success);
        }
        PerilOutcome::Whispers => {
            state.ship.morale -= 5;
            state.ship.shift_corruption(2);
            state.record(messages::WHISPERS, LogCategory::Warp);
        }
        PerilOutcome::Manifestation { damage } => {
            state.ship.hull -= damage;
            state.ship.shift_corruption(4);
            state.ship.morale -= 10;
            state.record(
                format!("Manifestation on Deck 9. Hull damaged ({damage})."),
                LogCategory::Danger,
            );
        }
        PerilOutcome::RealityTear { damage } => {
            state.ship.hull -= damage;
            state.record(
                format!("REALITY TEAR. Massive structural failure ({damage})."),
                LogCategory::Danger,
            );
        }
        PerilOutcome::CargoFused { commodity, lost } => {
            let lost = state.ship.cargo.take(commodity, lost);
            state.record(
                format!("The {commodity} has fused into a fleshy mass. {lost} units jettisoned."),
                LogCategory::Warp,
            );
        }
        PerilOutcome::VoidStares { .. } => {
            state.ship.morale -= 20;
            state.record(messages::VOID_STARES, LogCategory::Danger);
        }
        PerilOutcome::ForbiddenKnowledge { gain } => {
            state.ship.profit_factor += gain;
            state.ship.shift_corruption(10);
            state.record(
                format!("The Warp grants forbidden knowledge. +{gain} PF. The cost is... steep."),
                LogCategory::Warp,
            );
        }
    }
}
