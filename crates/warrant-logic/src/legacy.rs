//! Legacy layer: what survives when a run ends.
//!
//! A dead run converts its profit factor into legacy points. Between runs
//! the points buy permanent ship upgrades, and a new run starts with them.

use rand::Rng;
use thiserror::Error;

use crate::rules::Rules;
use crate::ship::{UpgradeTrack, Upgrades};
use crate::state::{create_new_game, Demise, GameState};

/// Legacy points awarded for a run that ended with `profit_factor`.
///
/// Losing the hull pays a tenth of the purse; a warp collapse only a
/// twentieth. Debt pays nothing.
pub fn legacy_award(profit_factor: i64, demise: Demise) -> u64 {
    let divisor = match demise {
        Demise::HullBreach => 10,
        Demise::WarpCollapse => 20,
    };
    (profit_factor.max(0) / divisor) as u64
}

/// Price of the next level on `track`: `step × (level + 1)`.
pub fn upgrade_cost(upgrades: &Upgrades, track: UpgradeTrack, rules: &Rules) -> u64 {
    let level = upgrades.level(track) as u64;
    rules.upgrade_cost_step.saturating_mul(level + 1)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RebirthError {
    #[error("the current run is still in progress")]
    RunStillActive,
    #[error("upgrade costs {cost} legacy points, only {available} available")]
    InsufficientLegacy { cost: u64, available: u64 },
}

/// Start the next run after a demise, optionally buying one upgrade first.
///
/// Upgrades already owned carry over. The chosen track's cost is deducted
/// from the legacy points before they are handed to the new run.
pub fn rebirth(
    state: &GameState,
    purchase: Option<UpgradeTrack>,
    rules: &Rules,
    rng: &mut impl Rng,
) -> Result<GameState, RebirthError> {
    if !state.is_game_over {
        return Err(RebirthError::RunStillActive);
    }

    let mut upgrades = state.ship.upgrades;
    let mut legacy = state.legacy_points;
    if let Some(track) = purchase {
        let cost = upgrade_cost(&upgrades, track, rules);
        if legacy < cost {
            return Err(RebirthError::InsufficientLegacy {
                cost,
                available: legacy,
            });
        }
        legacy -= cost;
        upgrades = upgrades.with_level_up(track);
        log::info!(
            "Bought {} level {} for {} legacy",
            track,
            upgrades.level(track),
            cost
        );
    }

    Ok(create_new_game(legacy, upgrades, rules, rng))
}
