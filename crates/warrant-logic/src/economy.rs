//! Pure economy logic: planetary market prices, stock and sell-back pricing.
//!
//! Each planet type has a trade "personality": a pair of multipliers per
//! commodity, `(sell, buy)`. The buy multiplier sets what the planet charges;
//! the sell multiplier (never above the buy multiplier) sets what it pays
//! back. Combined with a flat 20% dealer discount this makes buying and
//! immediately selling on the same world a loss.

use rand::Rng;

use crate::goods::{Commodity, PlanetType};
use crate::map::Planet;

/// Fraction of the adjusted price a planet pays when buying from the player.
pub const SELL_DISCOUNT: f64 = 0.8;

/// Market fluctuation applied on refresh: uniform in `[0.8, 1.2)`.
pub const FLUCTUATION_MIN: f64 = 0.8;
pub const FLUCTUATION_SPAN: f64 = 0.4;

/// Fresh stock is `10 + uniform_int[0, 50)` units per commodity.
pub const STOCK_MIN: u32 = 10;
pub const STOCK_SPAN: u32 = 50;

/// Divisor turning corruption into the unscrupulous sell premium: every 2
/// points add 1%, so a ship at 100 corruption sells at 1.5× the base price.
pub const CORRUPTION_PREMIUM_DIVISOR: f64 = 200.0;

/// Galactic base price of one unit.
pub fn base_price(commodity: Commodity) -> u32 {
    match commodity {
        Commodity::Promethium => 50,
        Commodity::Food => 10,
        Commodity::Parts => 100,
        Commodity::Artifacts => 500,
        Commodity::Relics => 1000,
        Commodity::Medicine => 75,
    }
}

/// Market multipliers for a commodity on a planet type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modifiers {
    /// Player sells to the planet.
    pub sell: f64,
    /// Player buys from the planet.
    pub buy: f64,
}

const fn m(sell: f64, buy: f64) -> Modifiers {
    Modifiers { sell, buy }
}

/// The full planet-type × commodity modifier table.
pub fn modifiers(planet_type: PlanetType, commodity: Commodity) -> Modifiers {
    use Commodity::*;
    match planet_type {
        PlanetType::ForgeWorld => match commodity {
            Promethium => m(1.2, 1.2),
            Food => m(1.5, 1.5), // Needs food
            Parts => m(0.5, 0.6), // Produces parts
            Artifacts => m(1.5, 2.0),
            Relics => m(1.0, 1.0),
            Medicine => m(1.2, 1.2),
        },
        PlanetType::HiveWorld => match commodity {
            Promethium => m(1.0, 1.0),
            Food => m(2.0, 2.5), // Starving
            Parts => m(1.0, 1.0),
            Artifacts => m(0.8, 0.8),
            Relics => m(0.5, 0.5),
            Medicine => m(1.5, 1.8),
        },
        PlanetType::AgriWorld => match commodity {
            Promethium => m(1.2, 1.5),
            Food => m(0.3, 0.4), // Produces food
            Parts => m(1.5, 1.8),
            Artifacts => m(0.5, 0.5),
            Relics => m(0.5, 0.5),
            Medicine => m(1.0, 1.0),
        },
        PlanetType::DeathWorld => match commodity {
            Promethium => m(2.0, 2.5),
            Food => m(2.0, 2.0),
            Parts => m(2.0, 2.0),
            Artifacts => m(1.5, 1.5),
            Relics => m(0.5, 0.5),
            Medicine => m(2.0, 3.0), // Desperate
        },
        PlanetType::FrontierOutpost => match commodity {
            Promethium => m(0.8, 1.0), // Mining
            Food => m(1.2, 1.2),
            Parts => m(1.3, 1.5),
            Artifacts => m(0.5, 0.5),
            Relics => m(1.5, 2.0), // Black market
            Medicine => m(1.5, 1.5),
        },
    }
}

/// Re-roll every price and stock level on a planet.
///
/// Buy price = `floor(base × buy_modifier × fluctuation)`,
/// stock = `10 + uniform_int[0, 50)`.
pub fn refresh_market(planet: &mut Planet, rng: &mut impl Rng) {
    for commodity in Commodity::ALL {
        let fluctuation = FLUCTUATION_MIN + rng.gen::<f64>() * FLUCTUATION_SPAN;
        let buy = modifiers(planet.planet_type, commodity).buy;
        let price = (base_price(commodity) as f64 * buy * fluctuation).floor() as u32;
        planet.market.set(commodity, price);
        planet
            .inventory
            .set(commodity, STOCK_MIN + rng.gen_range(0..STOCK_SPAN));
    }
}

/// What the planet pays per unit, before any corruption premium.
///
/// `floor(market × sell/buy × 0.8)`, never above the planet's own price.
pub fn sell_price(planet: &Planet, commodity: Commodity) -> u32 {
    let mods = modifiers(planet.planet_type, commodity);
    let market = planet.market.get(commodity) as f64;
    (market * (mods.sell / mods.buy) * SELL_DISCOUNT).floor() as u32
}

/// What the planet actually pays a ship carrying `corruption`.
///
/// Corrupt captains trade unscrupulously: the base sell price is raised by
/// `corruption / 200`. The result is capped at the planet's buy price so a
/// buy followed by a sell on the same world can never turn a profit.
pub fn offered_price(planet: &Planet, commodity: Commodity, corruption: i32) -> u32 {
    let premium = 1.0 + corruption.max(0) as f64 / CORRUPTION_PREMIUM_DIVISOR;
    let price = (sell_price(planet, commodity) as f64 * premium).floor() as u32;
    price.min(planet.market.get(commodity))
}
