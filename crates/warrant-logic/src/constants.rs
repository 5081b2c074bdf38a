//! Fixed game content: planet names, flavor text and log limits.
//!
//! Unlike [`crate::rules`], nothing here is tunable: these are the words
//! the game speaks.

use rand::Rng;

/// Maximum number of narrative log entries kept on a game state.
pub const LOG_CAPACITY: usize = 50;

/// Suffix of every log timestamp (`"007.M42"`).
pub const ERA_SUFFIX: &str = "M42";

/// Planet names, assigned in generation order.
pub static PLANET_NAMES: &[&str] = &[
    "Vraks Prime",
    "Golgotha",
    "Necromunda Secundus",
    "Catachan IV",
    "Badab",
    "Cadia (Remnant)",
    "Armageddon",
    "Fenris System",
    "Baal",
    "Macragge",
    "Medusa",
    "Nocturne",
    "Prospero's Ash",
    "Tallarn",
    "Tanith's Ghost",
];

pub static TRAVEL_FLAVOR: &[&str] = &[
    "The Geller Field flickers. Shadows dance on the bridge.",
    "Navigators report whispers in the warp. Morale holds, for now.",
    "Engine spirits scream as we translate back to real-space.",
    "Void-seals hiss. We have arrived.",
    "The Astronomican's light was dim, but we endured.",
    "Hull stress critical during translation. We stabilized at the last second.",
    "The Astropathic choir is bleeding from their eyes. Transition complete.",
    "We passed through a shoal of void-whales. Beautiful and terrifying.",
    "Time dilation detected. We have arrived 3 days before we left.",
    "The warp was calm, like a predator holding its breath.",
];

pub static CLEANSE_FLAVOR: &[&str] = &[
    "Tech-priests anoint the bulkheads with sacred oils.",
    "The choir broadcasts hexagrammatic wards.",
    "Mutants are purged from the lower decks. Order restored.",
    "Incense clouds the bridge as the rites of banishment conclude.",
    "Sacred texts are recited over the ship's intercom.",
    "The Navigator has been sedated. The nightmare recedes.",
];

pub static BUY_FLAVOR: &[&str] = &[
    "Acquisition authorized. Servitors loading cargo.",
    "The local guilders accept our throne gelt.",
    "Supplies secured. The Quartermaster is pleased.",
    "Cargo bays filling. Heavy machinery active.",
    "Trade writ verified. The goods are ours.",
];

pub static SELL_FLAVOR: &[&str] = &[
    "Goods offloaded. The dynasty's coffers swell.",
    "A lucrative contract fulfilled.",
    "The planetary governor accepts our tithe.",
    "Cargo jettisoned into local orbiters. Payment received.",
    "Credits transferred. The deal is sealed.",
];

pub static FAIL_FLAVOR: &[&str] = &[
    "Transaction denied. Servitors stand down.",
    "The Cogitator rejects the trade manifest.",
    "Local customs refuse our authority.",
    "Insufficient resources for this exchange.",
];

/// Pick one line from a flavor pool.
pub fn pick<'a>(pool: &[&'a str], rng: &mut impl Rng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Log messages for fixed events.
pub mod messages {
    pub const WARRANT_AUTHENTICATED: &str =
        "Warrant of Trade authenticated. Systems online. The void awaits.";
    pub const NO_FUEL: &str = "Engines failed: Insufficient Promethium.";
    pub const NO_ROUTE: &str = "Navigation denied: No charted warp route to that system.";
    pub const STARVATION: &str = "Crew starves. Mutinies suppressed violently.";
    pub const HULL_LOST: &str = "HULL BREACH CRITICAL. VESSEL LOST.";
    pub const GELLER_COLLAPSE: &str = "THE GELLER FIELD COLLAPSES. WE ARE LOST.";
    pub const CARGO_FULL: &str = "Transaction denied: Cargo bays at maximum capacity.";
    pub const NO_CARGO: &str = "Transaction denied: Insufficient cargo.";
    pub const EMPTY_MANIFEST: &str = "Transaction denied: The manifest lists no goods.";
    pub const LINGERING_TAINT: &str = "The trade carries a lingering taint.";
    pub const RITUAL_DENIED: &str = "Ritual denied: Insufficient resources or purity.";
    pub const WHISPERS: &str = "Whispers in the bulkheads. The crew is restless.";
    pub const VOID_STARES: &str = "The void stares back. Suicide rates spike.";
    pub const CALM_TIDE: &str = "A calm tide in the empyrean soothes the machine spirit.";
}
