//! Pure game rules for Warrant of Decay.
//!
//! This crate contains every rule of the game and nothing else: no files,
//! no clocks, no global randomness. Commands take a [`GameState`] by
//! reference plus an explicit random source and return the next state,
//! which makes every transition replayable from a seed.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`chronicle`] | Capped, newest-first narrative log |
//! | [`constants`] | Planet names, flavor text pools, fixed messages |
//! | [`economy`] | Base prices, planet-type modifiers, market rolls, sell prices |
//! | [`engine`] | Travel, buy, sell and cleanse commands |
//! | [`goods`] | Commodities, planet types, per-commodity ledgers |
//! | [`legacy`] | Legacy awards, upgrade prices, rebirth into a new run |
//! | [`map`] | Star map graph and its procedural generator |
//! | [`peril`] | Warp events rolled on every jump |
//! | [`rules`] | Tunable numeric constants and their validation |
//! | [`ship`] | Ship stats and permanent upgrades |
//! | [`snapshot`] | JSON encoding of a whole game state |
//! | [`state`] | The game state value and new-game creation |
//! | [`views`] | Read-only projections for a presentation layer |

pub mod chronicle;
pub mod constants;
pub mod economy;
pub mod engine;
pub mod goods;
pub mod legacy;
pub mod map;
pub mod peril;
pub mod rules;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod views;

pub use engine::{apply, Command};
pub use state::{create_new_game, GameState};
