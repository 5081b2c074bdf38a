//! Game session - owns the current run and drives it one command at a time

use std::collections::VecDeque;
use std::io::{Read, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;

use warrant_logic::engine::{apply, Command};
use warrant_logic::legacy::{rebirth, RebirthError};
use warrant_logic::rules::Rules;
use warrant_logic::ship::{UpgradeTrack, Upgrades};
use warrant_logic::state::{create_new_game, GameState};

use crate::persistence::{self, LoadedGame, SaveError};

/// Default number of prior states kept for undo
pub const DEFAULT_HISTORY_LIMIT: usize = 32;

/// A running game: the current state, the dice, and a short undo history
pub struct Session {
    state: GameState,
    rules: Rules,
    rng: StdRng,
    /// Prior states, oldest first
    history: VecDeque<GameState>,
    history_limit: usize,
}

impl Session {
    /// Start a first run with entropy-seeded dice
    pub fn new_run(rules: Rules) -> Self {
        Self::start(rules, StdRng::from_entropy())
    }

    /// Start a first run with reproducible dice
    pub fn seeded(rules: Rules, seed: u64) -> Self {
        Self::start(rules, StdRng::seed_from_u64(seed))
    }

    fn start(rules: Rules, mut rng: StdRng) -> Self {
        let state = create_new_game(0, Upgrades::default(), &rules, &mut rng);
        Self::resume(state, rules, rng)
    }

    fn resume(state: GameState, rules: Rules, rng: StdRng) -> Self {
        Self {
            state,
            rules,
            rng,
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` states for undo (0 disables undo)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Number of steps that can be undone
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Resolve one command against the current state
    pub fn apply(&mut self, command: &Command) -> &GameState {
        let next = apply(&self.state, command, &self.rules, &mut self.rng);
        if next != self.state {
            let prior = std::mem::replace(&mut self.state, next);
            self.history.push_back(prior);
            self.trim_history();
        }
        log::debug!("Turn {}: {:?}", self.state.turn, command);
        &self.state
    }

    /// Step back to the state before the last command.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(prior) => {
                self.state = prior;
                true
            }
            None => false,
        }
    }

    /// Begin the next run after a demise, optionally buying an upgrade.
    ///
    /// Clears the undo history; a finished run cannot be stepped back into.
    pub fn rebirth(&mut self, purchase: Option<UpgradeTrack>) -> Result<&GameState, RebirthError> {
        let next = rebirth(&self.state, purchase, &self.rules, &mut self.rng)?;
        self.state = next;
        self.history.clear();
        Ok(&self.state)
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }

    /// Save the current run to a writer in binary form
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game(writer, &self.state, &self.rules)
    }

    /// Save the current run as JSON
    pub fn save_json<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game_json(writer, &self.state, &self.rules)
    }

    /// Resume a run from a binary save with fresh dice
    pub fn load<R: Read>(reader: R) -> Result<Self, SaveError> {
        let LoadedGame { rules, state } = persistence::load_game(reader)?;
        Ok(Self::resume(state, rules, StdRng::from_entropy()))
    }

    /// Resume a run from a JSON save with fresh dice
    pub fn load_json<R: Read>(reader: R) -> Result<Self, SaveError> {
        let LoadedGame { rules, state } = persistence::load_game_json(reader)?;
        Ok(Self::resume(state, rules, StdRng::from_entropy()))
    }

    /// Resume from a binary save if one is readable, otherwise start over.
    ///
    /// An unreadable save is discarded: the fresh run has no legacy points
    /// and no upgrades.
    pub fn restore_or_start<R: Read>(save: Option<R>, rules: Rules) -> Self {
        match save.map(Self::load) {
            Some(Ok(session)) => {
                log::info!(
                    "Resumed run at turn {} with {} legacy points",
                    session.state.turn,
                    session.state.legacy_points
                );
                session
            }
            Some(Err(e)) => {
                log::warn!("Discarding unreadable save: {}", e);
                Self::new_run(rules)
            }
            None => Self::new_run(rules),
        }
    }
}
