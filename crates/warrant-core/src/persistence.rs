//! Save/Load functionality for persisting a run
//!
//! Uses bincode for a compact binary save file, or serde_json when a
//! human-readable save is wanted. Both carry a format version and the tuning
//! rules the run was played under.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use thiserror::Error;

use warrant_logic::rules::Rules;
use warrant_logic::state::GameState;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Everything written to a save file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Rules the run was played under
    pub rules: Rules,
    /// The run itself, legacy points included
    pub state: GameState,
}

/// Result of loading a save file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGame {
    pub rules: Rules,
    pub state: GameState,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

fn save_data(state: &GameState, rules: &Rules) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        rules: rules.clone(),
        state: state.clone(),
    }
}

fn check_version(data: SaveData) -> Result<LoadedGame, SaveError> {
    if data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: data.version,
        });
    }
    Ok(LoadedGame {
        rules: data.rules,
        state: data.state,
    })
}

/// Save a run to a writer in binary form
pub fn save_game<W: Write>(writer: W, state: &GameState, rules: &Rules) -> Result<(), SaveError> {
    bincode::serialize_into(writer, &save_data(state, rules))?;
    Ok(())
}

/// Load a run from a binary save
pub fn load_game<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let data: SaveData = bincode::deserialize_from(reader)?;
    check_version(data)
}

/// Save a run to a writer as pretty-printed JSON
pub fn save_game_json<W: Write>(
    writer: W,
    state: &GameState,
    rules: &Rules,
) -> Result<(), SaveError> {
    serde_json::to_writer_pretty(writer, &save_data(state, rules))?;
    Ok(())
}

/// Load a run from a JSON save
pub fn load_game_json<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let data: SaveData = serde_json::from_reader(reader)?;
    check_version(data)
}
