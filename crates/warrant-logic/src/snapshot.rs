//! Plain JSON snapshot of a [`GameState`].
//!
//! A snapshot is self-contained: decoding it yields a state equal to the one
//! encoded. A snapshot that fails to decode is reported, never repaired; the
//! caller decides whether to start a fresh run instead.

use thiserror::Error;

use crate::state::GameState;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON for a game state: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn to_json(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(state)?)
}

pub fn to_json_pretty(state: &GameState) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(state)?)
}

pub fn from_json(json: &str) -> Result<GameState, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}
