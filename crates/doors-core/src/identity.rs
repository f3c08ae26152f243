//! # Identifier Newtypes
//!
//! Game and door identifiers are distinct types so that one cannot be
//! passed where the other is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a game. Allocated by the repository, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

/// Identifier of a door, unique within its game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoorId(pub u64);

impl GameId {
    /// Access the inner value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl DoorId {
    /// Access the inner value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for GameId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u64> for DoorId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for DoorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
