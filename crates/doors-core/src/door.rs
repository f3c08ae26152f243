//! # Doors
//!
//! A door is one selectable cell of a game. It has an identity, a status
//! drawn from [`DoorStatus`], and hidden [`DoorContent`].
//!
//! ```text
//! CLOSED ──select──▶ SELECTED ──open──▶ OPENED
//!    │                                    ▲
//!    └──────────── open (switch / host) ──┘
//! ```
//!
//! Which of these edges is legal at a given moment depends on the game
//! status; see [`crate::game::Game::transition`]. Door status is only
//! mutated by the game.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::identity::DoorId;

/// Payload key that carries the requested status.
pub const STATUS_KEY: &str = "status";

/// The status of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorStatus {
    /// Initial state. Content is concealed.
    Closed,
    /// Chosen by the player in the first round.
    Selected,
    /// Open. Content is visible.
    Opened,
}

impl DoorStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [DoorStatus; 3] = [Self::Closed, Self::Selected, Self::Opened];

    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "CLOSED",
            Self::Selected => "SELECTED",
            Self::Opened => "OPENED",
        }
    }

    /// Look up a status by name. Matching ignores case and surrounding
    /// whitespace. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(name))
    }

    /// Extract the requested status from a request payload.
    ///
    /// The payload must contain a [`STATUS_KEY`] entry naming one of the
    /// statuses.
    pub fn parse(payload: &HashMap<String, String>) -> Result<Self, GameError> {
        let raw = payload.get(STATUS_KEY).ok_or_else(|| {
            GameError::InvalidArgument(format!(
                "payload is missing required key '{STATUS_KEY}'"
            ))
        })?;

        Self::from_name(raw).ok_or_else(|| {
            GameError::InvalidArgument(format!("'{raw}' is not a valid door status"))
        })
    }
}

impl std::fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is behind a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoorContent {
    /// The prize.
    Bicycle,
    /// Not the prize.
    SmallFurryAnimal,
}

impl DoorContent {
    /// Whether this is the prize.
    pub fn is_prize(&self) -> bool {
        matches!(self, Self::Bicycle)
    }

    /// The canonical string name of this content.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bicycle => "BICYCLE",
            Self::SmallFurryAnimal => "SMALL_FURRY_ANIMAL",
        }
    }
}

impl std::fmt::Display for DoorContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single door within a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    id: DoorId,
    status: DoorStatus,
    content: DoorContent,
}

impl Door {
    /// Create a closed door.
    pub(crate) fn closed(id: DoorId, content: DoorContent) -> Self {
        Self {
            id,
            status: DoorStatus::Closed,
            content,
        }
    }

    pub fn id(&self) -> DoorId {
        self.id
    }

    pub fn status(&self) -> DoorStatus {
        self.status
    }

    /// The true content, regardless of whether the door is open.
    pub fn content(&self) -> DoorContent {
        self.content
    }

    pub fn is_prize(&self) -> bool {
        self.content.is_prize()
    }

    pub(crate) fn set_status(&mut self, status: DoorStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_accepts_every_status_name() {
        for status in DoorStatus::ALL {
            let parsed = DoorStatus::parse(&payload(&[("status", status.as_str())])).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        let parsed = DoorStatus::parse(&payload(&[("status", "  selected ")])).unwrap();
        assert_eq!(parsed, DoorStatus::Selected);
        let parsed = DoorStatus::parse(&payload(&[("status", "Opened")])).unwrap();
        assert_eq!(parsed, DoorStatus::Opened);
    }

    #[test]
    fn parse_missing_key_is_invalid_argument() {
        let err = DoorStatus::parse(&payload(&[("state", "OPENED")])).unwrap_err();
        match err {
            GameError::InvalidArgument(msg) => assert!(msg.contains("'status'"), "got: {msg}"),
            other => panic!("expected InvalidArgument, got: {other:?}"),
        }
    }

    #[test]
    fn parse_unknown_value_is_invalid_argument() {
        let err = DoorStatus::parse(&payload(&[("status", "AJAR")])).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidArgument("'AJAR' is not a valid door status".to_string())
        );
    }

    #[test]
    fn parse_ignores_extra_keys() {
        let parsed =
            DoorStatus::parse(&payload(&[("status", "CLOSED"), ("note", "hello")])).unwrap();
        assert_eq!(parsed, DoorStatus::Closed);
    }

    #[test]
    fn status_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_string(&DoorStatus::Selected).unwrap(),
            "\"SELECTED\""
        );
        assert_eq!(
            serde_json::to_string(&DoorContent::SmallFurryAnimal).unwrap(),
            "\"SMALL_FURRY_ANIMAL\""
        );
    }

    #[test]
    fn only_bicycle_is_prize() {
        assert!(DoorContent::Bicycle.is_prize());
        assert!(!DoorContent::SmallFurryAnimal.is_prize());
    }

    #[test]
    fn new_door_is_closed() {
        let door = Door::closed(DoorId(1), DoorContent::Bicycle);
        assert_eq!(door.status(), DoorStatus::Closed);
        assert!(door.is_prize());
    }
}
