//! # Error Types
//!
//! Errors raised by the game model. All use `thiserror` for `Display`
//! and `Error` implementations.
//!
//! State machine errors carry the door, its current status, the attempted
//! target, and the game status at the time of rejection.

use thiserror::Error;

use crate::door::DoorStatus;
use crate::game::GameStatus;
use crate::identity::{DoorId, GameId};

/// Errors produced by game operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The door id does not belong to the game.
    #[error("door {door} does not exist in game {game}")]
    DoorNotFound {
        /// The game that was searched.
        game: GameId,
        /// The door that was requested.
        door: DoorId,
    },

    /// The requested status change is not permitted.
    #[error("cannot transition door {door} from {from} to {to} while game is {game_status}")]
    IllegalTransition {
        /// The door the transition targeted.
        door: DoorId,
        /// Current door status.
        from: DoorStatus,
        /// Requested door status.
        to: DoorStatus,
        /// Game status when the request arrived.
        game_status: GameStatus,
    },

    /// A caller-supplied value could not be interpreted.
    #[error("{0}")]
    InvalidArgument(String),
}
