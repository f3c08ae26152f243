//! # doors-core — Game Model for the Doors API
//!
//! Pure domain logic for a three-door Monty-Hall game. No I/O, no HTTP,
//! no storage; the API crate owns all of that.
//!
//! ## Model
//!
//! - **Game** ([`game`]): three doors, one hidden prize, and a status that
//!   moves `AWAITING_INITIAL_SELECTION → AWAITING_FINAL_SELECTION → WON | LOST`.
//! - **Door** ([`door`]): identity, [`DoorStatus`], and hidden [`DoorContent`].
//!   Door status changes only through [`Game::transition`].
//! - **Errors** ([`error`]): door lookup failures, illegal transitions, and
//!   unparseable requests.
//!
//! ## Crate Policy
//!
//! - No `panic!()` or `.unwrap()` outside tests.
//! - A rejected transition never mutates the game.

pub mod door;
pub mod error;
pub mod game;
pub mod identity;

pub use door::{Door, DoorContent, DoorStatus, STATUS_KEY};
pub use error::GameError;
pub use game::{Game, GameStatus, DOOR_COUNT};
pub use identity::{DoorId, GameId};
