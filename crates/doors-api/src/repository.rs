//! # Game Repository
//!
//! Process-local, in-memory ownership of every live game. Games are keyed
//! by a [`GameId`] drawn from a monotonically increasing counter starting
//! at 1; ids are never reused.
//!
//! Transitions run inside a single write-lock critical section so that
//! lookup, validation and mutation cannot interleave with another request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use doors_core::{DoorId, DoorStatus, Game, GameError, GameId};
use thiserror::Error;

use crate::middleware::metrics;
use crate::state::Store;

/// Errors returned by [`GameRepository`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No game is stored under the id.
    #[error("game {0} does not exist")]
    GameNotFound(GameId),

    /// The game rejected the operation.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Shared handle to the game store. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct GameRepository {
    games: Store<GameId, Game>,
    next_id: Arc<AtomicU64>,
}

impl GameRepository {
    pub fn new() -> Self {
        Self {
            games: Store::new(),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create and store a new game with a randomly placed prize.
    pub fn create(&self) -> Game {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let game = Game::new(id, &mut rand::thread_rng());
        self.games.insert(id, game.clone());

        metrics::game_created();
        tracing::info!(game_id = %id, "game created");
        game
    }

    /// Fetch a snapshot of the game.
    pub fn retrieve(&self, id: GameId) -> Result<Game, RepositoryError> {
        self.games.get(&id).ok_or(RepositoryError::GameNotFound(id))
    }

    /// Remove the game.
    pub fn remove(&self, id: GameId) -> Result<(), RepositoryError> {
        self.games
            .remove(&id)
            .ok_or(RepositoryError::GameNotFound(id))?;

        metrics::game_removed();
        tracing::info!(game_id = %id, "game removed");
        Ok(())
    }

    /// Apply a door transition and return the updated game.
    ///
    /// A rejected transition leaves the stored game unchanged.
    pub fn transition(
        &self,
        game_id: GameId,
        door_id: DoorId,
        status: DoorStatus,
    ) -> Result<Game, RepositoryError> {
        let result = self
            .games
            .try_update(&game_id, |game| {
                let from = game.door(door_id)?.status();
                game.transition(door_id, status)?;
                Ok::<_, GameError>((from, game.clone()))
            })
            .ok_or(RepositoryError::GameNotFound(game_id))?;

        match result {
            Ok((from, game)) => {
                metrics::transition_applied();
                tracing::info!(
                    game_id = %game_id,
                    door_id = %door_id,
                    from = %from,
                    to = %status,
                    game_status = %game.status(),
                    "door transitioned"
                );
                Ok(game)
            }
            Err(err) => {
                metrics::transition_rejected();
                tracing::info!(
                    game_id = %game_id,
                    door_id = %door_id,
                    to = %status,
                    error = %err,
                    "door transition rejected"
                );
                Err(err.into())
            }
        }
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameRepository {
    fn default() -> Self {
        Self::new()
    }
}
