//! # Game Lifecycle
//!
//! A game owns three doors, exactly one of which hides the prize. The
//! player selects a door, the host opens a dud among the others, and the
//! player then opens one of the two remaining doors to finish.
//!
//! ## States
//!
//! ```text
//! AWAITING_INITIAL_SELECTION ──select CLOSED door──▶ AWAITING_FINAL_SELECTION
//!                                                          │
//!                                     open SELECTED or CLOSED door
//!                                                          │
//!                                              ┌───────────┴───────────┐
//!                                              ▼                       ▼
//!                                             WON                     LOST
//! ```
//!
//! Every request outside this table is rejected with
//! [`GameError::IllegalTransition`] and leaves the game untouched.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::door::{Door, DoorContent, DoorStatus};
use crate::error::GameError;
use crate::identity::{DoorId, GameId};

/// Number of doors in every game.
pub const DOOR_COUNT: usize = 3;

/// The status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Waiting for the player to select a door.
    AwaitingInitialSelection,
    /// The host has opened a dud; waiting for the player to open a door.
    AwaitingFinalSelection,
    /// The player opened the prize door. Terminal.
    Won,
    /// The player opened a dud. Terminal.
    Lost,
}

impl GameStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingInitialSelection => "AWAITING_INITIAL_SELECTION",
            Self::AwaitingFinalSelection => "AWAITING_FINAL_SELECTION",
            Self::Won => "WON",
            Self::Lost => "LOST",
        }
    }

    /// Whether this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Door statuses a door in `door` status may move to while the game is
    /// in this status.
    pub fn allowed_targets(&self, door: DoorStatus) -> &'static [DoorStatus] {
        match (self, door) {
            (Self::AwaitingInitialSelection, DoorStatus::Closed) => &[DoorStatus::Selected],
            (Self::AwaitingFinalSelection, DoorStatus::Closed | DoorStatus::Selected) => {
                &[DoorStatus::Opened]
            }
            _ => &[],
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One play-through: three doors and a hidden prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    status: GameStatus,
    doors: Vec<Door>,
    created_at: DateTime<Utc>,
}

impl Game {
    /// Create a game with the prize behind a uniformly random door.
    pub fn new<R: Rng>(id: GameId, rng: &mut R) -> Self {
        let prize = rng.gen_range(0..DOOR_COUNT);
        Self::build(id, prize)
    }

    /// Create a game with the prize behind `prize`.
    ///
    /// Returns [`GameError::DoorNotFound`] if `prize` is not one of the
    /// game's door ids.
    pub fn with_prize(id: GameId, prize: DoorId) -> Result<Self, GameError> {
        let index = Self::door_ids()
            .position(|door| door == prize)
            .ok_or(GameError::DoorNotFound { game: id, door: prize })?;
        Ok(Self::build(id, index))
    }

    /// The door ids every game is created with, in order.
    pub fn door_ids() -> impl Iterator<Item = DoorId> {
        (1..=DOOR_COUNT as u64).map(DoorId)
    }

    fn build(id: GameId, prize_index: usize) -> Self {
        let doors = Self::door_ids()
            .enumerate()
            .map(|(index, door_id)| {
                let content = if index == prize_index {
                    DoorContent::Bicycle
                } else {
                    DoorContent::SmallFurryAnimal
                };
                Door::closed(door_id, content)
            })
            .collect();

        Self {
            id,
            status: GameStatus::AwaitingInitialSelection,
            doors,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The doors, ordered by id.
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Look up a door by id.
    pub fn door(&self, door_id: DoorId) -> Result<&Door, GameError> {
        self.door_index(door_id).map(|index| &self.doors[index])
    }

    /// The door that hides the prize.
    pub fn prize_door(&self) -> Option<&Door> {
        self.doors.iter().find(|door| door.is_prize())
    }

    /// Whether the game has reached `WON` or `LOST`.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a requested door status change using the thread-local RNG for
    /// the host's choice.
    pub fn transition(&mut self, door_id: DoorId, target: DoorStatus) -> Result<(), GameError> {
        self.transition_with(door_id, target, &mut rand::thread_rng())
    }

    /// Apply a requested door status change.
    ///
    /// Fails with [`GameError::DoorNotFound`] if the door is not part of
    /// this game, and with [`GameError::IllegalTransition`] if the change
    /// is not permitted. On failure the game is unchanged.
    pub fn transition_with<R: Rng>(
        &mut self,
        door_id: DoorId,
        target: DoorStatus,
        rng: &mut R,
    ) -> Result<(), GameError> {
        let index = self.door_index(door_id)?;
        let from = self.doors[index].status();

        if !self.status.allowed_targets(from).contains(&target) {
            return Err(GameError::IllegalTransition {
                door: door_id,
                from,
                to: target,
                game_status: self.status,
            });
        }

        match target {
            DoorStatus::Selected => self.select(index, rng),
            DoorStatus::Opened => self.open(index),
            // No state admits CLOSED as a target.
            DoorStatus::Closed => {}
        }

        tracing::debug!(
            game_id = %self.id,
            door_id = %door_id,
            from = %from,
            to = %target,
            game_status = %self.status,
            "door transition applied"
        );
        Ok(())
    }

    /// Mark the player's door selected, then have the host open a dud
    /// among the remaining doors.
    fn select<R: Rng>(&mut self, index: usize, rng: &mut R) {
        self.doors[index].set_status(DoorStatus::Selected);

        let candidates: Vec<usize> = (0..self.doors.len())
            .filter(|&i| i != index && !self.doors[i].is_prize())
            .collect();
        if let Some(&host) = candidates.choose(rng) {
            self.doors[host].set_status(DoorStatus::Opened);
        }

        self.status = GameStatus::AwaitingFinalSelection;
    }

    fn open(&mut self, index: usize) {
        let door = &mut self.doors[index];
        door.set_status(DoorStatus::Opened);
        self.status = if door.is_prize() {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
    }

    fn door_index(&self, door_id: DoorId) -> Result<usize, GameError> {
        self.doors
            .iter()
            .position(|door| door.id() == door_id)
            .ok_or(GameError::DoorNotFound {
                game: self.id,
                door: door_id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game_with_prize(prize: u64) -> Game {
        Game::with_prize(GameId(1), DoorId(prize)).unwrap()
    }

    fn statuses(game: &Game) -> Vec<DoorStatus> {
        game.doors().iter().map(Door::status).collect()
    }

    // ── Creation ─────────────────────────────────────────────────────

    #[test]
    fn new_game_has_three_closed_doors() {
        let game = Game::new(GameId(1), &mut StdRng::seed_from_u64(7));
        assert_eq!(game.doors().len(), DOOR_COUNT);
        assert!(game.doors().iter().all(|d| d.status() == DoorStatus::Closed));
        assert_eq!(game.status(), GameStatus::AwaitingInitialSelection);
        assert!(!game.is_over());
    }

    #[test]
    fn doors_are_numbered_from_one() {
        let game = game_with_prize(2);
        let ids: Vec<u64> = game.doors().iter().map(|d| d.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn with_prize_places_bicycle() {
        let game = game_with_prize(3);
        assert_eq!(game.prize_door().unwrap().id(), DoorId(3));
    }

    #[test]
    fn with_prize_rejects_unknown_door() {
        let err = Game::with_prize(GameId(1), DoorId(4)).unwrap_err();
        assert!(matches!(err, GameError::DoorNotFound { .. }));
    }

    // ── Initial selection ────────────────────────────────────────────

    #[test]
    fn selecting_prize_door_opens_a_dud() {
        let mut game = game_with_prize(1);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();

        assert_eq!(game.status(), GameStatus::AwaitingFinalSelection);
        assert_eq!(game.door(DoorId(1)).unwrap().status(), DoorStatus::Selected);
        let opened: Vec<&Door> = game
            .doors()
            .iter()
            .filter(|d| d.status() == DoorStatus::Opened)
            .collect();
        assert_eq!(opened.len(), 1);
        assert!(!opened[0].is_prize());
    }

    #[test]
    fn selecting_dud_opens_the_other_dud() {
        let mut game = game_with_prize(2);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();

        assert_eq!(
            statuses(&game),
            vec![DoorStatus::Selected, DoorStatus::Closed, DoorStatus::Opened]
        );
    }

    #[test]
    fn cannot_open_before_selecting() {
        let mut game = game_with_prize(2);
        let before = game.clone();
        let err = game.transition(DoorId(2), DoorStatus::Opened).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalTransition {
                door: DoorId(2),
                from: DoorStatus::Closed,
                to: DoorStatus::Opened,
                game_status: GameStatus::AwaitingInitialSelection,
            }
        );
        assert_eq!(game, before);
    }

    #[test]
    fn closed_is_never_a_legal_target() {
        let mut game = game_with_prize(1);
        let before = game.clone();
        let err = game.transition(DoorId(1), DoorStatus::Closed).unwrap_err();
        assert!(matches!(err, GameError::IllegalTransition { .. }));
        assert_eq!(game, before);
    }

    // ── Final selection ──────────────────────────────────────────────

    #[test]
    fn staying_on_prize_wins() {
        let mut game = game_with_prize(1);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();
        game.transition(DoorId(1), DoorStatus::Opened).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert!(game.is_over());
    }

    #[test]
    fn switching_to_prize_wins() {
        let mut game = game_with_prize(2);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();
        // Host opened door 3; switching to door 2 wins.
        game.transition(DoorId(2), DoorStatus::Opened).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn staying_on_dud_loses() {
        let mut game = game_with_prize(2);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();
        game.transition(DoorId(1), DoorStatus::Opened).unwrap();
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn cannot_open_door_the_host_opened() {
        let mut game = game_with_prize(2);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();
        let before = game.clone();
        let err = game.transition(DoorId(3), DoorStatus::Opened).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalTransition { from: DoorStatus::Opened, .. }
        ));
        assert_eq!(game, before);
    }

    #[test]
    fn cannot_select_twice() {
        let mut game = game_with_prize(2);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();
        let err = game.transition(DoorId(2), DoorStatus::Selected).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalTransition {
                game_status: GameStatus::AwaitingFinalSelection,
                ..
            }
        ));
    }

    #[test]
    fn finished_game_rejects_everything() {
        let mut game = game_with_prize(1);
        game.transition(DoorId(1), DoorStatus::Selected).unwrap();
        game.transition(DoorId(2), DoorStatus::Opened).unwrap();
        assert_eq!(game.status(), GameStatus::Lost);

        let before = game.clone();
        for door in Game::door_ids() {
            for status in DoorStatus::ALL {
                assert!(game.transition(door, status).is_err());
            }
        }
        assert_eq!(game, before);
    }

    // ── Door lookup ──────────────────────────────────────────────────

    #[test]
    fn unknown_door_is_not_found_and_state_unchanged() {
        let mut game = game_with_prize(1);
        let before = game.clone();
        let err = game.transition(DoorId(99), DoorStatus::Selected).unwrap_err();
        assert_eq!(
            err,
            GameError::DoorNotFound {
                game: GameId(1),
                door: DoorId(99),
            }
        );
        assert_eq!(game, before);
    }

    #[test]
    fn door_not_found_takes_precedence_over_illegal_transition() {
        let mut game = game_with_prize(1);
        let err = game.transition(DoorId(0), DoorStatus::Closed).unwrap_err();
        assert!(matches!(err, GameError::DoorNotFound { .. }));
    }

    // ── Display & serialization ──────────────────────────────────────

    #[test]
    fn game_status_display() {
        assert_eq!(
            GameStatus::AwaitingInitialSelection.to_string(),
            "AWAITING_INITIAL_SELECTION"
        );
        assert_eq!(GameStatus::Lost.to_string(), "LOST");
    }

    #[test]
    fn game_serialization_preserves_state() {
        let mut game = game_with_prize(3);
        game.transition(DoorId(2), DoorStatus::Selected).unwrap();
        let json = serde_json::to_string(&game).unwrap();
        let parsed: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, game);
    }

    // ── Properties ───────────────────────────────────────────────────

    fn any_status() -> impl Strategy<Value = DoorStatus> {
        prop_oneof![
            Just(DoorStatus::Closed),
            Just(DoorStatus::Selected),
            Just(DoorStatus::Opened),
        ]
    }

    proptest! {
        /// Every created game has exactly one prize door and all doors closed.
        #[test]
        fn created_game_has_exactly_one_prize(seed in any::<u64>()) {
            let game = Game::new(GameId(seed), &mut StdRng::seed_from_u64(seed));
            let prizes = game.doors().iter().filter(|d| d.is_prize()).count();
            prop_assert_eq!(prizes, 1);
            prop_assert!(game.doors().iter().all(|d| d.status() == DoorStatus::Closed));
        }

        /// Arbitrary request sequences never break the game invariants, and
        /// rejected requests never change state.
        #[test]
        fn transitions_preserve_invariants(
            seed in any::<u64>(),
            requests in prop::collection::vec((0u64..5, any_status()), 0..12),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::new(GameId(1), &mut rng);

            for (door, status) in requests {
                let before = game.clone();
                if game.transition_with(DoorId(door), status, &mut rng).is_err() {
                    prop_assert_eq!(&game, &before);
                }

                prop_assert_eq!(game.doors().len(), DOOR_COUNT);
                prop_assert_eq!(game.doors().iter().filter(|d| d.is_prize()).count(), 1);

                let selected = game.doors().iter().filter(|d| d.status() == DoorStatus::Selected).count();
                let opened = game.doors().iter().filter(|d| d.status() == DoorStatus::Opened).count();
                match game.status() {
                    GameStatus::AwaitingInitialSelection => {
                        prop_assert_eq!(selected + opened, 0);
                    }
                    GameStatus::AwaitingFinalSelection => {
                        prop_assert_eq!(selected, 1);
                        prop_assert_eq!(opened, 1);
                        let host = game.doors().iter().find(|d| d.status() == DoorStatus::Opened);
                        prop_assert!(host.map(|d| !d.is_prize()).unwrap_or(false));
                    }
                    GameStatus::Won | GameStatus::Lost => {
                        prop_assert_eq!(opened, 2);
                    }
                }
            }
        }
    }
}
