//! Error type for rejected actions and invalid engine input.
//!
//! Every rejection is recoverable and permanent for that exact input:
//! the engine never partially applies an action, so a caller can report
//! the message and re-prompt.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::CardId;
use crate::game::GameStatus;
use crate::turns::TurnPhase;

/// Reasons an action or engine operation is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    // === Construction ===
    #[error("a game needs exactly {expected} players, got {actual}")]
    InvalidPlayerCount { expected: usize, actual: usize },

    #[error("player {0} is seated twice")]
    DuplicatePlayer(PlayerId),

    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    // === Game status ===
    #[error("game has already started")]
    AlreadyStarted,

    #[error("game is not in progress (status: {0:?})")]
    GameNotInProgress(GameStatus),

    #[error("the current round has not finished")]
    RoundNotFinished,

    // === Turn ownership and phase ===
    #[error("not your turn")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("cannot do that during the {actual:?} phase (expected {expected:?})")]
    WrongPhase { expected: TurnPhase, actual: TurnPhase },

    #[error("must discard before drawing")]
    MustDiscardFirst,

    #[error("must meld the cards taken from the discard pile before continuing")]
    MandatoryMeldPending,

    // === Resources ===
    #[error("deck is empty")]
    EmptyDeck { requested: usize, remaining: usize },

    #[error("discard pile has only {available} cards, {requested} requested")]
    NotEnoughDiscards { requested: usize, available: usize },

    #[error("cannot draw {count} cards from this pile")]
    InvalidDrawCount { count: usize },

    // === Combinations ===
    #[error("cards do not form a valid run or set")]
    InvalidMeld,

    #[error("a meld needs {min} to {max} cards, got {actual}")]
    InvalidMeldSize { min: usize, max: usize, actual: usize },

    #[error("first meld must be a run")]
    FirstMeldMustBeRun,

    #[error("the cards taken from the discard pile cannot form a meld")]
    PickupCannotFormMeld,

    #[error("meld must use the cards taken from the discard pile")]
    PickupNotMelded,

    #[error("cannot meld every card in hand; one card must remain to discard")]
    MeldWouldEmptyHand,

    #[error("card {0} is listed more than once")]
    DuplicateCard(CardId),

    // === State invariants ===
    #[error("card {0} is not in your hand")]
    CardNotInHand(CardId),

    #[error("card conservation violated: {0}")]
    ConservationViolated(String),

    // === Snapshot import ===
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("snapshot encoding failed: {0}")]
    Encoding(String),
}

impl GameError {
    /// True for errors caused by acting out of turn.
    #[must_use]
    pub fn is_turn_error(&self) -> bool {
        matches!(self, GameError::NotYourTurn { .. })
    }

    /// True for errors caused by acting in the wrong turn phase.
    #[must_use]
    pub fn is_phase_error(&self) -> bool {
        matches!(
            self,
            GameError::WrongPhase { .. }
                | GameError::MustDiscardFirst
                | GameError::MandatoryMeldPending
                | GameError::GameNotInProgress(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GameError::FirstMeldMustBeRun;
        assert_eq!(err.to_string(), "first meld must be a run");

        let err = GameError::EmptyDeck { requested: 1, remaining: 0 };
        assert_eq!(err.to_string(), "deck is empty");

        let err = GameError::NotYourTurn {
            player: PlayerId::new("bob"),
            current: PlayerId::new("alice"),
        };
        assert_eq!(err.to_string(), "not your turn");
        assert!(err.is_turn_error());
    }

    #[test]
    fn test_phase_classification() {
        assert!(GameError::MustDiscardFirst.is_phase_error());
        assert!(GameError::WrongPhase {
            expected: TurnPhase::Meld,
            actual: TurnPhase::Draw
        }
        .is_phase_error());
        assert!(!GameError::InvalidMeld.is_phase_error());
    }
}
