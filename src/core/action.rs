//! Action representation and the per-turn action log.
//!
//! `Action` names one of the four mutating entry points together with its
//! arguments. Accepted actions are stamped into an `ActionRecord` and kept
//! in the turn history, so a persistence layer can replay a round through
//! `Game::apply_action`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{PlayerId, Seat};
use crate::cards::CardId;

/// Which pile a draw takes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPile {
    Deck,
    DiscardPile,
}

/// A complete player action.
///
/// ## Example
///
/// ```
/// use rummy_engine::core::{Action, DrawPile};
/// use rummy_engine::cards::{CardId, Rank, Suit};
///
/// let draw = Action::Draw { pile: DrawPile::DiscardPile, count: 2 };
/// let discard = Action::Discard { card: CardId::new(Suit::Hearts, Rank::Nine) };
/// assert!(draw.is_draw());
/// assert!(!discard.is_draw());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Draw `count` cards from a pile.
    Draw { pile: DrawPile, count: usize },
    /// Move one card from hand to the discard pile.
    Discard { card: CardId },
    /// Declare a meld from hand cards.
    /// SmallVec keeps the 3-4 ids of a meld inline.
    Meld { cards: SmallVec<[CardId; 4]> },
    /// Decline to meld after an optional draw.
    SkipMeld,
}

impl Action {
    /// Build a meld action from a slice of ids.
    #[must_use]
    pub fn meld(cards: &[CardId]) -> Self {
        Action::Meld {
            cards: SmallVec::from_slice(cards),
        }
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, Action::Draw { .. })
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Draw { .. } => "draw",
            Action::Discard { .. } => "discard",
            Action::Meld { .. } => "meld",
            Action::SkipMeld => "skip_meld",
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - The per-turn action log
/// - The snapshot's "last action" descriptor
/// - Replay
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The seat they occupy.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Turn number (1-based) when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,

    /// Wall-clock time, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl ActionRecord {
    /// Create a new action record stamped with the current time.
    #[must_use]
    pub fn new(player: PlayerId, seat: Seat, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            seat,
            action,
            turn,
            sequence,
            timestamp_ms: now_millis(),
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    (nanos / 1_000_000) as i64
}
