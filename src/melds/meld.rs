//! Declared melds.
//!
//! A meld is immutable once declared: the owner cannot add to it or take
//! cards back out of it.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::PlayerId;

/// Meld identifier, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MeldId(pub u32);

impl std::fmt::Display for MeldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Meld({})", self.0)
    }
}

/// Kind of combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldType {
    /// Consecutive same-suit cards, or the four Aces.
    Run,
    /// Same-rank cards of distinct suits.
    Set,
}

/// A declared, face-up meld.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    id: MeldId,
    kind: MeldType,
    cards: Vec<Card>,
    owner: PlayerId,
}

impl Meld {
    /// Create a meld. Callers validate the cards first.
    #[must_use]
    pub fn new(id: MeldId, kind: MeldType, cards: Vec<Card>, owner: PlayerId) -> Self {
        Self {
            id,
            kind,
            cards,
            owner,
        }
    }

    #[must_use]
    pub fn id(&self) -> MeldId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> MeldType {
        self.kind
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn owner(&self) -> &PlayerId {
        &self.owner
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    /// Jokers used in this meld.
    #[must_use]
    pub fn joker_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_joker()).count()
    }
}
