//! The `Card` value type and standard deck construction.
//!
//! Cards are `Copy` values. Moving a card between containers always
//! removes it from the source first, so the same card never lives in
//! two places at once.

use serde::{Deserialize, Serialize};

use super::definition::{CardId, Rank, Suit, JOKER_LAST_CARD_VALUE};

/// A playing card.
///
/// A card marked as joker keeps its printed suit and rank for display
/// but is wild when forming melds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    suit: Suit,
    rank: Rank,
    is_joker: bool,
}

impl Card {
    /// Create a non-joker card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            id: CardId::new(suit, rank),
            suit,
            rank,
            is_joker: false,
        }
    }

    /// Copy of this card designated as a joker.
    #[must_use]
    pub const fn as_joker(self) -> Self {
        Self {
            is_joker: true,
            ..self
        }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn is_joker(&self) -> bool {
        self.is_joker
    }

    /// Hand-scoring value (5/10/15). Jokers are adjusted by the scorer.
    #[must_use]
    pub const fn base_value(&self) -> i32 {
        self.rank.hand_value()
    }

    /// Value paid when this is a Memukul winner's final card.
    #[must_use]
    pub const fn last_card_value(&self) -> i32 {
        if self.is_joker {
            JOKER_LAST_CARD_VALUE
        } else {
            self.rank.last_card_value()
        }
    }

    /// Same rank, different suit.
    #[must_use]
    pub fn matches_by_rank(&self, other: &Card) -> bool {
        self.rank == other.rank && self.suit != other.suit
    }

    /// Same suit and sequence values exactly one apart (Ace counts as 1).
    #[must_use]
    pub fn forms_sequence_with(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank.value().abs_diff(other.rank.value()) == 1
    }

    /// True when suit and rank agree with the id.
    ///
    /// Always holds for cards built through `Card::new`; used to reject
    /// tampered snapshot data.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.id == CardId::new(self.suit, self.rank)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_joker {
            write!(f, "{}*", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

/// Build the 52-card deck, one card per suit/rank pair, none jokers.
#[must_use]
pub fn create_standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(CardId::COUNT);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(suit, rank));
        }
    }
    deck
}
