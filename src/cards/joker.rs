//! Joker designation for a round.
//!
//! One card is drawn at random as the reference card and set aside for
//! the whole round. The three other cards of its rank become jokers.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use super::definition::{CardId, Rank, Suit};

/// The round's joker rank and the cards it designates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokerDesignation {
    reference: Card,
    jokers: SmallVec<[CardId; 3]>,
}

impl JokerDesignation {
    /// Designate jokers from the reference card.
    ///
    /// The reference card itself is never a joker.
    #[must_use]
    pub fn from_reference(reference: Card) -> Self {
        let jokers = Suit::ALL
            .into_iter()
            .filter(|&suit| suit != reference.suit())
            .map(|suit| CardId::new(suit, reference.rank()))
            .collect();
        Self {
            reference: Card::new(reference.suit(), reference.rank()),
            jokers,
        }
    }

    /// The card set aside for this round.
    #[must_use]
    pub fn reference(&self) -> Card {
        self.reference
    }

    /// The joker rank for this round.
    #[must_use]
    pub fn rank(&self) -> Rank {
        self.reference.rank()
    }

    /// Ids of the three joker cards.
    #[must_use]
    pub fn joker_ids(&self) -> &[CardId] {
        &self.jokers
    }

    /// Whether the given id is one of this round's jokers.
    #[must_use]
    pub fn is_joker_id(&self, id: CardId) -> bool {
        self.jokers.contains(&id)
    }

    /// Apply the designation to a card coming out of a fresh deck.
    #[must_use]
    pub fn designate(&self, card: Card) -> Card {
        if self.is_joker_id(card.id()) {
            card.as_joker()
        } else {
            card
        }
    }
}
