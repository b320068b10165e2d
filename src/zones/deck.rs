//! The draw deck.
//!
//! An ordered stack of cards; the top is the end of the vec. Draws fail
//! explicitly instead of returning fewer cards than requested.

use serde::{Deserialize, Serialize};

use crate::cards::{create_standard_deck, Card, CardId, JokerDesignation};
use crate::core::{GameError, GameRng};

/// Ordered draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a deck from cards, bottom first.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// The unshuffled 52-card deck.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(create_standard_deck())
    }

    /// Uniform random permutation (Fisher-Yates).
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id() == id)
    }

    /// Remove and return the top `n` cards, topmost first.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::EmptyDeck {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Remove and return the top card.
    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck {
            requested: 1,
            remaining: 0,
        })
    }

    /// Remove one card at a random position.
    pub fn take_random(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let index = rng.gen_range_usize(0..self.cards.len());
        Some(self.cards.remove(index))
    }

    /// Mark the designated jokers among the remaining cards.
    pub fn apply_jokers(&mut self, designation: &JokerDesignation) {
        for card in &mut self.cards {
            *card = designation.designate(*card);
        }
    }

    /// Put a card back on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }
}
