//! The discard pile with per-card attribution.
//!
//! Attribution (who discarded what) is kept for history and display; rule
//! validation never reads it.

use rustc_hash::FxHashMap;

use crate::cards::{Card, CardId};
use crate::core::{GameError, PlayerId};

/// Ordered discard pile; the top is the most recently pushed card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscardPile {
    cards: Vec<Card>,
    discarded_by: FxHashMap<CardId, PlayerId>,
}

impl DiscardPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a pile from cards (bottom first) and attribution entries.
    #[must_use]
    pub fn from_parts(
        cards: Vec<Card>,
        attribution: impl IntoIterator<Item = (CardId, PlayerId)>,
    ) -> Self {
        Self {
            cards,
            discarded_by: attribution.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
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
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Who discarded a card still on the pile.
    #[must_use]
    pub fn discarded_by(&self, id: CardId) -> Option<&PlayerId> {
        self.discarded_by.get(&id)
    }

    /// Attribution entries in pile order, bottom first.
    #[must_use]
    pub fn attribution(&self) -> Vec<(CardId, PlayerId)> {
        self.cards
            .iter()
            .filter_map(|c| self.discarded_by.get(&c.id()).map(|p| (c.id(), p.clone())))
            .collect()
    }

    /// Push a card on top, recording who discarded it.
    pub fn push(&mut self, card: Card, by: PlayerId) {
        self.discarded_by.insert(card.id(), by);
        self.cards.push(card);
    }

    /// Peek at the most recent `n` cards without removing them.
    ///
    /// Returned in pile order (oldest of the `n` first).
    pub fn get_last_cards(&self, n: usize) -> Result<&[Card], GameError> {
        if n > self.cards.len() {
            return Err(GameError::NotEnoughDiscards {
                requested: n,
                available: self.cards.len(),
            });
        }
        Ok(&self.cards[self.cards.len() - n..])
    }

    /// Remove the most recent `n` cards, preserving their relative order.
    pub fn take_cards(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::NotEnoughDiscards {
                requested: n,
                available: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let taken = self.cards.split_off(split);
        for card in &taken {
            self.discarded_by.remove(&card.id());
        }
        Ok(taken)
    }
}
