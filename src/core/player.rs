//! Player identification and per-seat state.
//!
//! ## PlayerId
//!
//! Opaque identifier supplied by the identity layer. The engine only
//! compares and displays it.
//!
//! ## Seat
//!
//! 0-based table position. Turn order runs over seats.
//!
//! ## Player
//!
//! Mutable per-seat state: hand, declared melds, running score and the
//! session flags.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::melds::{Meld, MeldType};

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Table position, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seats for a table of `player_count` players.
    ///
    /// ```
    /// use rummy_engine::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], Seat::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = Seat> {
        (0..player_count as u8).map(Seat)
    }

    /// Seat `steps` positions clockwise from this one.
    #[must_use]
    pub fn offset(self, steps: usize, player_count: usize) -> Seat {
        Seat(((self.index() + steps) % player_count) as u8)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat player state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    display_name: String,
    hand: Vec<Card>,
    melds: Vec<Meld>,
    score: i32,
    ready: bool,
    connected: bool,
    has_laid_run: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            hand: Vec::new(),
            melds: Vec::new(),
            score: 0,
            ready: false,
            connected: true,
            has_laid_run: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn melds(&self) -> &[Meld] {
        &self.melds
    }

    /// Running score across rounds.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether a Run has been declared this round. Never resets mid-round.
    #[must_use]
    pub fn has_laid_run(&self) -> bool {
        self.has_laid_run
    }

    // === Hand queries ===

    #[must_use]
    pub fn has_card(&self, id: CardId) -> bool {
        self.hand.iter().any(|c| c.id() == id)
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.hand.iter().find(|c| c.id() == id)
    }

    /// Hand cards that pair with `card` by rank or sit next to it in a run.
    #[must_use]
    pub fn matching_cards(&self, card: &Card) -> Vec<Card> {
        self.hand
            .iter()
            .filter(|c| c.id() != card.id())
            .filter(|c| c.matches_by_rank(card) || c.forms_sequence_with(card))
            .copied()
            .collect()
    }

    /// Memukul condition: exactly one card left, at least one declared
    /// meld, and a Run among them.
    #[must_use]
    pub fn can_win(&self) -> bool {
        self.hand.len() == 1 && !self.melds.is_empty() && self.has_laid_run
    }

    /// Number of joker cards still in hand.
    #[must_use]
    pub fn jokers_in_hand(&self) -> usize {
        self.hand.iter().filter(|c| c.is_joker()).count()
    }

    /// Rebuild a player from snapshot fields.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: PlayerId,
        display_name: String,
        hand: Vec<Card>,
        melds: Vec<Meld>,
        score: i32,
        ready: bool,
        connected: bool,
        has_laid_run: bool,
    ) -> Self {
        Self {
            id,
            display_name,
            hand,
            melds,
            score,
            ready,
            connected,
            has_laid_run,
        }
    }

    // === Mutation (crate-internal: only `Game` moves cards) ===

    pub(crate) fn receive(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
    }

    /// Remove a card from the hand.
    pub(crate) fn remove_card(&mut self, id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id() == id)?;
        Some(self.hand.remove(pos))
    }

    /// Remove several cards, preserving the order of `ids`.
    ///
    /// Leaves the hand untouched and returns `None` if any id is missing
    /// or repeated.
    pub(crate) fn remove_cards(&mut self, ids: &[CardId]) -> Option<Vec<Card>> {
        let unique: FxHashSet<CardId> = ids.iter().copied().collect();
        if unique.len() != ids.len() || !ids.iter().all(|&id| self.has_card(id)) {
            return None;
        }
        ids.iter().map(|&id| self.remove_card(id)).collect()
    }

    pub(crate) fn declare_meld(&mut self, meld: Meld) {
        if meld.kind() == MeldType::Run {
            self.has_laid_run = true;
        }
        self.melds.push(meld);
    }

    pub(crate) fn add_score(&mut self, delta: i32) {
        self.score += delta;
    }

    pub(crate) fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Clear round state, keeping the running score.
    pub(crate) fn reset_for_round(&mut self) {
        self.hand.clear();
        self.melds.clear();
        self.has_laid_run = false;
    }
}
