//! Run and Set predicates.
//!
//! All functions here are pure. A card counts as wild when it carries the
//! joker flag or when its rank equals the round's joker rank.
//!
//! ## Runs
//!
//! 3-4 cards; the natural cards share one suit and, with jokers filling
//! any gaps or ends, form a strictly consecutive sequence. The Ace is
//! either low (A-2-3) or high (Q-K-A); there is no wrap-around. Four
//! natural Aces are also a run.
//!
//! ## Sets
//!
//! 3-4 cards; the natural cards share one rank and no two share a suit.
//! At least one natural card is required.

use smallvec::SmallVec;

use super::meld::MeldType;
use crate::cards::{Card, CardId, Rank};
use crate::core::PickupMeldPolicy;

/// Smallest legal meld.
pub const MIN_MELD_SIZE: usize = 3;

/// Largest legal meld. Longer runs are never a single meld.
pub const MAX_MELD_SIZE: usize = 4;

type Naturals<'a> = SmallVec<[&'a Card; MAX_MELD_SIZE]>;

/// Whether a card is wild under the given joker rank.
#[must_use]
pub fn is_wild(card: &Card, joker_rank: Option<Rank>) -> bool {
    card.is_joker() || joker_rank == Some(card.rank())
}

fn naturals(cards: &[Card], joker_rank: Option<Rank>) -> Naturals<'_> {
    cards.iter().filter(|c| !is_wild(c, joker_rank)).collect()
}

fn has_meld_size(cards: &[Card]) -> bool {
    (MIN_MELD_SIZE..=MAX_MELD_SIZE).contains(&cards.len())
}

fn distinct_suits(naturals: &Naturals<'_>) -> bool {
    let mut seen = 0u8;
    for card in naturals {
        let bit = 1 << card.suit().index();
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}

/// Exactly four natural Aces.
#[must_use]
pub fn is_ace_run(cards: &[Card], joker_rank: Option<Rank>) -> bool {
    if cards.len() != 4 {
        return false;
    }
    let naturals = naturals(cards, joker_rank);
    naturals.len() == 4
        && naturals.iter().all(|c| c.rank() == Rank::Ace)
        && distinct_suits(&naturals)
}

/// Whether the cards form a legal Run.
#[must_use]
pub fn is_run(cards: &[Card], joker_rank: Option<Rank>) -> bool {
    if !has_meld_size(cards) {
        return false;
    }
    if is_ace_run(cards, joker_rank) {
        return true;
    }

    let naturals = naturals(cards, joker_rank);
    let Some(first) = naturals.first() else {
        return false;
    };
    if naturals.iter().any(|c| c.suit() != first.suit()) {
        return false;
    }

    fits_sequence(&naturals, cards.len(), false) || fits_sequence(&naturals, cards.len(), true)
}

/// Can `naturals` occupy distinct slots of one `len`-card sequence, with
/// jokers taking the rest?
fn fits_sequence(naturals: &Naturals<'_>, len: usize, ace_high: bool) -> bool {
    let mut values: SmallVec<[i16; MAX_MELD_SIZE]> = naturals
        .iter()
        .map(|c| match c.rank() {
            Rank::Ace if ace_high => 14,
            rank => i16::from(rank.value()),
        })
        .collect();
    values.sort_unstable();
    if values.windows(2).any(|w| w[0] == w[1]) {
        return false;
    }

    let len = len as i16;
    let (lowest, highest) = if ace_high { (2, 14) } else { (1, 13) };
    let (min, max) = (values[0], values[values.len() - 1]);
    if max - min + 1 > len {
        return false;
    }

    // Some start position s must cover [min, max] and stay on the board.
    let start_min = (max - len + 1).max(lowest);
    let start_max = min.min(highest - len + 1);
    start_min <= start_max
}

/// Whether the cards form a legal Set.
#[must_use]
pub fn is_set(cards: &[Card], joker_rank: Option<Rank>) -> bool {
    if !has_meld_size(cards) {
        return false;
    }
    let naturals = naturals(cards, joker_rank);
    let Some(first) = naturals.first() else {
        return false;
    };
    naturals.iter().all(|c| c.rank() == first.rank()) && distinct_suits(&naturals)
}

/// Classify a candidate meld. Runs take precedence over sets.
#[must_use]
pub fn is_valid_meld(cards: &[Card], joker_rank: Option<Rank>) -> Option<MeldType> {
    if is_run(cards, joker_rank) {
        Some(MeldType::Run)
    } else if is_set(cards, joker_rank) {
        Some(MeldType::Set)
    } else {
        None
    }
}

/// Whether a declared meld honours the pickup obligation.
#[must_use]
pub fn satisfies_pickup(meld: &[CardId], picked: &[CardId], policy: PickupMeldPolicy) -> bool {
    match policy {
        PickupMeldPolicy::RequireAll => picked.iter().all(|id| meld.contains(id)),
        PickupMeldPolicy::RequireAny => picked.iter().any(|id| meld.contains(id)),
    }
}
