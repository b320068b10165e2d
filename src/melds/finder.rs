//! Meld candidate enumeration.
//!
//! Hands are small (at most a dozen cards plus a pickup), so candidates are
//! found by checking every 3- and 4-card combination with the validator.

use smallvec::SmallVec;

use super::meld::MeldType;
use super::validator::{is_valid_meld, satisfies_pickup, MAX_MELD_SIZE, MIN_MELD_SIZE};
use crate::cards::{Card, CardId, Rank};
use crate::core::PickupMeldPolicy;

/// Index list of one combination.
type Indices = SmallVec<[usize; MAX_MELD_SIZE]>;

/// A valid meld available in a hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeldCandidate {
    pub kind: MeldType,
    /// Card ids in hand order.
    pub cards: SmallVec<[CardId; MAX_MELD_SIZE]>,
}

/// Every `k`-element index combination of `0..n`, in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Indices> {
    fn extend(start: usize, n: usize, k: usize, current: &mut Indices, out: &mut Vec<Indices>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        let needed = k - current.len();
        for i in start..=n.saturating_sub(needed) {
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if k <= n {
        extend(0, n, k, &mut Indices::new(), &mut out);
    }
    out
}

fn classify(pool: &[Card], indices: &Indices, joker_rank: Option<Rank>) -> Option<MeldType> {
    let cards: SmallVec<[Card; MAX_MELD_SIZE]> = indices.iter().map(|&i| pool[i]).collect();
    is_valid_meld(&cards, joker_rank)
}

/// All valid 3-4 card melds that can be declared from `hand`.
///
/// Overlapping candidates are all listed; callers choose one.
#[must_use]
pub fn candidate_melds(hand: &[Card], joker_rank: Option<Rank>) -> Vec<MeldCandidate> {
    let mut found = Vec::new();
    for size in MIN_MELD_SIZE..=MAX_MELD_SIZE {
        for indices in combinations(hand.len(), size) {
            if let Some(kind) = classify(hand, &indices, joker_rank) {
                found.push(MeldCandidate {
                    kind,
                    cards: indices.iter().map(|&i| hand[i].id()).collect(),
                });
            }
        }
    }
    found
}

/// Whether a meld honouring `policy` for `picked` can be declared once
/// the picked cards join `hand`.
///
/// The meld may use hand cards to fill its remaining slots but must leave
/// at least one card behind for the discard. With `run_only` set, only
/// Runs qualify (the player has not laid a Run yet).
#[must_use]
pub fn can_form_meld_with(
    picked: &[Card],
    hand: &[Card],
    joker_rank: Option<Rank>,
    policy: PickupMeldPolicy,
    run_only: bool,
) -> bool {
    let pool: Vec<Card> = picked.iter().chain(hand).copied().collect();
    let picked_ids: SmallVec<[CardId; MAX_MELD_SIZE]> = picked.iter().map(Card::id).collect();
    let max_size = MAX_MELD_SIZE.min(pool.len().saturating_sub(1));

    (MIN_MELD_SIZE..=max_size).any(|size| {
        combinations(pool.len(), size).into_iter().any(|indices| {
            let meld_ids: SmallVec<[CardId; MAX_MELD_SIZE]> =
                indices.iter().map(|&i| pool[i].id()).collect();
            if !satisfies_pickup(&meld_ids, &picked_ids, policy) {
                return false;
            }
            match classify(&pool, &indices, joker_rank) {
                Some(MeldType::Run) => true,
                Some(MeldType::Set) => !run_only,
                None => false,
            }
        })
    })
}
