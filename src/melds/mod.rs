//! Melds: declared combinations and the rules that validate them.
//!
//! ## Key Types
//!
//! - `Meld`: A declared, immutable Run or Set owned by one player
//! - `MeldType`: Run or Set
//! - `MeldCandidate`: A valid combination found in a hand
//!
//! Validation is pure: every predicate takes the cards plus the round's
//! joker rank and reads nothing else.

pub mod finder;
pub mod meld;
pub mod validator;

pub use finder::{can_form_meld_with, candidate_melds, MeldCandidate};
pub use meld::{Meld, MeldId, MeldType};
pub use validator::{
    is_ace_run, is_run, is_set, is_valid_meld, is_wild, satisfies_pickup, MAX_MELD_SIZE,
    MIN_MELD_SIZE,
};
