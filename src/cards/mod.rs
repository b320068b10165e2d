//! Card model: suits, ranks, card values and joker designation.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier derived from suit and rank (unique per deck)
//! - `Card`: Immutable card value, possibly designated as a joker
//! - `JokerDesignation`: The round's reference card and its three jokers

pub mod card;
pub mod definition;
pub mod joker;

pub use card::{create_standard_deck, Card};
pub use definition::{CardId, Rank, Suit, JOKER_LAST_CARD_VALUE};
pub use joker::JokerDesignation;
