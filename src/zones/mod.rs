//! Card containers owned by the game during a round.
//!
//! ## Key Types
//!
//! - `Deck`: Ordered draw pile (top = end)
//! - `DiscardPile`: Ordered discard pile with per-card attribution
//!
//! Every move between containers is remove-then-insert, so a card is in
//! exactly one place at a time.

pub mod deck;
pub mod discard;

pub use deck::Deck;
pub use discard::DiscardPile;
