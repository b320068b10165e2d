//! The game aggregate and its snapshot form.
//!
//! ## Key Types
//!
//! - `Game`: Owns one round's deck, discard pile, players and turn state
//! - `GameBuilder`: Seats players and configures rules and seed
//! - `GameSnapshot`: Self-contained plain-data copy of a `Game`

#[allow(clippy::module_inception)]
pub mod game;
pub mod snapshot;

pub use game::{Game, GameBuilder, GameStatus, CARDS_IN_CIRCULATION};
pub use snapshot::{GameSnapshot, PlayerSnapshot};
