//! # rummy-engine
//!
//! Rule engine for a four-player Rummy variant with rank-designated jokers
//! and the Memukul hit-out.
//!
//! ## Design Principles
//!
//! 1. **Deterministic State Machine**: Every action either applies in full
//!    or is rejected with a `GameError`; nothing is ever half-applied.
//!
//! 2. **Cards Are Values**: `Card` is `Copy`. Moving a card always removes
//!    it from its source, so the 51 cards in play are each in exactly one
//!    place.
//!
//! 3. **Plain-Data Boundary**: `GameSnapshot` exports the whole game and
//!    `Game::from_snapshot` rebuilds it, including the RNG position.
//!
//! ## Modules
//!
//! - `core`: Players, seats, actions, RNG, rules configuration, errors
//! - `cards`: Suits, ranks, card values, joker designation
//! - `zones`: Deck and discard pile
//! - `melds`: Declared melds, Run/Set validation, candidate search
//! - `turns`: Turn order and the Draw/Meld/Discard phase machine
//! - `rules`: Action validation and round scoring
//! - `game`: The `Game` orchestrator and snapshots
//!
//! ## Example
//!
//! ```
//! use rummy_engine::{GameBuilder, TurnPhase};
//!
//! let mut game = GameBuilder::new("room-7")
//!     .player("a", "Ana")
//!     .player("b", "Budi")
//!     .player("c", "Citra")
//!     .player("d", "Dewi")
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! game.start().unwrap();
//!
//! // The first player holds 8 cards and opens by discarding.
//! let first = game.current_player().id().clone();
//! let card = game.current_player().hand()[0].id();
//! game.discard_card(&first, card).unwrap();
//! assert_eq!(game.phase(), TurnPhase::Draw);
//! ```

pub mod cards;
pub mod core;
pub mod game;
pub mod melds;
pub mod rules;
pub mod turns;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, DrawPile, GameError, GameRng, GameRngState, PickupMeldPolicy, Player,
    PlayerId, RulesConfig, Seat, PLAYER_COUNT,
};

pub use crate::cards::{Card, CardId, JokerDesignation, Rank, Suit};

pub use crate::zones::{Deck, DiscardPile};

pub use crate::melds::{candidate_melds, is_valid_meld, Meld, MeldCandidate, MeldId, MeldType};

pub use crate::turns::{DrawSource, TurnManager, TurnPhase};

pub use crate::rules::{
    FinishReason, GameValidator, JokerPrivilegeHook, NoJokerPrivilege, RoundSummary,
    ScoreManager,
};

pub use crate::game::{Game, GameBuilder, GameSnapshot, GameStatus, PlayerSnapshot};
